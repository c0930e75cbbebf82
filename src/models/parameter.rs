/// Dimensionless term describing the sloping coastal aquifer.
///
/// The declaration order is the feature order the model was trained on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    RelativeDensity,
    HydraulicConductivity,
    BedSlope,
    HeadDifference,
    WellDistance,
    WellDepth,
    WellRate,
}

impl Parameter {
    pub const ALL: [Self; 7] = [
        Self::RelativeDensity,
        Self::HydraulicConductivity,
        Self::BedSlope,
        Self::HeadDifference,
        Self::WellDistance,
        Self::WellDepth,
        Self::WellRate,
    ];

    /// Index in the feature vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Form field name.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::RelativeDensity => "relative_density",
            Self::HydraulicConductivity => "hydraulic_conductivity",
            Self::BedSlope => "bed_slope",
            Self::HeadDifference => "head_difference",
            Self::WellDistance => "well_distance",
            Self::WellDepth => "well_depth",
            Self::WellRate => "well_rate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RelativeDensity => "Relative Density (ρs/ρf)",
            Self::HydraulicConductivity => "Relative Hydraulic Conductivity (KLo²/Q)",
            Self::BedSlope => "Bed Slope (tan(β))",
            Self::HeadDifference => "Relative Head Difference (ΔH/Lo)",
            Self::WellDistance => "Relative Recharge Well Distance (Xr/Lo)",
            Self::WellDepth => "Relative Recharge Well Depth (Yr/Lo)",
            Self::WellRate => "Relative Recharge Well Rate (Qr/Q)",
        }
    }

    pub const fn help(self) -> &'static str {
        match self {
            Self::RelativeDensity => "Enter relative density ratio.",
            Self::HydraulicConductivity => "Enter relative hydraulic conductivity ratio.",
            Self::BedSlope => "Enter the bed slope (tan(β)).",
            Self::HeadDifference => "Enter the relative head difference.",
            Self::WellDistance => "Enter the relative recharge well distance.",
            Self::WellDepth => "Enter the relative recharge well depth.",
            Self::WellRate => "Enter the relative recharge well rate.",
        }
    }
}
