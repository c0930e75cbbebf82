use maud::{html, Markup, Render};

use crate::models::{Parameter, PredictionRequest};
use crate::opts::{Layout, PresentationOpts};

/// The seven parameter inputs with the «Predict» and «Clear» buttons.
pub struct ParameterForm<'a> {
    values: &'a PredictionRequest,
    presentation: PresentationOpts,
}

impl<'a> ParameterForm<'a> {
    pub const fn new(values: &'a PredictionRequest, presentation: PresentationOpts) -> Self {
        Self {
            values,
            presentation,
        }
    }

    fn step(&self) -> String {
        let precision = self.presentation.precision;
        format!("{:.*}", precision, 10_f64.powi(-(precision as i32)))
    }

    fn field(&self, parameter: Parameter) -> Markup {
        let name = parameter.field_name();
        html! {
            div.field {
                label.label for=(name) { (parameter.label()) }
                div.control {
                    input.input
                        id=(name)
                        name=(name)
                        type="number"
                        min="0"
                        step=(self.step())
                        value=(format!("{:.*}", self.presentation.precision, self.values.get(parameter)))
                        title=(parameter.help())
                        required;
                }
                p.help { (parameter.help()) }
            }
        }
    }
}

impl Render for ParameterForm<'_> {
    fn render(&self) -> Markup {
        html! {
            form method="POST" action="/" {
                h2.subtitle { "Input Parameters (Dimensionless Terms)" }

                @match self.presentation.layout {
                    Layout::Single => {
                        @for parameter in Parameter::ALL {
                            (self.field(parameter))
                        }
                    }
                    Layout::TwoColumn => {
                        div.columns {
                            div.column {
                                @for parameter in Parameter::ALL.into_iter().step_by(2) {
                                    (self.field(parameter))
                                }
                            }
                            div.column {
                                @for parameter in Parameter::ALL.into_iter().skip(1).step_by(2) {
                                    (self.field(parameter))
                                }
                            }
                        }
                    }
                }

                div.buttons {
                    button.button.is-link.is-fullwidth type="submit" name="action" value="predict" { "Predict" }
                    button.button.is-fullwidth type="submit" name="action" value="clear" formnovalidate { "Clear" }
                }
            }
        }
    }
}
