use clap::crate_version;
use maud::{html, Markup};

pub use self::float::*;
pub use self::outcome::*;
pub use self::parameter_form::*;

mod float;
mod outcome;
mod parameter_form;

pub const TITLE: &str = "Estimating Saltwater Wedge Length in Sloping Coastal Aquifers Using Explainable Machine Learning Models";

pub const DEVELOPERS: &str = "Developers: Mohamed Kamel Elshaarawy & Asaad Mater Armanuos";

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
    }
}

pub fn footer() -> Markup {
    html! {
        footer.footer {
            div.content.has-text-centered {
                p {
                    "SWI Dashboard " (crate_version!())
                    " · built with " a href="https://www.rust-lang.org/" { "Rust" }
                    " and " a href="https://bulma.io/" { "Bulma" }
                }
            }
        }
    }
}
