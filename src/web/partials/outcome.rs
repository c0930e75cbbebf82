use maud::{html, Markup, Render};

use crate::predictor::Outcome;
use crate::web::partials::Float;

pub const DEGENERATE_INPUT_WARNING: &str = "Please enter valid values for the parameters. All inputs cannot be zero as it will produce an invalid prediction.";

/// Exactly one notification per submission: warning, success, or error.
pub struct OutcomeNotification<'a>(pub &'a Outcome);

impl Render for OutcomeNotification<'_> {
    fn render(&self) -> Markup {
        html! {
            @match self.0 {
                Outcome::Warned => {
                    div.notification.is-warning { "⚠️ " (DEGENERATE_INPUT_WARNING) }
                }
                Outcome::Succeeded(prediction) => {
                    div.notification.is-success {
                        "🔍 Predicted SWI Wedge Length Ratio (L/Lo): "
                        strong { (Float::from(*prediction).precision(4)) }
                    }
                }
                Outcome::Failed(error) => {
                    div.notification.is-danger { "❌ Prediction Error: " (error.to_string()) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn render_warning_ok() {
        let markup = OutcomeNotification(&Outcome::Warned).render().into_string();
        assert!(markup.contains("is-warning"));
        assert!(markup.contains("Please enter valid values for the parameters."));
    }

    #[test]
    fn render_success_ok() {
        let markup = OutcomeNotification(&Outcome::Succeeded(0.123456)).render().into_string();
        assert!(markup.contains("is-success"));
        assert!(markup.contains(
            // language=html
            r#"Predicted SWI Wedge Length Ratio (L/Lo): <strong><span title="0.123456">0.1235</span></strong>"#
        ));
    }

    #[test]
    fn render_error_ok() {
        let outcome = Outcome::Failed(anyhow!("expected <8> features").into());
        let markup = OutcomeNotification(&outcome).render().into_string();
        assert!(markup.contains("is-danger"));
        assert!(markup.contains("Prediction Error: expected &lt;8&gt; features"));
    }
}
