//! The only page: parameter form, submission handling and the outcome.

use maud::{html, Markup, DOCTYPE};
use poem::http::StatusCode;
use poem::web::cookie::CookieJar;
use poem::web::{Data, Form, Html};
use poem::{handler, IntoResponse, Response};
use serde::Deserialize;

use crate::models::{InputValue, PredictionRequest};
use crate::predictor::{self, ModelNotFoundError, Outcome};
use crate::prelude::*;
use crate::web::partials::*;
use crate::web::state::State;

#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Predict,
    Clear,
}

/// Submitted form. Missing fields read as zeros.
#[derive(Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    relative_density: InputValue,

    #[serde(default)]
    hydraulic_conductivity: InputValue,

    #[serde(default)]
    bed_slope: InputValue,

    #[serde(default)]
    head_difference: InputValue,

    #[serde(default)]
    well_distance: InputValue,

    #[serde(default)]
    well_depth: InputValue,

    #[serde(default)]
    well_rate: InputValue,

    #[serde(default)]
    action: Action,
}

impl SubmitForm {
    fn request(&self) -> PredictionRequest {
        PredictionRequest::from([
            self.relative_density,
            self.hydraulic_conductivity,
            self.bed_slope,
            self.head_difference,
            self.well_distance,
            self.well_depth,
            self.well_rate,
        ])
    }
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(Data(state): Data<&State>, cookie_jar: &CookieJar) -> Result<Response> {
    if let Err(error) = state.model_loader.load().await {
        return render_model_error(state, error).await;
    }
    let session_id = state.sessions.identify(cookie_jar);
    let values = state.sessions.get_inputs(session_id).await;
    debug!(%session_id, ?values);
    Ok(render_page(state, render_form(state, &values, None), StatusCode::OK).await)
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post(
    Data(state): Data<&State>,
    cookie_jar: &CookieJar,
    form: poem::Result<Form<SubmitForm>>,
) -> poem::Result<Response> {
    // A missing model takes precedence over an invalid form.
    let model = match state.model_loader.load().await {
        Ok(model) => model,
        Err(error) => {
            return Ok(render_model_error(state, error).await?);
        }
    };
    let Form(form) = form?;
    let session_id = state.sessions.identify(cookie_jar);

    let markup = match form.action {
        Action::Clear => {
            info!(%session_id, "clearing the inputs");
            let values = PredictionRequest::default();
            state.sessions.set_inputs(session_id, values).await;
            render_form(state, &values, None)
        }
        Action::Predict => {
            let request = form.request();
            let outcome = predictor::submit(&*model, &request);
            info!(%session_id, ?request, ?outcome, "submitted");
            if !matches!(outcome, Outcome::Warned) {
                state.sessions.set_inputs(session_id, request).await;
            }
            let values = if state.presentation.clear_on_submit {
                PredictionRequest::default()
            } else {
                request
            };
            render_form(state, &values, Some(&outcome))
        }
    };
    Ok(render_page(state, markup, StatusCode::OK).await)
}

fn render_form(state: &State, values: &PredictionRequest, outcome: Option<&Outcome>) -> Markup {
    html! {
        div.box {
            (ParameterForm::new(values, state.presentation))
        }
        @if let Some(outcome) = outcome {
            (OutcomeNotification(outcome))
        }
    }
}

/// A missing model halts the page: no form is rendered since it could not be served.
async fn render_model_error(state: &State, error: Error) -> Result<Response> {
    match error.downcast_ref::<ModelNotFoundError>() {
        Some(error) => {
            warn!("{}", error);
            let markup = html! {
                div.notification.is-danger { "❌ " (error.to_string()) }
            };
            Ok(render_page(state, markup, StatusCode::SERVICE_UNAVAILABLE).await)
        }
        None => Err(error.context("failed to load the model")),
    }
}

async fn render_page(state: &State, content: Markup, status: StatusCode) -> Response {
    let has_image = state.has_image().await;
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "SWI Prediction" }
            }
            body {
                section.section {
                    div.container.is-max-desktop {
                        h1.title.has-text-centered.has-text-link { (TITLE) }
                        p.subtitle.has-text-centered.has-text-weight-bold { (DEVELOPERS) }
                        @if has_image {
                            figure.image."mb-5" {
                                img src="/sketch" alt="Sketch of the sloping coastal aquifer";
                            }
                        }
                        (content)
                    }
                }
                (footer())
            }
        }
    };
    Html(markup.into_string()).with_status(status).into_response()
}

#[cfg(test)]
mod tests {
    use poem::http::header::SET_COOKIE;
    use poem::test::TestResponse;

    use super::*;
    use crate::opts::PresentationOpts;
    use crate::predictor::{ModelLoader, TreeEnsemble};
    use crate::web::test::{constant_model, create_standalone_test_client, create_test_client};

    const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

    fn form_body(values: [&str; 7], action: &str) -> String {
        let names = [
            "relative_density",
            "hydraulic_conductivity",
            "bed_slope",
            "head_difference",
            "well_distance",
            "well_depth",
            "well_rate",
        ];
        let mut body: Vec<String> = names
            .into_iter()
            .zip(values)
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        body.push(format!("action={}", action));
        body.join("&")
    }

    const EXAMPLE: [&str; 7] = ["1.025", "0.015", "0.01", "0.5", "2.0", "1.0", "0.2"];
    const ZEROS: [&str; 7] = ["0", "0", "0", "0", "0", "0", "0"];

    async fn into_text(response: TestResponse) -> Result<String> {
        Ok(response.0.into_body().into_string().await?)
    }

    fn session_cookie(response: &TestResponse) -> Result<String> {
        let header = response
            .0
            .headers()
            .get(SET_COOKIE)
            .ok_or_else(|| anyhow!("no cookie has been set"))?
            .to_str()?;
        Ok(header.split(';').next().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn get_index_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        assert!(session_cookie(&response)?.starts_with("session-id="));

        let text = into_text(response).await?;
        assert!(text.contains("<form"));
        assert_eq!(text.matches(r#"type="number""#).count(), 7);
        assert_eq!(text.matches(r#"value="0.0000""#).count(), 7);
        assert!(!text.contains("notification"));
        assert!(text.contains("Developers: Mohamed Kamel Elshaarawy &amp; Asaad Mater Armanuos"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_model_halts_ok() -> Result {
        let loader = ModelLoader::new("/non-existent/model.json");
        let (_guard, client) = create_test_client(loader, PresentationOpts::default())?;

        let response = client.get("/").send().await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let text = into_text(response).await?;
        assert!(text.contains("Model file not found: /non-existent/model.json"));
        assert!(!text.contains("<form"));
        assert!(!text.contains("<input"));

        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(EXAMPLE, "predict"))
            .send()
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(!into_text(response).await?.contains("Predicted"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_model_halts_invalid_form_ok() -> Result {
        let loader = ModelLoader::new("/non-existent/model.json");
        let (_guard, client) = create_test_client(loader, PresentationOpts::default())?;
        let mut values = EXAMPLE;
        values[0] = "-1";
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(values, "predict"))
            .send()
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(into_text(response).await?.contains("Model file not found"));
        Ok(())
    }

    #[tokio::test]
    async fn predict_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(EXAMPLE, "predict"))
            .send()
            .await;
        response.assert_status_is_ok();
        let text = into_text(response).await?;
        assert!(text.contains(
            r#"Predicted SWI Wedge Length Ratio (L/Lo): <strong><span title="0.6">0.6000</span></strong>"#
        ));
        assert!(!text.contains("Please enter valid values"));
        assert!(!text.contains("Prediction Error"));
        assert!(text.contains(r#"value="1.0250""#));
        Ok(())
    }

    #[tokio::test]
    async fn all_zeros_warn_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(ZEROS, "predict"))
            .send()
            .await;
        response.assert_status_is_ok();
        let text = into_text(response).await?;
        assert!(text.contains("Please enter valid values for the parameters."));
        assert!(!text.contains("Predicted SWI Wedge Length Ratio"));
        assert!(!text.contains("Prediction Error"));
        Ok(())
    }

    #[tokio::test]
    async fn prediction_error_ok() -> Result {
        let model = TreeEnsemble {
            n_features: 8,
            ..constant_model()
        };
        let loader = ModelLoader::preloaded(Arc::new(model));
        let (_guard, client) = create_test_client(loader, PresentationOpts::default())?;
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(EXAMPLE, "predict"))
            .send()
            .await;
        response.assert_status_is_ok();
        let text = into_text(response).await?;
        assert!(text.contains("Prediction Error: expected 8 features, got 7"));
        assert!(!text.contains("Predicted SWI Wedge Length Ratio"));
        Ok(())
    }

    #[tokio::test]
    async fn negative_value_rejected_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let mut values = EXAMPLE;
        values[3] = "-0.5";
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(values, "predict"))
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn session_remembers_inputs_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(EXAMPLE, "predict"))
            .send()
            .await;
        response.assert_status_is_ok();
        let cookie = session_cookie(&response)?;

        let response = client.get("/").header("Cookie", cookie.as_str()).send().await;
        response.assert_status_is_ok();
        let text = into_text(response).await?;
        for value in ["1.0250", "0.0150", "0.0100", "0.5000", "2.0000", "1.0000", "0.2000"] {
            assert!(text.contains(&format!(r#"value="{}""#, value)), "missing {}", value);
        }

        let response = client.get("/").send().await;
        let text = into_text(response).await?;
        assert_eq!(text.matches(r#"value="0.0000""#).count(), 7);

        let response = client
            .post("/")
            .header("Cookie", cookie.as_str())
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(EXAMPLE, "clear"))
            .send()
            .await;
        response.assert_status_is_ok();
        let text = into_text(response).await?;
        assert_eq!(text.matches(r#"value="0.0000""#).count(), 7);
        assert!(!text.contains("notification"));

        let response = client.get("/").header("Cookie", cookie.as_str()).send().await;
        let text = into_text(response).await?;
        assert_eq!(text.matches(r#"value="0.0000""#).count(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn clear_on_submit_ok() -> Result {
        let presentation = PresentationOpts {
            clear_on_submit: true,
            ..Default::default()
        };
        let loader = ModelLoader::preloaded(Arc::new(constant_model()));
        let (_guard, client) = create_test_client(loader, presentation)?;
        let response = client
            .post("/")
            .content_type(FORM_CONTENT_TYPE)
            .body(form_body(EXAMPLE, "predict"))
            .send()
            .await;
        response.assert_status_is_ok();
        let text = into_text(response).await?;
        assert!(text.contains("0.6000"));
        assert_eq!(text.matches(r#"value="0.0000""#).count(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_not_found_ok() -> Result {
        let (_guard, client) = create_standalone_test_client()?;
        client.get("/unknown").send().await.assert_status(StatusCode::NOT_FOUND);
        client.put("/").send().await.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        Ok(())
    }
}
