//! Text rendering of the view state with Tera

use crate::api::ApiError;
use crate::config::UiSettings;
use crate::flow::{Panel, ViewState};
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;
use tera::{Context, Tera};

const VIEW_TEMPLATE: &str = "view.txt";

#[derive(Serialize)]
struct ErrorContext<'a> {
    message: &'a str,
    code: Option<&'a str>,
    status: Option<&'a str>,
    details: Option<&'a str>,
    path: Option<&'a str>,
    time: Option<String>,
}

impl<'a> From<&'a ApiError> for ErrorContext<'a> {
    fn from(error: &'a ApiError) -> Self {
        Self {
            message: &error.message,
            code: error.error_code.as_deref(),
            status: error.status.as_deref(),
            details: error.details.as_deref(),
            path: error.path.as_deref(),
            time: error.timestamp.as_deref().map(format_timestamp),
        }
    }
}

#[derive(Serialize)]
struct ViewContext<'a> {
    panel: &'static str,
    letter: &'a str,
    validation_error: &'a str,
    has_count: bool,
    count: u64,
    cities: &'a [String],
    error: Option<ErrorContext<'a>>,
    show_details: bool,
}

/// Renders a [`ViewState`] as terminal text
pub struct ViewRenderer {
    tera: Tera,
    show_error_details: bool,
}

impl ViewRenderer {
    /// Create a renderer with the embedded view template
    pub fn new() -> Result<Self> {
        Self::with_settings(&UiSettings::default())
    }

    pub fn with_settings(ui: &UiSettings) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(VIEW_TEMPLATE, include_str!("../templates/view.txt"))?;

        Ok(Self {
            tera,
            show_error_details: ui.show_error_details,
        })
    }

    /// Render the single visible panel of `state`
    pub fn render(&self, state: &ViewState) -> Result<String> {
        let mut view = ViewContext {
            panel: "empty",
            letter: &state.query,
            validation_error: "",
            has_count: false,
            count: 0,
            cities: &[],
            error: None,
            show_details: self.show_error_details,
        };

        match state.panel() {
            Panel::Validation(message) => {
                view.panel = "validation";
                view.validation_error = message;
            }
            Panel::Loading => view.panel = "loading",
            Panel::Error(error) => {
                view.panel = "error";
                view.error = Some(error.into());
            }
            Panel::Results { count, cities } => {
                view.panel = "results";
                view.has_count = count.is_some();
                view.count = count.unwrap_or_default();
                view.cities = cities;
            }
            Panel::Empty => {}
        }

        let ctx = Context::from_serialize(&view)?;
        Ok(self.tera.render(VIEW_TEMPLATE, &ctx)?)
    }
}

/// Show server timestamps in local time when they parse, verbatim otherwise
fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &ViewState) -> String {
        ViewRenderer::new().unwrap().render(state).unwrap()
    }

    #[test]
    fn test_results_panel() {
        let state = ViewState {
            query: "Z".to_string(),
            count: Some(3),
            cities: vec![
                "Zuwarah".to_string(),
                "Zawiya".to_string(),
                "Zlitan".to_string(),
            ],
            ..Default::default()
        };
        let out = render(&state);

        assert!(out.contains("Number of cities starting with \"Z\": 3"));
        assert!(out.contains("Cities:"));
        assert!(out.contains("  - Zuwarah\n  - Zawiya\n  - Zlitan"));
        assert!(!out.contains("Error"));
    }

    #[test]
    fn test_empty_list_omits_city_panel() {
        let state = ViewState {
            query: "x".to_string(),
            count: Some(0),
            ..Default::default()
        };
        let out = render(&state);
        assert!(out.contains("starting with \"x\": 0"));
        assert!(!out.contains("Cities:"));
    }

    #[test]
    fn test_error_panel_hides_results() {
        let state = ViewState {
            query: "Z".to_string(),
            cities: vec!["Zuwarah".to_string()],
            error: Some(ApiError {
                message: "Internal Server Error".to_string(),
                error_code: Some("ERR-500".to_string()),
                status: Some("500".to_string()),
                timestamp: Some("2025-03-01T10:15:30.123".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = render(&state);

        assert!(out.contains("Message: Internal Server Error"));
        assert!(out.contains("Code: ERR-500"));
        assert!(out.contains("Status: 500"));
        assert!(out.contains("Time: 2025-03-01 10:15:30"));
        assert!(!out.contains("Path:"));
        assert!(!out.contains("Zuwarah"));
    }

    #[test]
    fn test_error_details_can_be_hidden() {
        let renderer = ViewRenderer::with_settings(&UiSettings {
            show_error_details: false,
        })
        .unwrap();
        let state = ViewState {
            error: Some(ApiError {
                message: "nope".to_string(),
                error_code: Some("E1".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = renderer.render(&state).unwrap();
        assert!(out.contains("Message: nope"));
        assert!(!out.contains("E1"));
    }

    #[test]
    fn test_validation_and_loading() {
        let state = ViewState {
            query: "9".to_string(),
            loading: true,
            validation_error: "Please enter a valid letter (A-Z or a-z)".to_string(),
            ..Default::default()
        };
        assert_eq!(render(&state).trim(), "! Please enter a valid letter (A-Z or a-z)");

        let state = ViewState {
            loading: true,
            ..Default::default()
        };
        assert_eq!(render(&state).trim(), "Loading...");
    }

    #[test]
    fn test_idle_prompt() {
        assert!(render(&ViewState::default()).contains("Enter a letter"));
    }

    #[test]
    fn test_unparseable_timestamp_is_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp("2024-01-02T03:04:05"), "2024-01-02 03:04:05");
    }
}
