use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

/// Locales with a translation file.
pub const LANGUAGES: [&str; 2] = ["th", "en"];

pub(crate) mod filters {
    use time::{Date, OffsetDateTime};

    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")
            .expect("Unable to get preferred_language from askama::get_value");

        Ok(rust_i18n::t!(value, locale = preferred_language).to_string())
    }

    /// `19/10/69`
    #[askama::filter_fn]
    pub fn thai_date(value: &Date, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(bambooflow_shared::format_thai_short(*value))
    }

    /// `19 ต.ค. 2569`
    #[askama::filter_fn]
    pub fn thai_date_medium(value: &Date, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(bambooflow_shared::format_thai_medium(*value))
    }

    /// Unix seconds shown as a Bangkok calendar date.
    #[askama::filter_fn]
    pub fn timestamp(value: &i64, _values: &dyn askama::Values) -> askama::Result<String> {
        let date = OffsetDateTime::from_unix_timestamp(*value)
            .map_err(|e| askama::Error::Custom(Box::new(e)))?
            .to_offset(bambooflow_shared::BANGKOK)
            .date();

        Ok(bambooflow_shared::format_thai_medium(date))
    }

    #[askama::filter_fn]
    pub fn iso_date(value: &Date, _values: &dyn askama::Values) -> askama::Result<String> {
        bambooflow_shared::format_iso_date(*value).map_err(askama::Error::custom)
    }

    /// Farm area with at most two decimals, `12.5` rather than `12.50`.
    #[askama::filter_fn]
    pub fn rai(value: &f64, _values: &dyn askama::Values) -> askama::Result<String> {
        let formatted = format!("{value:.2}");

        Ok(formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_owned())
    }
}

pub struct Template {
    preferred_language: String,
}

impl Template {
    pub fn preferred_language(&self) -> &str {
        &self.preferred_language
    }

    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "preferred_language",
            Box::new(self.preferred_language.to_owned()),
        );

        template.render_with_values(&values)
    }

    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match self.render_with_values(template) {
            Ok(html) => html,
            Err(err) => format!("Failed to render template. Error: {err}"),
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {err}"),
            )
                .into_response(),
        }
    }

    pub fn render_status<T: askama::Template>(&self, status: StatusCode, template: T) -> Response {
        let mut response = self.render(template);
        if response.status().is_success() {
            *response.status_mut() = status;
        }

        response
    }

    /// Message shown inline on a form, `None` for errors the visitor cannot fix.
    pub fn user_message(&self, err: &bambooflow_shared::Error) -> Option<String> {
        match err {
            bambooflow_shared::Error::Validate(_) => Some(
                rust_i18n::t!("form.invalid", locale = self.preferred_language.as_str())
                    .to_string(),
            ),
            bambooflow_shared::Error::User(message) => Some(message.to_owned()),
            bambooflow_shared::Error::NotFound(_) => Some(err.to_string()),
            _ => {
                tracing::error!("{err}");
                None
            }
        }
    }
}

/// First supported language of an `Accept-Language` header, e.g. `th-TH,th;q=0.9`.
pub fn negotiate_language(header: Option<&str>) -> Option<&'static str> {
    let header = header?;

    let mut ranges = header
        .split(',')
        .filter_map(|range| {
            let mut parts = range.trim().split(';');
            let tag = parts.next()?.trim();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            Some((tag, quality))
        })
        .collect::<Vec<_>>();

    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranges.into_iter().find_map(|(tag, _)| {
        let primary = tag.split('-').next().unwrap_or(tag).to_lowercase();
        LANGUAGES.into_iter().find(|lang| *lang == primary)
    })
}

impl FromRequestParts<crate::routes::AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        let accept_language = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());

        let preferred_language = negotiate_language(accept_language)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| state.config.i18n.default_language.to_owned());

        Ok(Template { preferred_language })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        $crate::try_page_response!(sync: $result.await, $template)
    };

    (opt: $result:expr, $template:expr) => {
        $crate::try_page_response!(sync opt: $result.await, $template)
    };

    (sync: $result:expr, $template:expr) => {
        match $result {
            Ok(r) => r,
            Err(bambooflow_shared::Error::NotFound(_)) => {
                return $template
                    .render_status(
                        axum::http::StatusCode::NOT_FOUND,
                        $crate::template::NotFoundTemplate,
                    )
                    .into_response();
            }
            Err(err) => {
                tracing::error!("{err}");

                return $template
                    .render_status(
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        $crate::template::ServerTemplate,
                    )
                    .into_response();
            }
        }
    };

    (sync opt: $result:expr, $template:expr) => {
        match $result {
            Some(r) => r,
            _ => {
                return $template
                    .render_status(
                        axum::http::StatusCode::NOT_FOUND,
                        $crate::template::NotFoundTemplate,
                    )
                    .into_response();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate_language() {
        assert_eq!(negotiate_language(Some("th-TH,th;q=0.9,en;q=0.8")), Some("th"));
        assert_eq!(negotiate_language(Some("en-US,en;q=0.9")), Some("en"));
        assert_eq!(negotiate_language(Some("fr-FR, en;q=0.5, th;q=0.7")), Some("th"));
        assert_eq!(negotiate_language(Some("fr, de")), None);
        assert_eq!(negotiate_language(None), None);
    }

    #[test]
    fn test_user_message_follows_language() {
        let err = bambooflow_shared::Error::Validate(validator::ValidationErrors::new());

        let template = Template {
            preferred_language: "en".to_owned(),
        };
        assert_eq!(
            template.user_message(&err).as_deref(),
            Some("Please fill in every required field.")
        );

        let template = Template {
            preferred_language: "th".to_owned(),
        };
        assert_eq!(
            template.user_message(&err).as_deref(),
            Some("กรุณากรอกข้อมูลที่จำเป็นให้ครบถ้วน")
        );

        let err = bambooflow_shared::Error::User("Quantity must be a whole number".to_owned());
        assert_eq!(
            template.user_message(&err).as_deref(),
            Some("Quantity must be a whole number")
        );
    }
}
