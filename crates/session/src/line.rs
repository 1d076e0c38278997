use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineProfile {
    pub user_id: String,
    pub display_name: String,
    pub picture_url: String,
}

/// Values handed out by the simulated LINE login.
#[derive(Debug, Clone, Deserialize)]
pub struct LineSettings {
    pub display_name: String,
    pub picture_url: String,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            display_name: "LINE User".to_owned(),
            picture_url: "/static/img/line-avatar.svg".to_owned(),
        }
    }
}

/// Stands in for the LINE token exchange: the profile is derived from the
/// authorization code alone, no request leaves the process.
pub fn exchange_code(code: &str, settings: &LineSettings) -> LineProfile {
    let suffix = code
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    LineProfile {
        user_id: format!("U{suffix}"),
        display_name: settings.display_name.to_owned(),
        picture_url: settings.picture_url.to_owned(),
    }
}
