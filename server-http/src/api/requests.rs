use serde::Deserialize;

/// Body of the settings form submission
#[derive(Debug, Deserialize)]
pub struct SettingsFormRequest {
    #[serde(default)]
    pub secret_key: String,
}
