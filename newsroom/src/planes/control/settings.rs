use crate::ports::ConfigStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub const SETTINGS_BUCKET: &str = "news_api.settings";
pub const SECRET_KEY: &str = "secret_key";
const SECRET_KEY_LABEL: &str = "Secret Key";
pub const SUBMIT_MESSAGE: &str = "Thanks! For Submitting The Form.";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{label} field is required.")]
    Required {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} must not contain control characters.")]
    ControlCharacters {
        field: &'static str,
        label: &'static str,
    },

    #[error("Storage error: {0}")]
    Store(#[from] shared::Error),
}

/// Pending writes to one config bucket; nothing is stored until `save`
pub struct EditableConfig<'a> {
    store: &'a dyn ConfigStore,
    bucket: String,
    pending: Vec<(String, String)>,
}

impl<'a> EditableConfig<'a> {
    pub fn new(store: &'a dyn ConfigStore, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            pending: Vec::new(),
        }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.pending.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.pending.push((key, value)),
        }
        self
    }

    pub async fn save(self) -> shared::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        self.store.save(&self.bucket, &self.pending).await
    }
}

/// Default values for the settings form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKeyForm {
    pub secret_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitResult {
    pub message: String,
}

/// Settings behind the admin form: a single shared secret handed to API consumers
pub struct SettingsService {
    store: Arc<dyn ConfigStore>,
}

impl SettingsError {
    /// Form field a validation error refers to
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SettingsError::Required { field, .. }
            | SettingsError::ControlCharacters { field, .. } => Some(field),
            SettingsError::Store(_) => None,
        }
    }
}

impl SettingsService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    pub fn editable(&self, bucket: &str) -> EditableConfig<'_> {
        EditableConfig::new(self.store.as_ref(), bucket)
    }

    /// The configured secret key, empty until the form was first submitted
    pub async fn secret_key(&self) -> shared::Result<String> {
        Ok(self
            .store
            .get(SETTINGS_BUCKET, SECRET_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn form(&self) -> shared::Result<SecretKeyForm> {
        Ok(SecretKeyForm {
            secret_key: self.secret_key().await?,
        })
    }

    /// Validate and store a new secret key. The value is stored as entered;
    /// it is sent back verbatim as a response header, so control characters
    /// are refused.
    pub async fn submit(&self, secret_key: &str) -> Result<SubmitResult, SettingsError> {
        if secret_key.trim().is_empty() {
            return Err(SettingsError::Required {
                field: SECRET_KEY,
                label: SECRET_KEY_LABEL,
            });
        }
        if secret_key.chars().any(char::is_control) {
            return Err(SettingsError::ControlCharacters {
                field: SECRET_KEY,
                label: SECRET_KEY_LABEL,
            });
        }

        self.editable(SETTINGS_BUCKET)
            .set(SECRET_KEY, secret_key)
            .save()
            .await?;

        info!("Secret key updated in {}", SETTINGS_BUCKET);

        Ok(SubmitResult {
            message: SUBMIT_MESSAGE.to_string(),
        })
    }
}
