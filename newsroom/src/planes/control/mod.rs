pub mod settings;

pub use settings::{
    EditableConfig, SECRET_KEY, SETTINGS_BUCKET, SUBMIT_MESSAGE, SecretKeyForm, SettingsError,
    SettingsService, SubmitResult,
};
