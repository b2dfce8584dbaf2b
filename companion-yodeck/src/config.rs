//! Module configuration supplied by the host.

use companion_host::{InputField, TextField};
use serde::{Deserialize, Serialize};

/// Configuration surface of the module: the Yodeck API token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default, rename = "apiKey")]
    pub api_key: String,
}

impl ModuleConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Whether the configuration allows any network activity.
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Fields the host renders on the module's configuration page.
pub fn config_fields() -> Vec<InputField> {
    vec![TextField::new("apiKey", "API key").into()]
}
