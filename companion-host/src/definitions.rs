//! Definition payloads a module publishes to its host.

use crate::options::InputField;
use serde::Serialize;

/// A user-invocable command with its option schema.
///
/// The async handler itself stays on the module side; the host dispatches
/// by id through [`crate::IntegrationModule::handle_action`].
#[derive(Debug, Clone, Serialize)]
pub struct ActionDefinition {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<InputField>,
}

/// A feedback with its option schema, evaluated through
/// [`crate::IntegrationModule::evaluate_feedback`].
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackDefinition {
    pub id: String,
    pub name: String,
    pub options: Vec<InputField>,
}

/// A display variable exposed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDefinition {
    pub variable_id: String,
    pub name: String,
}

/// Current value of one display variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableValue {
    pub variable_id: String,
    pub value: String,
}

/// Render result of an advanced feedback: text plus optional styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

impl FeedbackValue {
    /// Text-only feedback value with no styling.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Pack 8-bit RGB components into the color word the host expects.
pub const fn combine_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_rgb() {
        assert_eq!(combine_rgb(255, 128, 0), 0xFF8000);
        assert_eq!(combine_rgb(0, 0, 0), 0);
        assert_eq!(combine_rgb(255, 255, 255), 0xFFFFFF);
    }

    #[test]
    fn test_text_value_has_no_styling() {
        let value = FeedbackValue::text("No playback data");
        assert_eq!(value.text.as_deref(), Some("No playback data"));
        assert!(value.bgcolor.is_none());
        assert!(value.color.is_none());
    }
}
