//! UI option schema types shared between integration modules and the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a dropdown choice.
///
/// Remote services usually key entities by numeric id, but sentinel entries
/// (placeholders, "account default") use an empty string, so both
/// representations are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceId {
    Num(u64),
    Str(String),
}

impl ChoiceId {
    /// The sentinel id used by placeholder entries.
    pub fn empty() -> Self {
        Self::Str(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }

    /// Numeric value of the id, if it has one.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ChoiceId {
    fn from(value: u64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for ChoiceId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ChoiceId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A display entry backing one dropdown option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub label: String,
}

impl Choice {
    pub fn new(id: impl Into<ChoiceId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Choices for a dropdown, substituting a placeholder when the backing list
/// is empty so the host UI never renders an empty choice set.
pub fn with_choices(choices: &[Choice]) -> Vec<Choice> {
    if choices.is_empty() {
        vec![Choice::new(ChoiceId::empty(), "No items available")]
    } else {
        choices.to_vec()
    }
}

/// Declarative visibility rule for an option field.
///
/// Mirrors the host UI behaviour of hiding fields that do not apply to the
/// current value of another field. Purely cosmetic: handlers must validate
/// their inputs regardless of what was visible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleWhen {
    pub field: String,
    pub equals: String,
}

/// Dropdown option field.
#[derive(Debug, Clone, Serialize)]
pub struct DropdownField {
    pub id: String,
    pub label: String,
    pub choices: Vec<Choice>,
    pub default: ChoiceId,
    pub allow_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
}

impl DropdownField {
    /// New dropdown defaulting to the first choice (or the empty sentinel).
    pub fn new(id: impl Into<String>, label: impl Into<String>, choices: Vec<Choice>) -> Self {
        let default = choices
            .first()
            .map(|choice| choice.id.clone())
            .unwrap_or_else(ChoiceId::empty);
        Self {
            id: id.into(),
            label: label.into(),
            choices,
            default,
            allow_custom: false,
            tooltip: None,
            visible_when: None,
        }
    }

    pub fn default_id(mut self, id: impl Into<ChoiceId>) -> Self {
        self.default = id.into();
        self
    }

    pub fn allow_custom(mut self) -> Self {
        self.allow_custom = true;
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn visible_when(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.visible_when = Some(VisibleWhen {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }
}

/// Free-text option field.
#[derive(Debug, Clone, Serialize)]
pub struct TextField {
    pub id: String,
    pub label: String,
    pub default: String,
}

impl TextField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default: String::new(),
        }
    }
}

/// Numeric option field with bounds.
#[derive(Debug, Clone, Serialize)]
pub struct NumberField {
    pub id: String,
    pub label: String,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

impl NumberField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default: min,
            min,
            max,
        }
    }
}

/// Checkbox option field.
#[derive(Debug, Clone, Serialize)]
pub struct CheckboxField {
    pub id: String,
    pub label: String,
    pub default: bool,
}

impl CheckboxField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default: false,
        }
    }
}

/// One option field of an action, feedback, or configuration schema.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputField {
    Dropdown(DropdownField),
    TextInput(TextField),
    Number(NumberField),
    Checkbox(CheckboxField),
}

impl From<DropdownField> for InputField {
    fn from(field: DropdownField) -> Self {
        Self::Dropdown(field)
    }
}

impl From<TextField> for InputField {
    fn from(field: TextField) -> Self {
        Self::TextInput(field)
    }
}

impl From<NumberField> for InputField {
    fn from(field: NumberField) -> Self {
        Self::Number(field)
    }
}

impl From<CheckboxField> for InputField {
    fn from(field: CheckboxField) -> Self {
        Self::Checkbox(field)
    }
}

/// Option values delivered with an action or feedback event.
///
/// Values arrive from the host UI loosely typed; the accessors apply the
/// same coercion rules the UI does (empty strings mean "unset", numeric
/// strings parse as numbers).
#[derive(Debug, Clone, Default)]
pub struct OptionValues(HashMap<String, Value>);

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric reading of one value: `None` for null, empty, or
    /// non-numeric input.
    pub fn coerce_number(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse().ok()
                }
            }
            _ => None,
        }
    }

    /// Numeric reading of an option: `None` when missing, null, empty, or
    /// not a number.
    pub fn number(&self, key: &str) -> Option<i64> {
        Self::coerce_number(self.0.get(key)?)
    }

    /// Text reading of an option; missing or non-text values yield an empty
    /// string.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Boolean reading of an option; anything but `true` is `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_coercion() {
        let options = OptionValues::new()
            .with("int", 42i64)
            .with("float", 3.7)
            .with("string", "17")
            .with("empty", "")
            .with("spaces", "  ")
            .with("junk", "abc")
            .with("flag", true);

        assert_eq!(options.number("int"), Some(42));
        assert_eq!(options.number("float"), Some(3));
        assert_eq!(options.number("string"), Some(17));
        assert_eq!(options.number("empty"), None);
        assert_eq!(options.number("spaces"), None);
        assert_eq!(options.number("junk"), None);
        assert_eq!(options.number("flag"), None);
        assert_eq!(options.number("missing"), None);
    }

    #[test]
    fn test_text_and_flag() {
        let options = OptionValues::new()
            .with("name", "Lobby")
            .with("count", 3i64)
            .with("stream", true);

        assert_eq!(options.text("name"), "Lobby");
        assert_eq!(options.text("count"), "3");
        assert_eq!(options.text("missing"), "");
        assert!(options.flag("stream"));
        assert!(!options.flag("missing"));
    }

    #[test]
    fn test_with_choices_placeholder() {
        let filled = vec![Choice::new(1u64, "One")];
        assert_eq!(with_choices(&filled), filled);

        let placeholder = with_choices(&[]);
        assert_eq!(placeholder.len(), 1);
        assert!(placeholder[0].id.is_empty());
        assert_eq!(placeholder[0].label, "No items available");
    }

    #[test]
    fn test_choice_id_serde() {
        let numeric: ChoiceId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(numeric, ChoiceId::Num(7));
        let text: ChoiceId = serde_json::from_value(json!("")).unwrap();
        assert!(text.is_empty());

        assert_eq!(serde_json::to_value(ChoiceId::Num(7)).unwrap(), json!(7));
    }

    #[test]
    fn test_dropdown_defaults_to_first_choice() {
        let field = DropdownField::new(
            "screen_id",
            "Screen",
            vec![Choice::new(10u64, "Lobby"), Choice::new(11u64, "Bar")],
        );
        assert_eq!(field.default, ChoiceId::Num(10));

        let empty = DropdownField::new("screen_id", "Screen", Vec::new());
        assert!(empty.default.is_empty());
    }
}
