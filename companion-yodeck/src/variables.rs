//! Per-screen display variables.

use crate::choices::ChoiceState;
use crate::feedbacks::PlaybackStateProvider;
use companion_host::{ChoiceId, VariableDefinition, VariableValue};

/// Variable id for a screen, with every character outside `[A-Za-z0-9_]`
/// squashed to an underscore.
pub fn screen_variable_id(screen_id: &ChoiceId) -> String {
    let normalized: String = screen_id
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("screen_{normalized}_current_content")
}

/// One variable definition per screen choice.
pub fn variable_definitions(state: &ChoiceState) -> Vec<VariableDefinition> {
    state
        .screens
        .iter()
        .map(|screen| {
            let label = if screen.label.is_empty() {
                format!("Screen {}", screen.id)
            } else {
                screen.label.clone()
            };
            VariableDefinition {
                variable_id: screen_variable_id(&screen.id),
                name: format!("{label} current content"),
            }
        })
        .collect()
}

/// Current values for the per-screen variables, read from the playback
/// provider; screens without data publish an empty value.
pub fn variable_values(
    state: &ChoiceState,
    provider: Option<&dyn PlaybackStateProvider>,
) -> Vec<VariableValue> {
    state
        .screens
        .iter()
        .map(|screen| {
            let value = screen
                .id
                .as_u64()
                .and_then(|id| provider.and_then(|provider| provider.screen_playback_state(id)))
                .and_then(|playback| playback.active_label())
                .unwrap_or_default();
            VariableValue {
                variable_id: screen_variable_id(&screen.id),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_host::Choice;

    #[test]
    fn test_screen_variable_id_sanitization() {
        assert_eq!(
            screen_variable_id(&ChoiceId::Num(10)),
            "screen_10_current_content"
        );
        assert_eq!(
            screen_variable_id(&ChoiceId::from("lobby-east.1")),
            "screen_lobby_east_1_current_content"
        );
    }

    #[test]
    fn test_variable_definitions_per_screen() {
        let state = ChoiceState {
            screens: vec![Choice::new(10u64, "Lobby"), Choice::new(11u64, "Bar")],
            ..ChoiceState::default()
        };
        let definitions = variable_definitions(&state);
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].variable_id, "screen_10_current_content");
        assert_eq!(definitions[0].name, "Lobby current content");
    }

    #[test]
    fn test_variable_values_without_provider_are_empty() {
        let state = ChoiceState {
            screens: vec![Choice::new(10u64, "Lobby")],
            ..ChoiceState::default()
        };
        let values = variable_values(&state, None);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, "");
    }
}
