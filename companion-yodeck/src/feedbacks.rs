//! Screen playback feedback.

use crate::actions;
use crate::choices::ChoiceState;
use crate::models::PlaybackState;
use companion_host::{
    combine_rgb, with_choices, DropdownField, FeedbackDefinition, FeedbackValue, OptionValues,
};

pub const SCREEN_CURRENT_CONTENT: &str = "screen_current_content";

/// Supplies last-known playback snapshots per screen. Keeping the snapshots
/// fresh is the provider's concern; the feedback only reads them.
pub trait PlaybackStateProvider: Send + Sync {
    fn screen_playback_state(&self, screen_id: u64) -> Option<PlaybackState>;
}

/// The feedback definitions, built against the current choice lists.
pub fn feedback_definitions(state: &ChoiceState) -> Vec<FeedbackDefinition> {
    vec![FeedbackDefinition {
        id: SCREEN_CURRENT_CONTENT.to_string(),
        name: "Screen now playing content".to_string(),
        options: vec![
            DropdownField::new("screen_id", "Screen", with_choices(&state.screens)).into(),
        ],
    }]
}

/// Evaluate the screen-content feedback for an event.
pub fn evaluate(
    provider: Option<&dyn PlaybackStateProvider>,
    options: &OptionValues,
) -> FeedbackValue {
    let Some(screen_id) = actions::screen_id(options) else {
        return FeedbackValue::text("Select a screen");
    };
    let playback = provider.and_then(|provider| provider.screen_playback_state(screen_id));
    render_screen_content(playback.as_ref())
}

/// Render a playback snapshot; styling is applied only while a takeover is
/// active.
pub fn render_screen_content(playback: Option<&PlaybackState>) -> FeedbackValue {
    let Some(label) = playback.and_then(PlaybackState::active_label) else {
        return FeedbackValue::text("No playback data");
    };
    let takeover = playback.is_some_and(|state| state.takeover_active);
    let prefix = if takeover { "Takeover" } else { "Now playing" };

    FeedbackValue {
        text: Some(format!("{prefix}: {label}")),
        bgcolor: takeover.then(|| combine_rgb(255, 128, 0)),
        color: takeover.then(|| combine_rgb(0, 0, 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActiveContent;

    struct FixedProvider(Option<PlaybackState>);

    impl PlaybackStateProvider for FixedProvider {
        fn screen_playback_state(&self, _screen_id: u64) -> Option<PlaybackState> {
            self.0.clone()
        }
    }

    fn playing(name: Option<&str>, takeover: bool) -> PlaybackState {
        PlaybackState {
            active: Some(ActiveContent {
                source_name: name.map(str::to_string),
                source_type: Some("media".to_string()),
                source_id: Some(42),
            }),
            takeover_active: takeover,
        }
    }

    #[test]
    fn test_missing_screen_id() {
        let options = OptionValues::new();
        let value = evaluate(None, &options);
        assert_eq!(value.text.as_deref(), Some("Select a screen"));
    }

    #[test]
    fn test_no_snapshot_or_no_active_content() {
        assert_eq!(
            render_screen_content(None).text.as_deref(),
            Some("No playback data")
        );

        let idle = PlaybackState::default();
        assert_eq!(
            render_screen_content(Some(&idle)).text.as_deref(),
            Some("No playback data")
        );
    }

    #[test]
    fn test_takeover_styling() {
        let value = render_screen_content(Some(&playing(Some("Intro"), true)));
        assert_eq!(value.text.as_deref(), Some("Takeover: Intro"));
        assert_eq!(value.bgcolor, Some(combine_rgb(255, 128, 0)));
        assert_eq!(value.color, Some(combine_rgb(0, 0, 0)));
    }

    #[test]
    fn test_now_playing_without_styling() {
        let value = render_screen_content(Some(&playing(None, false)));
        assert_eq!(value.text.as_deref(), Some("Now playing: media 42"));
        assert!(value.bgcolor.is_none());
        assert!(value.color.is_none());
    }

    #[test]
    fn test_evaluate_through_provider() {
        let provider = FixedProvider(Some(playing(Some("Intro"), false)));
        let options = OptionValues::new().with("screen_id", 5i64);
        let value = evaluate(Some(&provider), &options);
        assert_eq!(value.text.as_deref(), Some("Now playing: Intro"));
    }
}
