//! Action definitions and the payload builders behind them.
//!
//! Dropdowns are sourced from the current choice lists, so the definitions
//! are republished after every refresh. Visibility rules on the
//! content-type-dependent dropdowns are a UI concern only; the handlers in
//! the module validate their inputs independently.

use crate::choices::ChoiceState;
use crate::models::{ContentSelection, ContentType, MediaType, TakeoverContent};
use companion_host::{
    with_choices, ActionDefinition, CheckboxField, Choice, ChoiceId, DropdownField, InputField,
    NumberField, OptionValues, TextField,
};

pub const START_TAKEOVER: &str = "push_to_player";
pub const SET_SCHEDULE: &str = "set_schedule_on_screen";
pub const SET_DEFAULT_CONTENT: &str = "set_default_content";
pub const STOP_TAKEOVER: &str = "stop_takeover";
pub const CREATE_MEDIA: &str = "load_media";

/// Takeover durations below this many minutes are sent without a bound.
pub const MIN_TAKEOVER_MINUTES: i64 = 5;

/// Pick the default content type from whichever list has entries.
pub fn infer_default_content_type(state: &ChoiceState) -> ContentType {
    if !state.media.is_empty() {
        ContentType::Media
    } else if !state.playlists.is_empty() {
        ContentType::Playlist
    } else if !state.layouts.is_empty() {
        ContentType::Layout
    } else {
        ContentType::Media
    }
}

/// Numeric screen id from the options, or `None` when unset or invalid.
pub fn screen_id(options: &OptionValues) -> Option<u64> {
    options
        .number("screen_id")
        .and_then(|id| u64::try_from(id).ok())
}

/// Resolve the chosen content type plus its matching id option.
pub fn extract_content_selection(options: &OptionValues) -> Option<ContentSelection> {
    let content_type = ContentType::parse(&options.text("content_type"))?;
    let id = options
        .number(content_type.id_field())
        .and_then(|id| u64::try_from(id).ok())?;
    Some(ContentSelection { content_type, id })
}

/// Build the takeover body; the duration bound is only carried when the
/// requested minutes reach the minimum Yodeck accepts.
pub fn build_takeover_content(
    selection: ContentSelection,
    duration_minutes: Option<i64>,
) -> TakeoverContent {
    TakeoverContent {
        source_id: selection.id,
        source_type: selection.content_type.as_str(),
        duration: duration_minutes.filter(|minutes| *minutes >= MIN_TAKEOVER_MINUTES),
    }
}

/// Resolved display label for a selection, from the current choice lists.
pub fn lookup_selection_label(state: &ChoiceState, source_type: &str, id: u64) -> Option<String> {
    let list = match source_type {
        "media" => &state.media,
        "playlist" => &state.playlists,
        "layout" => &state.layouts,
        "schedule" => &state.schedules,
        _ => return None,
    };
    list.iter()
        .find(|choice| choice.id.as_u64() == Some(id))
        .map(|choice| choice.label.clone())
}

fn content_type_choices() -> Vec<Choice> {
    ContentType::ALL
        .iter()
        .map(|content_type| Choice::new(content_type.as_str(), content_type.label()))
        .collect()
}

fn media_type_choices() -> Vec<Choice> {
    MediaType::ALL
        .iter()
        .map(|media_type| Choice::new(media_type.as_str(), media_type.label()))
        .collect()
}

fn screen_dropdown(state: &ChoiceState) -> InputField {
    DropdownField::new("screen_id", "Screen", with_choices(&state.screens)).into()
}

fn content_type_dropdown(default: ContentType, tooltip: Option<&str>) -> InputField {
    let mut field = DropdownField::new("content_type", "Content type", content_type_choices())
        .default_id(default.as_str());
    if let Some(tooltip) = tooltip {
        field = field.tooltip(tooltip);
    }
    field.into()
}

/// The media/playlist/layout id dropdowns, each only visible while its
/// content type is selected.
fn content_id_dropdowns(state: &ChoiceState) -> [InputField; 3] {
    [
        DropdownField::new("media_id", "Media", with_choices(&state.media))
            .visible_when("content_type", ContentType::Media.as_str())
            .into(),
        DropdownField::new("playlist_id", "Playlist", with_choices(&state.playlists))
            .visible_when("content_type", ContentType::Playlist.as_str())
            .into(),
        DropdownField::new("layout_id", "Layout", with_choices(&state.layouts))
            .visible_when("content_type", ContentType::Layout.as_str())
            .into(),
    ]
}

/// All five action definitions, built against the current choice lists.
pub fn action_definitions(state: &ChoiceState) -> Vec<ActionDefinition> {
    let default_content_type = infer_default_content_type(state);

    let mut start_takeover_options = vec![
        screen_dropdown(state),
        content_type_dropdown(
            default_content_type,
            Some("Choose whether you want to push a media item, playlist, or layout."),
        ),
    ];
    start_takeover_options.extend(content_id_dropdowns(state));
    start_takeover_options.push(
        NumberField::new("duration", "Take over time (minutes, optional)", 0, 1440).into(),
    );

    let mut default_content_options =
        vec![screen_dropdown(state), content_type_dropdown(default_content_type, None)];
    default_content_options.extend(content_id_dropdowns(state));

    let workspace_default = state
        .selected_workspace
        .map(ChoiceId::Num)
        .or_else(|| state.workspaces.first().map(|choice| choice.id.clone()))
        .unwrap_or_else(ChoiceId::empty);

    vec![
        ActionDefinition {
            id: START_TAKEOVER.to_string(),
            name: "Take over screen with content".to_string(),
            description: Some(
                "Start a takeover on the selected screen with media, a playlist, or a layout."
                    .to_string(),
            ),
            options: start_takeover_options,
        },
        ActionDefinition {
            id: SET_SCHEDULE.to_string(),
            name: "Set schedule on screen".to_string(),
            description: Some(
                "Assigns a schedule to the selected screen so it follows that calendar."
                    .to_string(),
            ),
            options: vec![
                screen_dropdown(state),
                DropdownField::new("schedule_id", "Schedule", with_choices(&state.schedules))
                    .into(),
            ],
        },
        ActionDefinition {
            id: SET_DEFAULT_CONTENT.to_string(),
            name: "Set default content on screen".to_string(),
            description: Some(
                "Updates the screen's default media/playlist/layout so it shows when no schedule runs."
                    .to_string(),
            ),
            options: default_content_options,
        },
        ActionDefinition {
            id: STOP_TAKEOVER.to_string(),
            name: "Stop takeover on screen".to_string(),
            description: Some(
                "Clears the active takeover so the screen resumes its scheduled/default content."
                    .to_string(),
            ),
            options: vec![screen_dropdown(state)],
        },
        ActionDefinition {
            id: CREATE_MEDIA.to_string(),
            name: "Create media from URL".to_string(),
            description: None,
            options: vec![
                TextField::new("name", "Media name").into(),
                TextField::new("url", "Source URL").into(),
                DropdownField::new("media_type", "Media type", media_type_choices())
                    .default_id(MediaType::Webpage.as_str())
                    .into(),
                DropdownField::new("workspace_id", "Workspace", with_choices(&state.workspaces))
                    .default_id(workspace_default)
                    .allow_custom()
                    .into(),
                CheckboxField::new("stream_from_url", "Treat URL as stream (video/audio only)")
                    .into(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_media() -> ChoiceState {
        ChoiceState {
            media: vec![Choice::new(42u64, "Intro")],
            ..ChoiceState::default()
        }
    }

    #[test]
    fn test_extract_content_selection() {
        let options = OptionValues::new()
            .with("content_type", "media")
            .with("media_id", 42i64)
            .with("playlist_id", 7i64);
        let selection = extract_content_selection(&options).unwrap();
        assert_eq!(selection.content_type, ContentType::Media);
        assert_eq!(selection.id, 42);

        // Unknown content type
        let options = OptionValues::new()
            .with("content_type", "banner")
            .with("media_id", 42i64);
        assert!(extract_content_selection(&options).is_none());

        // Missing id for the chosen type
        let options = OptionValues::new()
            .with("content_type", "layout")
            .with("media_id", 42i64);
        assert!(extract_content_selection(&options).is_none());
    }

    #[test]
    fn test_takeover_duration_threshold() {
        let selection = ContentSelection {
            content_type: ContentType::Media,
            id: 42,
        };

        let long = build_takeover_content(selection, Some(10));
        assert_eq!(long.duration, Some(10));

        let minimum = build_takeover_content(selection, Some(5));
        assert_eq!(minimum.duration, Some(5));

        let short = build_takeover_content(selection, Some(2));
        assert_eq!(short.duration, None);

        let unset = build_takeover_content(selection, None);
        assert_eq!(unset.duration, None);
    }

    #[test]
    fn test_infer_default_content_type() {
        assert_eq!(
            infer_default_content_type(&ChoiceState::default()),
            ContentType::Media
        );
        assert_eq!(
            infer_default_content_type(&state_with_media()),
            ContentType::Media
        );

        let playlists_only = ChoiceState {
            playlists: vec![Choice::new(7u64, "Loop")],
            ..ChoiceState::default()
        };
        assert_eq!(
            infer_default_content_type(&playlists_only),
            ContentType::Playlist
        );
    }

    #[test]
    fn test_lookup_selection_label() {
        let state = state_with_media();
        assert_eq!(
            lookup_selection_label(&state, "media", 42).as_deref(),
            Some("Intro")
        );
        assert!(lookup_selection_label(&state, "media", 99).is_none());
        assert!(lookup_selection_label(&state, "schedule", 42).is_none());
        assert!(lookup_selection_label(&state, "banner", 42).is_none());
    }

    #[test]
    fn test_action_definitions_cover_all_commands() {
        let definitions = action_definitions(&ChoiceState::default());
        let ids: Vec<&str> = definitions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                START_TAKEOVER,
                SET_SCHEDULE,
                SET_DEFAULT_CONTENT,
                STOP_TAKEOVER,
                CREATE_MEDIA
            ]
        );
    }
}
