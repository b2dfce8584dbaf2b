//! Data models for Yodeck API requests and responses.
//!
//! Request payloads are explicit structs with optional members rather than
//! ad-hoc JSON maps, so every endpoint's wire shape is visible in one place.

use companion_host::Choice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content kinds a screen-targeting command can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Media,
    Playlist,
    Layout,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::Media, Self::Playlist, Self::Layout];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Playlist => "playlist",
            Self::Layout => "layout",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Media => "Media",
            Self::Playlist => "Playlist",
            Self::Layout => "Layout",
        }
    }

    /// Option field holding the selected id for this content type.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Media => "media_id",
            Self::Playlist => "playlist_id",
            Self::Layout => "layout_id",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "media" => Some(Self::Media),
            "playlist" => Some(Self::Playlist),
            "layout" => Some(Self::Layout),
            _ => None,
        }
    }
}

/// A resolved content choice: which kind plus its numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSelection {
    pub content_type: ContentType,
    pub id: u64,
}

/// Workspace reference embedded in listing entries and screen details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl WorkspaceRef {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Workspace {}", self.id),
        }
    }
}

/// Minimal shape shared by every listing entry (screens, media, playlists,
/// layouts, workspaces).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceSummary {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,
}

impl ResourceSummary {
    /// Dropdown entry for this resource, with a `"<Kind> <id>"` fallback
    /// label when the service returned no name.
    pub fn choice(&self, kind: &str) -> Choice {
        let label = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{kind} {}", self.id),
        };
        Choice::new(self.id, label)
    }
}

/// Screen detail returned by `GET screens/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenDetail {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,
}

/// Takeover content sent with `PUT screens/{id}/takeover`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeoverContent {
    pub source_id: u64,
    pub source_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Full takeover request body; `takeover_content: None` serializes as JSON
/// `null`, which clears an active takeover.
#[derive(Debug, Clone, Serialize)]
pub struct TakeoverRequest {
    pub takeover_content: Option<TakeoverContent>,
}

/// Content block of a screen PATCH.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenContent {
    pub source_type: String,
    pub source_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

/// Workspace block echoed back on screen PATCHes; the name is always
/// present, defaulting to an empty string.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceEcho {
    pub id: u64,
    pub name: String,
}

impl From<&WorkspaceRef> for WorkspaceEcho {
    fn from(workspace: &WorkspaceRef) -> Self {
        Self {
            id: workspace.id,
            name: workspace.name.clone().unwrap_or_default(),
        }
    }
}

/// Body of `PATCH screens/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenPatch {
    pub screen_content: ScreenContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceEcho>,
}

/// Media kinds supported by create-media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Webpage,
    Image,
    Video,
    Audio,
    Document,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        Self::Webpage,
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Document,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Webpage => "webpage",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Webpage => "Web Page",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Document => "Document",
        }
    }

    /// Parse an option value, defaulting to webpage for anything unknown.
    pub fn from_option(value: &str) -> Self {
        match value {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "document" => Self::Document,
            _ => Self::Webpage,
        }
    }

    /// How the source URL is handed to Yodeck for this kind.
    ///
    /// Images and documents are always downloaded; video and audio can be
    /// streamed in place when requested; web pages are always played from
    /// the URL.
    pub fn arguments(self, url: &str, stream_from_url: bool) -> MediaArguments {
        match self {
            Self::Image | Self::Document => MediaArguments::download(url),
            Self::Video | Self::Audio => {
                if stream_from_url {
                    MediaArguments::play(url)
                } else {
                    MediaArguments::download(url)
                }
            }
            Self::Webpage => MediaArguments::play(url),
        }
    }
}

/// Source arguments of a created media item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaArguments {
    Download { download_from_url: String },
    Play { play_from_url: String },
}

impl MediaArguments {
    pub fn download(url: impl Into<String>) -> Self {
        Self::Download {
            download_from_url: url.into(),
        }
    }

    pub fn play(url: impl Into<String>) -> Self {
        Self::Play {
            play_from_url: url.into(),
        }
    }
}

/// Origin block of a created media item.
#[derive(Debug, Clone, Serialize)]
pub struct MediaOrigin {
    #[serde(rename = "type")]
    pub kind: String,
    pub source: &'static str,
}

impl MediaOrigin {
    pub fn from_url(media_type: MediaType) -> Self {
        Self {
            kind: media_type.as_str().to_string(),
            source: "url",
        }
    }
}

/// Body of `POST media`.
#[derive(Debug, Clone, Serialize)]
pub struct MediaCreate {
    pub name: String,
    pub media_origin: MediaOrigin,
    pub arguments: MediaArguments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<u64>,
}

/// Last-known playback snapshot for a screen, supplied by an external
/// provider; the integration only consumes it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub active: Option<ActiveContent>,
    #[serde(default)]
    pub takeover_active: bool,
}

impl PlaybackState {
    /// Display label of the active content, if any content is active.
    pub fn active_label(&self) -> Option<String> {
        self.active.as_ref().map(ActiveContent::display_label)
    }
}

/// Currently playing content inside a playback snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveContent {
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub source_id: Option<u64>,
}

impl ActiveContent {
    /// Prefer the explicit source name, falling back to
    /// `"<source_type> <source_id>"` with whatever is known.
    pub fn display_label(&self) -> String {
        match self.source_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let kind = self.source_type.as_deref().unwrap_or("content");
                let id = self
                    .source_id
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                format!("{kind} {id}").trim().to_string()
            }
        }
    }
}

/// Normalize a listing response: accept either a bare list or an envelope
/// with a `results` list; anything else yields an empty list.
pub fn extract_results(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Parse listing entries, skipping anything without a usable id.
pub fn parse_summaries(values: Vec<Value>) -> Vec<ResourceSummary> {
    values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_results_shapes() {
        let bare = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(extract_results(bare).len(), 2);

        let envelope = json!({"results": [{"id": 1}], "count": 1});
        assert_eq!(extract_results(envelope).len(), 1);

        assert!(extract_results(json!({"items": [1]})).is_empty());
        assert!(extract_results(json!("nope")).is_empty());
        assert!(extract_results(json!(null)).is_empty());
    }

    #[test]
    fn test_parse_summaries_skips_bad_entries() {
        let values = extract_results(json!([
            {"id": 10, "name": "Lobby"},
            {"name": "no id"},
            {"id": 11}
        ]));
        let summaries = parse_summaries(values);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name.as_deref(), Some("Lobby"));
        assert_eq!(summaries[1].id, 11);
    }

    #[test]
    fn test_choice_label_fallback() {
        let unnamed = ResourceSummary {
            id: 11,
            name: None,
            workspace: None,
        };
        assert_eq!(unnamed.choice("Screen").label, "Screen 11");

        let named = ResourceSummary {
            id: 10,
            name: Some("Lobby".to_string()),
            workspace: None,
        };
        assert_eq!(named.choice("Screen").label, "Lobby");
    }

    #[test]
    fn test_takeover_serialization() {
        let with_duration = TakeoverRequest {
            takeover_content: Some(TakeoverContent {
                source_id: 42,
                source_type: "media",
                duration: Some(10),
            }),
        };
        assert_eq!(
            serde_json::to_value(&with_duration).unwrap(),
            json!({"takeover_content": {"source_id": 42, "source_type": "media", "duration": 10}})
        );

        let without_duration = TakeoverRequest {
            takeover_content: Some(TakeoverContent {
                source_id: 42,
                source_type: "media",
                duration: None,
            }),
        };
        assert_eq!(
            serde_json::to_value(&without_duration).unwrap(),
            json!({"takeover_content": {"source_id": 42, "source_type": "media"}})
        );

        let clear = TakeoverRequest {
            takeover_content: None,
        };
        assert_eq!(
            serde_json::to_value(&clear).unwrap(),
            json!({"takeover_content": null})
        );
    }

    #[test]
    fn test_media_arguments_matrix() {
        assert_eq!(
            MediaType::Video.arguments("http://x", true),
            MediaArguments::play("http://x")
        );
        assert_eq!(
            MediaType::Video.arguments("http://x", false),
            MediaArguments::download("http://x")
        );
        assert_eq!(
            MediaType::Image.arguments("http://x", true),
            MediaArguments::download("http://x")
        );
        assert_eq!(
            MediaType::Webpage.arguments("http://x", false),
            MediaArguments::play("http://x")
        );
    }

    #[test]
    fn test_media_type_defaults_to_webpage() {
        assert_eq!(MediaType::from_option("video"), MediaType::Video);
        assert_eq!(MediaType::from_option(""), MediaType::Webpage);
        assert_eq!(MediaType::from_option("banner"), MediaType::Webpage);
    }

    #[test]
    fn test_media_create_serialization() {
        let media = MediaCreate {
            name: "Clip".to_string(),
            media_origin: MediaOrigin::from_url(MediaType::Video),
            arguments: MediaArguments::play("http://x"),
            workspace: Some(7),
        };
        assert_eq!(
            serde_json::to_value(&media).unwrap(),
            json!({
                "name": "Clip",
                "media_origin": {"type": "video", "source": "url"},
                "arguments": {"play_from_url": "http://x"},
                "workspace": 7
            })
        );
    }

    #[test]
    fn test_active_content_label() {
        let named = ActiveContent {
            source_name: Some("Intro".to_string()),
            source_type: Some("media".to_string()),
            source_id: Some(42),
        };
        assert_eq!(named.display_label(), "Intro");

        let unnamed = ActiveContent {
            source_name: None,
            source_type: Some("media".to_string()),
            source_id: Some(42),
        };
        assert_eq!(unnamed.display_label(), "media 42");

        let bare = ActiveContent::default();
        assert_eq!(bare.display_label(), "content");
    }
}
