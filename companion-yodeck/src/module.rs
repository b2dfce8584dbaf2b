//! The Yodeck integration module: lifecycle, refresh orchestration, and
//! command dispatch.
//!
//! Validation failures are local and warn-logged; network failures are
//! caught at the command boundary and error-logged. Neither is ever
//! propagated back to the host, and nothing is retried or rolled back.

use crate::actions;
use crate::choices::{self, ChoiceState};
use crate::client::{YodeckClient, DEFAULT_API_BASE};
use crate::config::{self, ModuleConfig};
use crate::error::Result;
use crate::feedbacks::{self, PlaybackStateProvider};
use crate::models::{
    MediaCreate, MediaOrigin, MediaType, ScreenContent, ScreenPatch, WorkspaceEcho,
};
use crate::variables;
use async_trait::async_trait;
use companion_host::{
    FeedbackValue, HostHandle, InputField, InstanceStatus, IntegrationModule, OptionValues,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

#[derive(Default)]
struct Inner {
    config: ModuleConfig,
    client: Option<YodeckClient>,
    state: ChoiceState,
}

/// The Yodeck module instance.
///
/// Choice lists and the selected workspace live behind a lock that is never
/// held across a network await: a refresh builds a fresh state and swaps it
/// in, and command handlers work on snapshots.
pub struct YodeckModule {
    host: Arc<dyn HostHandle>,
    playback: Option<Arc<dyn PlaybackStateProvider>>,
    api_base: String,
    inner: RwLock<Inner>,
}

impl YodeckModule {
    pub fn new(host: Arc<dyn HostHandle>) -> Self {
        Self::with_api_base(host, DEFAULT_API_BASE)
    }

    /// Point the module at a different API base (tests, staging).
    pub fn with_api_base(host: Arc<dyn HostHandle>, api_base: impl Into<String>) -> Self {
        Self {
            host,
            playback: None,
            api_base: api_base.into(),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Attach the collaborator that supplies per-screen playback snapshots.
    pub fn playback_provider(mut self, provider: Arc<dyn PlaybackStateProvider>) -> Self {
        self.playback = Some(provider);
        self
    }

    /// Snapshot of the current choice lists and workspace selection.
    pub async fn choice_state(&self) -> ChoiceState {
        self.inner.read().await.state.clone()
    }

    async fn apply_config(&self, config: ModuleConfig) {
        let client = if config.is_complete() {
            match YodeckClient::builder()
                .api_base(&self.api_base)
                .api_key(&config.api_key)
                .build()
            {
                Ok(client) => Some(client),
                Err(e) => {
                    error!("Failed to build API client: {e}");
                    None
                }
            }
        } else {
            None
        };

        let mut inner = self.inner.write().await;
        inner.config = config;
        inner.client = client;
    }

    /// Rebuild the choice lists and republish every definition.
    ///
    /// Without a usable configuration this only reports bad-config; with
    /// one, definitions are republished whether or not the refresh
    /// succeeded, so dropdowns always reflect the latest known lists.
    pub async fn update_variables(&self) {
        let (client, previous_selection) = {
            let inner = self.inner.read().await;
            (inner.client.clone(), inner.state.selected_workspace)
        };

        let Some(client) = client else {
            self.host.update_status(InstanceStatus::BadConfig);
            return;
        };

        let mut state = ChoiceState {
            selected_workspace: previous_selection,
            ..ChoiceState::default()
        };
        let status = choices::refresh(&client, &mut state).await;

        {
            let mut inner = self.inner.write().await;
            inner.state = state;
        }
        self.host.update_status(status);
        self.republish().await;
    }

    async fn republish(&self) {
        let state = self.choice_state().await;
        self.host
            .set_action_definitions(actions::action_definitions(&state));
        self.host
            .set_feedback_definitions(feedbacks::feedback_definitions(&state));
        self.host
            .set_variable_definitions(variables::variable_definitions(&state));
        self.host
            .set_variable_values(variables::variable_values(&state, self.playback.as_deref()));
    }

    async fn client(&self) -> Option<YodeckClient> {
        self.inner.read().await.client.clone()
    }

    async fn start_takeover(&self, options: &OptionValues) {
        let screen = actions::screen_id(options);
        let selection = actions::extract_content_selection(options);
        let (Some(screen), Some(selection)) = (screen, selection) else {
            warn!("Select a screen and valid content before starting a takeover");
            return;
        };
        let Some(client) = self.client().await else {
            warn!("API key is not configured");
            return;
        };

        let content = actions::build_takeover_content(selection, options.number("duration"));
        let result: Result<()> = async {
            client.set_takeover(screen, Some(content)).await?;
            client.push_screen(screen).await
        }
        .await;

        match result {
            Ok(()) => info!(
                "Started takeover with {} {} on screen {screen}",
                selection.content_type.as_str(),
                selection.id
            ),
            Err(e) => error!("Failed to push to screen: {e}"),
        }
    }

    async fn set_schedule(&self, options: &OptionValues) {
        let screen = actions::screen_id(options);
        let schedule = options
            .number("schedule_id")
            .and_then(|id| u64::try_from(id).ok());
        let (Some(screen), Some(schedule)) = (screen, schedule) else {
            warn!("Select a screen and schedule before updating the screen schedule");
            return;
        };
        let Some(client) = self.client().await else {
            warn!("API key is not configured");
            return;
        };
        let state = self.choice_state().await;

        let result: Result<()> = async {
            let detail = client.screen_detail(screen).await?;
            let patch = ScreenPatch {
                screen_content: ScreenContent {
                    source_type: "schedule".to_string(),
                    source_id: schedule,
                    source_name: actions::lookup_selection_label(&state, "schedule", schedule),
                },
                workspace: detail.workspace.as_ref().map(WorkspaceEcho::from),
            };
            client.patch_screen(screen, &patch).await?;
            client.push_screen(screen).await
        }
        .await;

        match result {
            Ok(()) => info!("Assigned schedule {schedule} to screen {screen}"),
            Err(e) => error!("Failed to assign schedule to screen: {e}"),
        }
    }

    async fn set_default_content(&self, options: &OptionValues) {
        let screen = actions::screen_id(options);
        let selection = actions::extract_content_selection(options);
        let (Some(screen), Some(selection)) = (screen, selection) else {
            warn!("Select a screen and valid content before updating default content");
            return;
        };
        let Some(client) = self.client().await else {
            warn!("API key is not configured");
            return;
        };
        let state = self.choice_state().await;

        let result: Result<()> = async {
            let detail = client.screen_detail(screen).await?;
            let patch = ScreenPatch {
                screen_content: ScreenContent {
                    source_type: selection.content_type.as_str().to_string(),
                    source_id: selection.id,
                    source_name: actions::lookup_selection_label(
                        &state,
                        selection.content_type.as_str(),
                        selection.id,
                    ),
                },
                workspace: detail.workspace.as_ref().map(WorkspaceEcho::from),
            };
            client.patch_screen(screen, &patch).await?;
            client.push_screen(screen).await
        }
        .await;

        match result {
            Ok(()) => info!(
                "Updated default content to {} {} on screen {screen}",
                selection.content_type.as_str(),
                selection.id
            ),
            Err(e) => error!("Failed to update default content: {e}"),
        }
    }

    async fn stop_takeover(&self, options: &OptionValues) {
        let Some(screen) = actions::screen_id(options) else {
            warn!("Select a screen before stopping a takeover");
            return;
        };
        let Some(client) = self.client().await else {
            warn!("API key is not configured");
            return;
        };

        // Clearing a takeover deliberately skips the push: the screen falls
        // back to its scheduled/default content on its own.
        match client.set_takeover(screen, None).await {
            Ok(()) => info!("Cleared takeover on screen {screen}"),
            Err(e) => error!("Failed to stop takeover: {e}"),
        }
    }

    async fn create_media(&self, options: &OptionValues) {
        let name = options.text("name").trim().to_string();
        let url = options.text("url").trim().to_string();
        let media_type = MediaType::from_option(&options.text("media_type"));
        let stream_from_url = options.flag("stream_from_url");

        if name.is_empty() || url.is_empty() {
            warn!("Name and URL are required to create media");
            return;
        }
        let Some(client) = self.client().await else {
            warn!("API key is not configured");
            return;
        };
        let state = self.choice_state().await;

        // An absent option falls back to the selected workspace; an option
        // that is present but unparsable does not.
        let workspace = match options.get("workspace_id") {
            None | Some(Value::Null) => state.selected_workspace,
            Some(value) => OptionValues::coerce_number(value).and_then(|id| u64::try_from(id).ok()),
        };
        let sentinel_only = state
            .workspaces
            .first()
            .is_none_or(|choice| choice.id.is_empty());
        if workspace.is_none() && !state.workspaces.is_empty() && !sentinel_only {
            warn!("Select a workspace before creating media");
            return;
        }

        let media = MediaCreate {
            name: name.clone(),
            media_origin: MediaOrigin::from_url(media_type),
            arguments: media_type.arguments(&url, stream_from_url),
            workspace,
        };

        match client.create_media(&media).await {
            Ok(_) => {
                info!("Created media \"{name}\" ({})", media_type.as_str());
                // Refresh so the new media shows up in future dropdowns.
                self.update_variables().await;
            }
            Err(e) => error!("Failed to create media: {e}"),
        }
    }
}

#[async_trait]
impl IntegrationModule for YodeckModule {
    type Config = ModuleConfig;

    async fn init(&self, config: ModuleConfig) {
        self.apply_config(config).await;
        self.host.update_status(InstanceStatus::Connecting);
        self.update_variables().await;
    }

    async fn destroy(&self) {
        debug!("destroy");
    }

    async fn config_updated(&self, config: ModuleConfig) {
        self.apply_config(config).await;
        self.update_variables().await;
    }

    fn config_fields(&self) -> Vec<InputField> {
        config::config_fields()
    }

    async fn handle_action(&self, action_id: &str, options: &OptionValues) {
        match action_id {
            actions::START_TAKEOVER => self.start_takeover(options).await,
            actions::SET_SCHEDULE => self.set_schedule(options).await,
            actions::SET_DEFAULT_CONTENT => self.set_default_content(options).await,
            actions::STOP_TAKEOVER => self.stop_takeover(options).await,
            actions::CREATE_MEDIA => self.create_media(options).await,
            other => warn!("Unknown action: {other}"),
        }
    }

    async fn evaluate_feedback(&self, feedback_id: &str, options: &OptionValues) -> FeedbackValue {
        match feedback_id {
            feedbacks::SCREEN_CURRENT_CONTENT => {
                feedbacks::evaluate(self.playback.as_deref(), options)
            }
            other => {
                warn!("Unknown feedback: {other}");
                FeedbackValue::default()
            }
        }
    }
}
