//! Contract between the host runtime and an integration module.

use crate::definitions::{
    ActionDefinition, FeedbackDefinition, FeedbackValue, VariableDefinition, VariableValue,
};
use crate::options::{InputField, OptionValues};
use crate::status::InstanceStatus;
use async_trait::async_trait;

/// Callbacks the host exposes to a loaded module.
///
/// Definitions are replaced wholesale on every call; the host keeps no
/// incremental state on the module's behalf.
pub trait HostHandle: Send + Sync {
    fn set_action_definitions(&self, definitions: Vec<ActionDefinition>);
    fn set_feedback_definitions(&self, definitions: Vec<FeedbackDefinition>);
    fn set_variable_definitions(&self, definitions: Vec<VariableDefinition>);
    fn set_variable_values(&self, values: Vec<VariableValue>);
    fn update_status(&self, status: InstanceStatus);
}

/// Lifecycle of a module loaded by the host runtime.
///
/// The host dispatches events one at a time: lifecycle hooks, action
/// handlers, and feedback evaluations never run concurrently with each
/// other.
#[async_trait]
pub trait IntegrationModule: Send + Sync {
    type Config;

    /// Called once after the module is loaded with its saved configuration.
    async fn init(&self, config: Self::Config);

    /// Called before the module is unloaded.
    async fn destroy(&self);

    /// Called whenever the user saves the configuration page.
    async fn config_updated(&self, config: Self::Config);

    /// Fields the host renders on the module's configuration page.
    fn config_fields(&self) -> Vec<InputField>;

    /// Invoked when a button bound to one of the module's actions fires.
    async fn handle_action(&self, action_id: &str, options: &OptionValues);

    /// Invoked when a feedback bound to a button needs re-evaluation.
    async fn evaluate_feedback(&self, feedback_id: &str, options: &OptionValues) -> FeedbackValue;
}
