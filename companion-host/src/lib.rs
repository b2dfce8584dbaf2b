//! # companion-host - Plugin contract for button-controller integrations
//!
//! `companion-host` defines the boundary between a button-automation
//! controller (the host runtime) and the integration modules it loads.
//! A module declares what the host should render (actions, feedbacks,
//! variables, configuration fields) and the host calls back into the module
//! when a button fires or a feedback needs re-evaluation.
//!
//! The crate is deliberately small: it carries the option-schema types, the
//! definition payloads, the instance status signal, and two traits:
//!
//! - [`HostHandle`]: the callbacks a host exposes to a loaded module
//!   (publish definitions, push variable values, report status).
//! - [`IntegrationModule`]: the lifecycle the host drives
//!   (init / destroy / config-updated / action dispatch / feedback
//!   evaluation).
//!
//! Modules stay host-agnostic by only ever talking to a `dyn HostHandle`,
//! which also makes them testable with a recording stub.
//!
//! ## Example
//!
//! ```
//! use companion_host::{Choice, ChoiceId, DropdownField, InputField, with_choices};
//!
//! let screens = vec![Choice::new(10u64, "Lobby"), Choice::new(11u64, "Bar")];
//! let field: InputField = DropdownField::new("screen_id", "Screen", with_choices(&screens)).into();
//! ```

pub mod definitions;
pub mod module;
pub mod options;
pub mod status;

// Re-exports for convenience
pub use definitions::{
    combine_rgb, ActionDefinition, FeedbackDefinition, FeedbackValue, VariableDefinition,
    VariableValue,
};
pub use module::{HostHandle, IntegrationModule};
pub use options::{
    with_choices, CheckboxField, Choice, ChoiceId, DropdownField, InputField, NumberField,
    OptionValues, TextField, VisibleWhen,
};
pub use status::InstanceStatus;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
