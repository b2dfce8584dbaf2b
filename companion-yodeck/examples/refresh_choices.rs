//! Example: Refresh choice lists against a live Yodeck account
//!
//! This example demonstrates:
//! - Wiring a module instance to a host handle
//! - Initializing with an API key
//! - Inspecting the refreshed dropdown lists
//!
//! Run with: YODECK_API_KEY=... cargo run --example refresh_choices

use companion_host::{
    ActionDefinition, FeedbackDefinition, HostHandle, InstanceStatus, IntegrationModule,
    VariableDefinition, VariableValue,
};
use companion_yodeck::{ModuleConfig, YodeckModule};
use std::sync::Arc;

/// Host handle that just prints whatever the module publishes.
struct PrintHost;

impl HostHandle for PrintHost {
    fn set_action_definitions(&self, definitions: Vec<ActionDefinition>) {
        println!("Actions:");
        for action in &definitions {
            println!("  {} ({})", action.name, action.id);
        }
    }

    fn set_feedback_definitions(&self, definitions: Vec<FeedbackDefinition>) {
        println!("Feedbacks:");
        for feedback in &definitions {
            println!("  {} ({})", feedback.name, feedback.id);
        }
    }

    fn set_variable_definitions(&self, definitions: Vec<VariableDefinition>) {
        println!("Variables:");
        for variable in &definitions {
            println!("  $({}) - {}", variable.variable_id, variable.name);
        }
    }

    fn set_variable_values(&self, values: Vec<VariableValue>) {
        for value in &values {
            if !value.value.is_empty() {
                println!("  $({}) = {}", value.variable_id, value.value);
            }
        }
    }

    fn update_status(&self, status: InstanceStatus) {
        println!("Status: {status}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("YODECK_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        eprintln!("Set YODECK_API_KEY to run this example");
        std::process::exit(1);
    }

    println!("Yodeck - Choice Refresh");
    println!("=======================\n");

    let module = YodeckModule::new(Arc::new(PrintHost));
    module.init(ModuleConfig::new(api_key)).await;

    let state = module.choice_state().await;
    println!("\nWorkspaces ({}):", state.workspaces.len());
    for workspace in &state.workspaces {
        println!("  [{}] {}", workspace.id, workspace.label);
    }
    println!("Screens ({}):", state.screens.len());
    for screen in &state.screens {
        println!("  [{}] {}", screen.id, screen.label);
    }
    println!("Media: {}", state.media.len());
    println!("Playlists: {}", state.playlists.len());
    println!("Layouts: {}", state.layouts.len());
    if let Some(selected) = state.selected_workspace {
        println!("Selected workspace: {selected}");
    }
}
