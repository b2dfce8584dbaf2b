//! # companion-yodeck - Yodeck integration module for Companion
//!
//! `companion-yodeck` lets a button-automation controller drive the Yodeck
//! cloud digital-signage service: push takeover content to a screen, assign
//! schedules, set default content, and create media from a URL. It also
//! polls Yodeck to populate the dropdown choices behind those commands and
//! exposes per-screen playback state as feedback and display variables.
//!
//! ## Architecture
//!
//! - [`client`]: authenticated HTTP client for the Yodeck REST API
//! - [`models`]: request/response structs for every endpoint
//! - [`choices`]: choice-list state and the parallel refresh routine
//! - [`actions`]: command definitions and payload builders
//! - [`feedbacks`]: screen playback feedback
//! - [`variables`]: per-screen display variables
//! - [`module`]: the module instance wired into the host contract
//! - [`error`]: error types and result alias
//!
//! The module only talks to the host through the `companion-host` traits,
//! so it can be exercised in tests with a recording host stub and a mock
//! HTTP server.
//!
//! ## Quick Start
//!
//! ```no_run
//! use companion_host::IntegrationModule;
//! use companion_yodeck::{ModuleConfig, YodeckModule};
//! use std::sync::Arc;
//!
//! # fn host() -> Arc<dyn companion_host::HostHandle> { unimplemented!() }
//! #[tokio::main]
//! async fn main() {
//!     let module = YodeckModule::new(host());
//!     module.init(ModuleConfig::new("my-api-key")).await;
//! }
//! ```
//!
//! ## Failure model
//!
//! A missing API key puts the instance into bad-config and suppresses all
//! network activity. During a refresh, screens and media listings are
//! required (failure surfaces as connection-failure), while workspaces,
//! playlists, and layouts degrade gracefully. Command failures are logged
//! and never crash the instance; nothing is retried.

pub mod actions;
pub mod choices;
pub mod client;
pub mod config;
pub mod error;
pub mod feedbacks;
pub mod models;
pub mod module;
pub mod variables;

// Re-exports for convenience
pub use choices::ChoiceState;
pub use client::{ApiBody, ClientBuilder, YodeckClient, DEFAULT_API_BASE};
pub use config::ModuleConfig;
pub use error::{Error, Result};
pub use feedbacks::PlaybackStateProvider;
pub use models::{
    ContentSelection, ContentType, MediaArguments, MediaCreate, MediaType, PlaybackState,
    TakeoverContent, WorkspaceRef,
};
pub use module::YodeckModule;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
