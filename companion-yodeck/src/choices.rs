//! Choice-list state and the refresh routine that rebuilds it.
//!
//! The refresh fans out the five listing requests concurrently and joins
//! them all before classifying results: screens and media are required,
//! playlists and layouts degrade to empty lists, and workspaces fall back
//! to a list derived from the workspace blocks embedded in the other
//! listings.

use crate::client::YodeckClient;
use crate::error::{Error, Result};
use crate::models::{ResourceSummary, WorkspaceRef};
use companion_host::{Choice, ChoiceId, InstanceStatus};
use std::collections::HashSet;
use tracing::{debug, error};

/// Label of the sentinel entry installed when no workspace is resolvable.
pub const ACCOUNT_DEFAULT_WORKSPACE_LABEL: &str = "Account default workspace";

/// Process-wide dropdown state, rebuilt wholesale on every refresh.
#[derive(Debug, Clone, Default)]
pub struct ChoiceState {
    pub workspaces: Vec<Choice>,
    pub screens: Vec<Choice>,
    pub media: Vec<Choice>,
    pub playlists: Vec<Choice>,
    pub layouts: Vec<Choice>,
    /// Never populated by the refresh; the schedule dropdown renders its
    /// placeholder until Yodeck exposes a schedules listing.
    pub schedules: Vec<Choice>,
    /// Currently selected workspace id, if any.
    pub selected_workspace: Option<u64>,
}

impl ChoiceState {
    /// Drop every list; the workspace selection is re-evaluated by
    /// [`populate_workspaces`](Self::populate_workspaces).
    pub fn clear(&mut self) {
        self.workspaces.clear();
        self.screens.clear();
        self.media.clear();
        self.playlists.clear();
        self.layouts.clear();
        self.schedules.clear();
    }

    /// Install workspace choices from the resolved set.
    ///
    /// A previously selected workspace is kept while it is still present,
    /// otherwise the first entry wins. An empty set installs the account
    /// default sentinel and clears the selection.
    pub fn populate_workspaces(&mut self, workspaces: &[WorkspaceRef]) {
        if workspaces.is_empty() {
            self.workspaces = vec![Choice::new(
                ChoiceId::empty(),
                ACCOUNT_DEFAULT_WORKSPACE_LABEL,
            )];
            self.selected_workspace = None;
            return;
        }

        self.workspaces = workspaces
            .iter()
            .map(|workspace| Choice::new(workspace.id, workspace.display_name()))
            .collect();

        let still_valid = self
            .selected_workspace
            .is_some_and(|selected| workspaces.iter().any(|workspace| workspace.id == selected));
        if !still_valid {
            self.selected_workspace = Some(workspaces[0].id);
        }
    }
}

/// Derive a workspace list from the workspace blocks embedded in the other
/// listings, scanned in order, first occurrence of an id winning.
pub fn derive_workspaces(groups: [&[ResourceSummary]; 4]) -> Vec<WorkspaceRef> {
    let mut seen = HashSet::new();
    let mut derived = Vec::new();
    for group in groups {
        for entry in group {
            if let Some(workspace) = &entry.workspace {
                if seen.insert(workspace.id) {
                    derived.push(WorkspaceRef {
                        id: workspace.id,
                        name: Some(workspace.display_name()),
                    });
                }
            }
        }
    }
    derived
}

/// Rebuild every choice list from the remote service.
///
/// On a required-listing failure the cycle is abandoned with cleared lists
/// and a connection-failure status; optional listings degrade silently.
pub async fn refresh(client: &YodeckClient, state: &mut ChoiceState) -> InstanceStatus {
    state.clear();

    let (workspaces, screens, media, playlists, layouts) = tokio::join!(
        client.list_workspaces(),
        client.list_screens(),
        client.list_media(),
        client.list_playlists(),
        client.list_layouts(),
    );

    let screens = match required(screens, "screens") {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to update choices: {e}");
            return InstanceStatus::ConnectionFailure;
        }
    };
    let media = match required(media, "media") {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to update choices: {e}");
            return InstanceStatus::ConnectionFailure;
        }
    };
    let playlists = optional(playlists, "playlists");
    let layouts = optional(layouts, "layouts");

    let mut workspace_refs: Vec<WorkspaceRef> = match workspaces {
        Ok(entries) => entries
            .iter()
            .map(|entry| WorkspaceRef {
                id: entry.id,
                name: entry.name.clone(),
            })
            .collect(),
        Err(e) => {
            debug!("Workspaces endpoint unavailable ({e}). Falling back to derived list.");
            Vec::new()
        }
    };
    if workspace_refs.is_empty() {
        workspace_refs = derive_workspaces([&screens, &media, &playlists, &layouts]);
    }

    state.populate_workspaces(&workspace_refs);
    state.screens = screens.iter().map(|entry| entry.choice("Screen")).collect();
    state.media = media.iter().map(|entry| entry.choice("Media")).collect();
    state.playlists = playlists
        .iter()
        .map(|entry| entry.choice("Playlist"))
        .collect();
    state.layouts = layouts.iter().map(|entry| entry.choice("Layout")).collect();

    InstanceStatus::Ok
}

fn required(
    result: Result<Vec<ResourceSummary>>,
    resource: &'static str,
) -> Result<Vec<ResourceSummary>> {
    result.map_err(|source| Error::listing(resource, source))
}

fn optional(result: Result<Vec<ResourceSummary>>, resource: &'static str) -> Vec<ResourceSummary> {
    match result {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping {resource} list ({e})");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, workspace: Option<(u64, &str)>) -> ResourceSummary {
        ResourceSummary {
            id,
            name: None,
            workspace: workspace.map(|(id, name)| WorkspaceRef {
                id,
                name: Some(name.to_string()),
            }),
        }
    }

    #[test]
    fn test_derive_workspaces_dedupes_first_wins() {
        let screens = vec![summary(1, Some((7, "HQ"))), summary(2, Some((8, "Annex")))];
        let media = vec![summary(3, Some((7, "Renamed HQ")))];
        let derived = derive_workspaces([&screens, &media, &[], &[]]);

        assert_eq!(derived.len(), 2);
        assert_eq!(derived[0].id, 7);
        assert_eq!(derived[0].name.as_deref(), Some("HQ"));
        assert_eq!(derived[1].id, 8);
    }

    #[test]
    fn test_derive_workspaces_name_fallback() {
        let media = vec![ResourceSummary {
            id: 3,
            name: None,
            workspace: Some(WorkspaceRef { id: 9, name: None }),
        }];
        let derived = derive_workspaces([&[], &media, &[], &[]]);
        assert_eq!(derived[0].name.as_deref(), Some("Workspace 9"));
    }

    #[test]
    fn test_populate_workspaces_keeps_valid_selection() {
        let mut state = ChoiceState {
            selected_workspace: Some(8),
            ..ChoiceState::default()
        };
        state.populate_workspaces(&[
            WorkspaceRef {
                id: 7,
                name: Some("HQ".to_string()),
            },
            WorkspaceRef {
                id: 8,
                name: Some("Annex".to_string()),
            },
        ]);
        assert_eq!(state.selected_workspace, Some(8));
        assert_eq!(state.workspaces.len(), 2);
    }

    #[test]
    fn test_populate_workspaces_defaults_to_first() {
        let mut state = ChoiceState {
            selected_workspace: Some(99),
            ..ChoiceState::default()
        };
        state.populate_workspaces(&[WorkspaceRef {
            id: 7,
            name: Some("HQ".to_string()),
        }]);
        assert_eq!(state.selected_workspace, Some(7));
    }

    #[test]
    fn test_populate_workspaces_empty_installs_sentinel() {
        let mut state = ChoiceState {
            selected_workspace: Some(7),
            ..ChoiceState::default()
        };
        state.populate_workspaces(&[]);

        assert_eq!(state.workspaces.len(), 1);
        assert!(state.workspaces[0].id.is_empty());
        assert_eq!(state.workspaces[0].label, ACCOUNT_DEFAULT_WORKSPACE_LABEL);
        assert_eq!(state.selected_workspace, None);
    }
}
