// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The host collaborator interface.
//!
//! The picker core never talks to the 3D application directly; everything it
//! needs from the scene graph goes through this trait. The host implements it
//! against its own command layer and delivers selection-change notifications
//! back to the core by calling [`PickerState::host_selection_changed`].
//!
//! [`PickerState::host_selection_changed`]: crate::data::PickerState::host_selection_changed

use serde::{Deserialize, Serialize};

/// The two scripting languages a command button can carry.
///
/// Execution failures are handled asymmetrically: Mel failures are swallowed,
/// Python failures are logged. The host's behavior differs between the two
/// and the core preserves that distinction rather than unifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    Mel,
    Python,
}

impl ScriptLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mel => "mel",
            Self::Python => "python",
        }
    }
}

impl std::fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle for a registered selection watch, returned by
/// [`Host::watch_selection`]. The core keeps at most one live watch and
/// re-registers whenever the active tab, its namespace, or its button
/// population changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchId(pub u64);

/// Narrow interface onto the embedding 3D application.
///
/// Paths are full scene-graph paths in `|a|b|c` form. All methods are
/// synchronous; the host guarantees they are only called from the UI thread.
pub trait Host {
    /// The host's current scene selection, as full paths.
    fn resolve_selection(&self) -> Vec<String>;

    /// Replace the host selection. An empty slice clears it.
    fn select(&mut self, paths: &[String]) -> anyhow::Result<()>;

    /// Whether an object exists at exactly this path.
    fn object_exists(&self, path: &str) -> bool;

    /// Whether exactly one object in the scene carries this short name.
    fn exists_unique_short_name(&self, name: &str) -> bool;

    /// Execute an embedded script in the given language.
    fn run_script(&mut self, text: &str, language: ScriptLanguage) -> anyhow::Result<()>;

    /// All namespaces currently present in the scene, without trailing
    /// separators.
    fn list_namespaces(&self) -> Vec<String>;

    /// Start pushing selection-change notifications to the core. Replaces
    /// any previous watch the core held.
    fn watch_selection(&mut self) -> WatchId;

    /// Stop a previously registered watch.
    fn unwatch(&mut self, id: WatchId);
}
