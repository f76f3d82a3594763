// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The persisted picker document model: buttons, tabs, backgrounds, and the
//! namespace machinery that keeps stored layouts scene-independent.

mod background;
mod button;
pub mod document;
pub mod namespace;
mod tab;

pub use background::Background;
pub use button::{Button, Payload, Rgb};
pub use tab::Tab;

use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a button within a session.
///
/// Ids come from a monotonically increasing global counter and are never
/// reused, so a deleted button leaves no dangling references in the undo
/// history or the selection watch context. Ids are not persisted; loading a
/// document assigns fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonId(u64);

static BUTTON_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ButtonId {
    /// Create a new unique button id.
    pub fn next() -> Self {
        Self(BUTTON_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ButtonId {
    fn default() -> Self {
        Self::next()
    }
}
