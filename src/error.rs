// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the picker core.
//!
//! File-system and decode failures surface as `PickerError` values and are
//! reported to the user by the host; they never abort the process. Host-side
//! failures (selection, script execution) travel as opaque `anyhow` errors
//! through the `Host` trait.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the picker core itself.
#[derive(Debug, Error)]
pub enum PickerError {
    /// A save/load target (or its parent directory) does not exist.
    /// State is left unchanged.
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The active tab has never been saved or loaded, so a plain save has
    /// no destination. The host should route to its save-as flow.
    #[error("No file path set for this tab")]
    NoFilePath,

    /// A persisted document could not be parsed at all. Field-level damage
    /// (a bad background, one malformed button) is skipped instead.
    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// Background image bytes could not be decoded or re-encoded.
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
