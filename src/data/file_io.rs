// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! File I/O operations for PickerState (save, save-as, load, directory)

use super::PickerState;
use crate::error::PickerError;
use crate::host::Host;
use crate::model::document;
use crate::settings::DEFAULT_TAB_NAME;
use chrono::Local;
use std::path::{Path, PathBuf};

impl<H: Host> PickerState<H> {
    /// Save the active tab to its recorded path.
    ///
    /// Fails with [`PickerError::NoFilePath`] when the tab has never been
    /// saved or loaded; the host routes that to its save-as dialog. The
    /// overwrite confirmation for existing files is host chrome — see
    /// [`save_would_overwrite`].
    ///
    /// [`save_would_overwrite`]: Self::save_would_overwrite
    pub fn save(&mut self) -> Result<(), PickerError> {
        let Some(tab) = self.tabs.get(self.active) else {
            return Ok(());
        };
        match tab.source_path.clone() {
            Some(path) => self.write_active(&path),
            None => Err(PickerError::NoFilePath),
        }
    }

    /// Whether a plain save would overwrite an existing file, so the host
    /// can ask first.
    pub fn save_would_overwrite(&self) -> bool {
        self.active_tab()
            .and_then(|tab| tab.source_path.as_deref())
            .is_some_and(Path::exists)
    }

    /// Save the active tab to an explicit destination and remember it.
    pub fn save_as(&mut self, path: &Path) -> Result<(), PickerError> {
        self.write_active(path)
    }

    fn write_active(&mut self, path: &Path) -> Result<(), PickerError> {
        match self.try_write(path) {
            Ok(()) => {
                self.error_message = None;
                self.last_saved = Some(Local::now().format("%I:%M %p").to_string());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save: {}", e);
                self.error_message = Some(format!("Failed to save: {e}"));
                Err(e)
            }
        }
    }

    fn try_write(&mut self, path: &Path) -> Result<(), PickerError> {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return Ok(());
        };
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            return Err(PickerError::PathNotFound(parent));
        }

        let bytes = document::encode_tab(tab)?;
        std::fs::write(path, bytes)?;
        tab.source_path = Some(path.to_path_buf());
        self.default_file_dir = parent;
        tracing::info!("Saved: {}", path.display());
        Ok(())
    }

    /// Load a document into a new tab and make it active. Returns the new
    /// tab's index.
    pub fn load(&mut self, path: &Path) -> Result<usize, PickerError> {
        match self.try_load(path) {
            Ok(index) => {
                self.error_message = None;
                Ok(index)
            }
            Err(e) => {
                tracing::error!("Failed to load: {}", e);
                self.error_message = Some(format!("Failed to load: {e}"));
                Err(e)
            }
        }
    }

    fn try_load(&mut self, path: &Path) -> Result<usize, PickerError> {
        if !path.exists() {
            return Err(PickerError::PathNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_TAB_NAME);
        let mut tab = document::decode_tab(&bytes, stem)?;
        tab.source_path = Some(path.to_path_buf());

        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.default_file_dir = parent.to_path_buf();
        }
        self.rebuild_watch();
        tracing::info!("Loaded: {}", path.display());
        Ok(self.active)
    }

    /// Change the default file-dialog directory. A missing path reports an
    /// error and leaves the setting unchanged.
    pub fn set_directory(&mut self, path: &Path) -> Result<(), PickerError> {
        if path.exists() {
            self.default_file_dir = path.to_path_buf();
            self.error_message = None;
            tracing::info!("Directory set: {}", path.display());
            Ok(())
        } else {
            let err = PickerError::PathNotFound(path.to_path_buf());
            tracing::error!("{}", err);
            self.error_message = Some(err.to_string());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::StubHost;
    use crate::model::{Button, Rgb};
    use kurbo::Point;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn scratch_dir() -> PathBuf {
        let n = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "pickboard-test-{}-{n}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn state() -> PickerState<StubHost> {
        PickerState::new(StubHost::default())
    }

    #[test]
    fn save_without_a_path_needs_save_as() {
        let mut state = state();
        let err = state.save().unwrap_err();
        assert!(matches!(err, PickerError::NoFilePath));
    }

    #[test]
    fn save_as_then_load_roundtrips() {
        let dir = scratch_dir();
        let path = dir.join("body.npk");

        let mut state = state();
        let mut button = Button::new_object("L1");
        button.position = Point::new(0.0, 0.0);
        button.set_scale((2.0, 2.0));
        button.color = Rgb(225, 225, 0);
        state.tabs[0].buttons.push(button);
        state.tabs[0].name = "body".to_string();

        state.save_as(&path).unwrap();
        assert_eq!(state.tabs[0].source_path.as_deref(), Some(path.as_path()));
        assert!(state.last_saved.is_some());
        assert!(state.save_would_overwrite());

        let index = state.load(&path).unwrap();
        assert_eq!(index, 1);
        assert_eq!(state.active_index(), 1);
        let loaded = &state.tabs[1];
        assert_eq!(loaded.name, "body");
        assert_eq!(loaded.buttons.len(), 1);
        assert_eq!(loaded.buttons[0].label, "L1");
        assert_eq!(loaded.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(state.default_file_dir, dir);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn save_into_missing_directory_changes_nothing() {
        let mut state = state();
        let path = Path::new("/nonexistent-pickboard-dir/out.npk");

        let err = state.save_as(path).unwrap_err();
        assert!(matches!(err, PickerError::PathNotFound(_)));
        assert!(state.tabs[0].source_path.is_none());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn load_of_missing_file_adds_no_tab() {
        let mut state = state();
        let tabs_before = state.tabs.len();

        let err = state.load(Path::new("/nonexistent/file.npk")).unwrap_err();
        assert!(matches!(err, PickerError::PathNotFound(_)));
        assert_eq!(state.tabs.len(), tabs_before);
        assert!(state.error_message.is_some());
    }

    #[test]
    fn set_directory_validates_the_path() {
        let mut state = state();
        let dir = scratch_dir();

        state.set_directory(&dir).unwrap();
        assert_eq!(state.default_file_dir, dir);

        let before = state.default_file_dir.clone();
        let err = state
            .set_directory(Path::new("/nonexistent-pickboard-dir"))
            .unwrap_err();
        assert!(matches!(err, PickerError::PathNotFound(_)));
        assert_eq!(state.default_file_dir, before);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn loading_registers_a_fresh_watch() {
        let dir = scratch_dir();
        let path = dir.join("layout.npk");

        let mut state = state();
        state.tabs[0].buttons.push(Button::new_object("a"));
        state.save_as(&path).unwrap();

        let watches_before = state.host.watch_count;
        state.load(&path).unwrap();
        assert!(state.host.watch_count > watches_before);

        std::fs::remove_dir_all(dir).ok();
    }
}
