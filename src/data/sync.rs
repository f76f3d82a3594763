// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Selection synchronization between the canvas and the host.
//!
//! Two directions. Canvas-to-host: whenever the button selection changes,
//! the union of the selected object buttons' resolved paths replaces the
//! host selection (or clears it), and any selected command buttons fire
//! their scripts and deselect again — they are momentary triggers. Host-to-
//! canvas: the selection watch reconciles which buttons display as selected
//! when the scene selection changes, under a display-only flag so the
//! reconciliation never re-issues a host selection command.

use super::PickerState;
use crate::host::{Host, ScriptLanguage};
use crate::model::{ButtonId, Payload, namespace};
use crate::settings::MULTIPLE_VALUE_DISPLAY;
use std::collections::BTreeSet;

/// Aggregate label/size/opacity of the selection, as the host's toolbar
/// displays it: empty when nothing applies, the shared value when the
/// selection agrees, the multiple-value marker otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    pub label: String,
    pub scale: String,
    pub opacity: String,
}

fn display_value(values: &BTreeSet<String>) -> String {
    match values.len() {
        0 => String::new(),
        1 => values.iter().next().cloned().unwrap_or_default(),
        _ => MULTIPLE_VALUE_DISPLAY.to_string(),
    }
}

impl<H: Host> PickerState<H> {
    /// React to a canvas-driven selection change: update the toolbar
    /// summary, re-select the bound objects in the host (or clear), and
    /// dispatch any selected command buttons.
    ///
    /// Suppressed while `display_only` is set (host-driven reconciliation).
    pub fn selection_changed(&mut self) {
        if self.display_only {
            return;
        }
        let Some(tab) = self.tabs.get(self.active) else {
            self.selection_summary = SelectionSummary::default();
            return;
        };
        let ns = tab.namespace.clone();

        let mut labels = BTreeSet::new();
        let mut scales = BTreeSet::new();
        let mut opacities = BTreeSet::new();
        let mut object_names: BTreeSet<String> = BTreeSet::new();
        let mut mel_cmd = String::new();
        let mut py_cmd = String::new();
        let mut display_updates: Vec<(ButtonId, bool)> = Vec::new();
        let mut command_buttons: Vec<ButtonId> = Vec::new();

        for button in tab.selected_buttons() {
            labels.insert(button.label.clone());
            let (sx, sy) = button.scale();
            scales.insert(format!("{sx}, {sy}"));
            opacities.insert(button.opacity.to_string());

            match &button.payload {
                Payload::Objects(objs) => {
                    let mut any_resolved = false;
                    for obj in objs {
                        let name = namespace::expand_path(obj, &ns);
                        if self.host.object_exists(&name) {
                            object_names.insert(name);
                            any_resolved = true;
                        } else {
                            let short = namespace::short_name(&name);
                            if self.host.exists_unique_short_name(short) {
                                object_names.insert(short.to_string());
                                any_resolved = true;
                            }
                        }
                    }
                    // A button none of whose objects resolve drops out of
                    // the displayed selection.
                    display_updates.push((button.id, any_resolved));
                }
                Payload::Command { language, text } => {
                    command_buttons.push(button.id);
                    if !text.is_empty() {
                        let cmd = namespace::substitute(text, &ns);
                        match language {
                            ScriptLanguage::Mel => mel_cmd.push_str(&cmd),
                            ScriptLanguage::Python => py_cmd.push_str(&cmd),
                        }
                    }
                }
            }
        }

        let mut summary = SelectionSummary {
            label: display_value(&labels),
            scale: display_value(&scales),
            opacity: display_value(&opacities),
        };
        if object_names.is_empty() {
            summary = SelectionSummary::default();
        }

        if !mel_cmd.is_empty() || !py_cmd.is_empty() {
            // Command buttons take precedence over object selection.
            // Mel failures are swallowed; Python failures are logged.
            if !mel_cmd.is_empty() {
                let _ = self.host.run_script(&mel_cmd, ScriptLanguage::Mel);
            }
            if !py_cmd.is_empty()
                && let Err(e) = self.host.run_script(&py_cmd, ScriptLanguage::Python)
            {
                tracing::error!("Python command failed: {}", e);
            }
        } else {
            let paths: Vec<String> = object_names.into_iter().collect();
            if let Err(e) = self.host.select(&paths) {
                tracing::error!("Selection command failed: {}", e);
            }
        }

        let tab = &mut self.tabs[self.active];
        for (id, selected) in display_updates {
            if let Some(b) = tab.button_mut(id) {
                b.selected = selected;
            }
        }
        // Command buttons are momentary triggers, not persistent selection
        // state.
        for id in command_buttons {
            if let Some(b) = tab.button_mut(id) {
                b.selected = false;
            }
        }

        self.selection_summary = summary;
    }

    /// Reconcile displayed selection after a host scene-selection change.
    ///
    /// A button displays selected iff every one of its bound objects
    /// matches some currently selected host path, where a host path `s`
    /// matches a bound path `obj` when `s` ends with `obj` or `obj` ends
    /// with the short name of `s`. Runs display-only: no host notification
    /// is issued from here.
    pub fn host_selection_changed(&mut self, selection: &[String]) {
        self.display_only = true;
        if let Some(tab) = self.tabs.get_mut(self.active) {
            for (id, _) in &self.watch_context.entries {
                if let Some(b) = tab.button_mut(*id) {
                    b.selected = false;
                }
            }

            for (id, objs) in &self.watch_context.entries {
                if objs.len() > selection.len() {
                    continue;
                }
                let mut matched = 0;
                for path in selection {
                    let short = namespace::short_name(path);
                    if objs
                        .iter()
                        .any(|obj| path.ends_with(obj.as_str()) || obj.ends_with(short))
                    {
                        matched += 1;
                    }
                }
                if matched == objs.len()
                    && let Some(b) = tab.button_mut(*id)
                {
                    b.selected = true;
                }
            }
        }
        self.display_only = false;
    }

    /// Rebuild the watch context for the active tab and re-register the
    /// host watch. Called whenever the active tab, its namespace, or its
    /// button population changes.
    pub(crate) fn rebuild_watch(&mut self) {
        if let Some(id) = self.watch.take() {
            self.host.unwatch(id);
        }
        self.watch_context.entries.clear();
        let Some(tab) = self.tabs.get(self.active) else {
            return;
        };
        for button in &tab.buttons {
            if let Payload::Objects(objs) = &button.payload {
                let paths = objs
                    .iter()
                    .map(|o| namespace::expand_path(o, &tab.namespace))
                    .collect();
                self.watch_context.entries.push((button.id, paths));
            }
        }
        self.watch = Some(self.host.watch_selection());
    }
}
