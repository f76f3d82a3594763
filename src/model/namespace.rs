// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Namespace-relative path encoding.
//!
//! A picker layout is authored against one rig but reused across many
//! instanced copies, each living under its own scene namespace. Object paths
//! are therefore stored namespace-relative: binding strips the namespace
//! qualifier, selection expands the active one back in. Command text gets
//! the same treatment through the `<ns>` placeholder, with a rewrite rule
//! per scripting language.

use crate::host::ScriptLanguage;
use crate::settings::NS_PLACEHOLDER;

/// Path component separator in scene-graph paths.
const SEP: char = '|';

/// Namespace qualifier separator.
const NS_SEP: char = ':';

/// Strip a full scene path down to its namespace-relative form.
///
/// The leading separator is dropped. If the leaf component carries a
/// namespace qualifier, only the components under that namespace are kept
/// and the qualifier is removed from each, so `|char1:root|char1:spine`
/// becomes `root|spine`. Unqualified paths are stored verbatim (minus the
/// leading separator).
pub fn strip_path(full_path: &str) -> String {
    let path = full_path.strip_prefix(SEP).unwrap_or(full_path);
    let Some(leaf) = path.rsplit(SEP).next() else {
        return path.to_string();
    };
    let Some(idx) = leaf.rfind(NS_SEP) else {
        return path.to_string();
    };
    let ns = &leaf[..=idx];

    path.split(SEP)
        .filter(|part| part.starts_with(ns))
        .map(|part| &part[ns.len()..])
        .collect::<Vec<_>>()
        .join("|")
}

/// Expand a stored namespace-relative path under the active namespace.
///
/// Every component gets the prefix: `expand_path("root|spine", "char1:")`
/// is `char1:root|char1:spine`. An empty namespace is the identity.
pub fn expand_path(obj: &str, ns: &str) -> String {
    if ns.is_empty() {
        return obj.to_string();
    }
    obj.split(SEP)
        .map(|part| format!("{ns}{part}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// The short (leaf) name of a path.
pub fn short_name(path: &str) -> &str {
    path.rsplit(SEP).next().unwrap_or(path)
}

/// Rewrite user-entered command text so namespace-qualified names become
/// `<ns>` placeholders, per the language's rewrite rule.
pub fn rewrite_command(text: &str, language: ScriptLanguage) -> String {
    match language {
        ScriptLanguage::Mel => rewrite_mel(text),
        ScriptLanguage::Python => rewrite_python(text),
    }
}

/// Substitute the active namespace back into stored command text.
pub fn substitute(text: &str, ns: &str) -> String {
    text.replace(NS_PLACEHOLDER, ns)
}

/// Mel rewrite: quotes are dropped, then every whitespace-separated token is
/// treated as a potential path. Each `|`-separated component keeps only the
/// part after its namespace qualifier, prefixed with the placeholder. Empty
/// lines are removed.
fn rewrite_mel(text: &str) -> String {
    let mut out_lines = Vec::new();
    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }
        let line = line.replace(['"', '\''], "");
        let parts: Vec<String> = line
            .split(' ')
            .map(|token| {
                token
                    .split(SEP)
                    .map(rewrite_component)
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        out_lines.push(parts.join(" "));
    }
    out_lines.join("\n")
}

fn rewrite_component(part: &str) -> String {
    match part.rfind(NS_SEP) {
        Some(idx) => format!("{NS_PLACEHOLDER}{}", &part[idx + 1..]),
        None => part.to_string(),
    }
}

/// Python rewrite: only quoted string literals are touched. Per line, the
/// outermost span between the first and last occurrence of each quote
/// character is treated as one literal (greedy); a qualified name inside it
/// is rewritten to the placeholder plus the leaf name, quotes preserved.
fn rewrite_python(text: &str) -> String {
    let mut out_lines = Vec::new();
    for line in text.split('\n') {
        let mut line = line.to_string();
        for quote in ['\'', '"'] {
            if let Some((start, end)) = quoted_span(&line, quote) {
                let inner = &line[start + 1..end];
                if let Some(idx) = inner.rfind(NS_SEP) {
                    let rewritten = format!("{NS_PLACEHOLDER}{}", &inner[idx + 1..]);
                    line.replace_range(start + 1..end, &rewritten);
                }
            }
        }
        out_lines.push(line);
    }
    out_lines.join("\n")
}

/// Byte offsets of the first and last occurrence of `quote`, when they
/// delimit a non-empty span.
fn quoted_span(line: &str, quote: char) -> Option<(usize, usize)> {
    let start = line.find(quote)?;
    let end = line.rfind(quote)?;
    (end > start).then_some((start, end))
}
