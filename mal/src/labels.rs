// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! The label table and the discovery pass that fills it

use crate::NormalizedLine;
use crate::scan::split_words;
use itertools::Itertools;
use std::collections::HashMap;

/// A label definition, and the number of times it has been branched to
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LabelEntry {
    /// The name as written at the definition, without the colon
    pub name: String,
    /// The line the label was defined on
    pub definition_line: usize,
    /// The number of branches to the label seen so far
    pub reference_count: usize,
}

/// Labels defined within a program, looked up without regard to case
#[derive(Debug, Default, Clone)]
pub struct LabelTable {
    entries: HashMap<String, LabelEntry>,
}

/// Case-fold a label name into its lookup key
///
/// This is full Unicode case folding, so `ß` and `SS` are the same label.
fn key(name: &str) -> String {
    caseless::default_case_fold_str(name)
}

/// If `word` defines a label, return the label's name
///
/// Any word containing a colon is a label definition, and every colon is removed to get the
/// name, so `a:b:` defines `ab`.
pub(crate) fn label_name(word: &str) -> Option<String> {
    word.contains(':').then(|| word.replace(':', ""))
}

impl LabelTable {
    /// Create an empty [`LabelTable`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a label table from the first word of each line
    ///
    /// Every line is scanned before anything is checked, so branches can refer to labels defined
    /// further down. When a name is defined more than once, the last definition wins.
    ///
    /// ```
    /// use mal::{Line, LabelTable};
    /// let table = LabelTable::discover(&[
    ///     Line::new(1, "Loop: INC R1"),
    ///     Line::new(2, "BR loop"),
    ///     Line::new(4, "done: END"),
    /// ]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.get("LOOP").map(|e| e.definition_line), Some(1));
    /// assert_eq!(table.get("DONE").map(|e| e.name.as_str()), Some("done"));
    /// ```
    #[must_use]
    pub fn discover(lines: &[NormalizedLine]) -> Self {
        let mut table = Self::new();
        for line in lines {
            let Some(first) = split_words(&line.text).first().map(|w| w.inner) else {
                continue;
            };
            if let Some(name) = label_name(first) {
                table.define(name, line.number);
            }
        }
        tracing::debug!(labels = table.len(), "label discovery complete");
        table
    }

    /// Define a label, replacing any earlier definition with the same case-folded name
    pub fn define(&mut self, name: impl Into<String>, definition_line: usize) {
        let name = name.into();
        if let Some(old) = self.entries.insert(
            key(&name),
            LabelEntry {
                name: name.clone(),
                definition_line,
                reference_count: 0,
            },
        ) {
            tracing::trace!(
                label = %name,
                old_line = old.definition_line,
                new_line = definition_line,
                "label redefined"
            );
        }
    }

    /// Look up a label
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LabelEntry> {
        self.entries.get(&key(name))
    }

    /// Record a branch to `name`, returning false if no such label exists
    pub fn reference(&mut self, name: &str) -> bool {
        match self.entries.get_mut(&key(name)) {
            Some(entry) => {
                entry.reference_count += 1;
                true
            }
            None => false,
        }
    }

    /// The number of distinct labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no labels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by definition line
    pub fn entries(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries
            .values()
            .sorted_by_key(|entry| entry.definition_line)
    }

    /// Entries that were never branched to, ordered by definition line
    pub fn unreferenced(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries().filter(|entry| entry.reference_count == 0)
    }
}
