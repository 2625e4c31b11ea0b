//! Cascading option lists for make, model and trim.

use std::collections::BTreeSet;

/// An entry of an [`OptionSet`]. `owner` is the upstream selection the entry
/// was fetched under; `label` is what the user selects.
pub trait OptionEntry: Clone + Ord + std::fmt::Debug {
    type Owner: Clone + Ord + std::fmt::Debug;

    fn owner(&self) -> Self::Owner;
    fn label(&self) -> &str;
}

impl OptionEntry for String {
    type Owner = ();

    fn owner(&self) -> Self::Owner {}

    fn label(&self) -> &str {
        self
    }
}

/// A model name tagged with the make that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelOption {
    pub make: String,
    pub model: String,
}

impl ModelOption {
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self { make: make.into(), model: model.into() }
    }
}

impl OptionEntry for ModelOption {
    type Owner = String;

    fn owner(&self) -> Self::Owner {
        self.make.clone()
    }

    fn label(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrimOption {
    pub make: String,
    pub model: String,
    pub trim: String,
}

impl TrimOption {
    pub fn new(make: impl Into<String>, model: impl Into<String>, trim: impl Into<String>) -> Self {
        Self { make: make.into(), model: model.into(), trim: trim.into() }
    }
}

impl OptionEntry for TrimOption {
    type Owner = (String, String);

    fn owner(&self) -> Self::Owner {
        (self.make.clone(), self.model.clone())
    }

    fn label(&self) -> &str {
        &self.trim
    }
}

/// Valid options for one cascading field, scoped to the upstream values
/// they were fetched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet<T: OptionEntry> {
    fetched_for: Vec<T::Owner>,
    entries: Vec<T>,
}

pub type MakeOptions = OptionSet<String>;
pub type ModelOptions = OptionSet<ModelOption>;
pub type TrimOptions = OptionSet<TrimOption>;

impl<T: OptionEntry> Default for OptionSet<T> {
    fn default() -> Self {
        Self { fetched_for: Vec::new(), entries: Vec::new() }
    }
}

impl<T: OptionEntry> OptionSet<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from entries in arrival order. Repeated entries are
    /// kept once, at their first position.
    pub fn from_entries(fetched_for: Vec<T::Owner>, entries: impl IntoIterator<Item = T>) -> Self {
        let mut seen = BTreeSet::new();
        let entries = entries.into_iter().filter(|entry| seen.insert(entry.clone())).collect();
        Self { fetched_for, entries }
    }

    pub fn fetched_for(&self) -> &[T::Owner] {
        &self.fetched_for
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_owned_by<'a>(&'a self, owner: &'a T::Owner) -> impl Iterator<Item = &'a T> + 'a {
        self.entries.iter().filter(move |entry| &entry.owner() == owner)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.iter().any(|entry| entry.label() == label)
    }

    /// Distinct labels in entry order.
    pub fn labels(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&entry.label()) {
                out.push(entry.label());
            }
        }
        out
    }
}

impl ModelOptions {
    /// Every make that offers `model`.
    pub fn owning_makes(&self, model: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.model == model)
            .map(|entry| entry.make.as_str())
            .collect()
    }
}
