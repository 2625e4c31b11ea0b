//! Owner of the current filter state snapshot.

use std::sync::Arc;

use common::filter_state::{
    FieldValue, FilterError, FilterKey, FilterState, MultiField, RangeBounds, RangeField, ScalarField,
};

/// Which part of the state an edit replaces. Two edits to the same slot
/// supersede each other while debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterSlot {
    Scalar(ScalarField),
    Selection(MultiField),
    Range(RangeField),
}

/// A fully resolved replacement for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Scalar(ScalarField, String),
    Selection(MultiField, Vec<String>),
    Range(RangeField, RangeBounds),
}

impl FilterEdit {
    pub fn slot(&self) -> FilterSlot {
        match self {
            Self::Scalar(field, _) => FilterSlot::Scalar(*field),
            Self::Selection(field, _) => FilterSlot::Selection(*field),
            Self::Range(field, _) => FilterSlot::Range(*field),
        }
    }

    /// Resolves a `setField` call against `base` into a whole-slot edit. A
    /// single range bound keeps the other bound from `base`.
    pub fn resolve(base: &FilterState, key: FilterKey, value: FieldValue) -> Result<Self, FilterError> {
        let next = base.with_field(key, value)?;
        Ok(match key {
            FilterKey::Scalar(field) => Self::Scalar(field, next.scalar(field).to_string()),
            FilterKey::Multi(field) => Self::Selection(field, next.selection(field).to_vec()),
            FilterKey::Range(field, _) => Self::Range(field, next.range(field)),
        })
    }

    pub fn apply_to(&self, state: &FilterState) -> FilterState {
        match self {
            Self::Scalar(field, value) => state.with_scalar(*field, value.as_str()),
            Self::Selection(field, values) => state.with_selection(*field, values),
            Self::Range(field, bounds) => state.with_range(*field, *bounds),
        }
    }
}

/// What a commit changed in the cascading fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitSummary {
    pub revision: u64,
    pub make_changed: bool,
    pub model_changed: bool,
    pub trim_changed: bool,
}

impl CommitSummary {
    fn merge(self, other: CommitSummary) -> CommitSummary {
        CommitSummary {
            revision: other.revision,
            make_changed: self.make_changed || other.make_changed,
            model_changed: self.model_changed || other.model_changed,
            trim_changed: self.trim_changed || other.trim_changed,
        }
    }
}

/// Holds the canonical [`FilterState`]. Readers get whole snapshots; every
/// setter swaps in a new snapshot and bumps the revision.
#[derive(Debug, Default)]
pub struct FilterStore {
    state: Arc<FilterState>,
    revision: u64,
}

impl FilterStore {
    pub fn new(initial: FilterState) -> Self {
        Self { state: Arc::new(initial), revision: 0 }
    }

    pub fn snapshot(&self) -> Arc<FilterState> {
        self.state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_field(&mut self, key: FilterKey, value: FieldValue) -> Result<CommitSummary, FilterError> {
        let next = self.state.with_field(key, value)?;
        Ok(self.replace(next))
    }

    pub fn set_range(&mut self, field: RangeField, bounds: RangeBounds) -> CommitSummary {
        let next = self.state.with_range(field, bounds);
        self.replace(next)
    }

    pub fn apply(&mut self, edit: &FilterEdit) -> CommitSummary {
        let next = edit.apply_to(&self.state);
        self.replace(next)
    }

    pub fn apply_all<'a>(&mut self, edits: impl IntoIterator<Item = &'a FilterEdit>) -> CommitSummary {
        edits
            .into_iter()
            .fold(CommitSummary { revision: self.revision, ..Default::default() }, |summary, edit| {
                summary.merge(self.apply(edit))
            })
    }

    fn replace(&mut self, next: FilterState) -> CommitSummary {
        let previous = std::mem::replace(&mut self.state, Arc::new(next));
        self.revision += 1;
        let changed = |field: MultiField| previous.selection(field) != self.state.selection(field);
        CommitSummary {
            revision: self.revision,
            make_changed: changed(MultiField::Make),
            model_changed: changed(MultiField::Model),
            trim_changed: changed(MultiField::Trim),
        }
    }
}
