#![forbid(unsafe_code)]

//! Per-record reveal state and value masking.
//!
//! Each record is independently either `Masked` (the default) or
//! `Revealed`. The only transition is a manual toggle; nothing ever flips a
//! record back automatically. The map lives for the session and is never
//! persisted.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use crate::record::RecordId;

/// Maximum number of mask characters emitted for one value.
pub const MASK_CAP: usize = 8;

/// Display state of a record's sensitive fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Masked,
    Revealed,
}

impl RevealState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Masked => Self::Revealed,
            Self::Revealed => Self::Masked,
        }
    }

    #[must_use]
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// Reveal flags keyed by record identifier, default `Masked` for every id.
#[derive(Debug, Clone, Default)]
pub struct RevealMap {
    states: HashMap<RecordId, RevealState>,
}

impl RevealMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, id: RecordId) -> RevealState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_revealed(&self, id: RecordId) -> bool {
        self.state(id).is_revealed()
    }

    /// Flip the state for `id` only; all other identifiers are unchanged.
    pub fn toggle(&mut self, id: RecordId) {
        let next = self.state(id).toggled();
        self.states.insert(id, next);
    }
}

/// Masked form of a value: one `*` per grapheme, capped at [`MASK_CAP`].
///
/// An empty value masks to the empty string.
#[must_use]
pub fn mask(value: &str) -> String {
    let len = value.graphemes(true).count().min(MASK_CAP);
    "*".repeat(len)
}
