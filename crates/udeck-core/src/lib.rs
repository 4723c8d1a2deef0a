#![forbid(unsafe_code)]

//! Core domain logic for userdeck.
//!
//! Everything here is pure and synchronous: records are loaded once (see
//! `udeck-fetch`), and every view of them — the option set for a field, the
//! filtered subset, the masked or revealed display form — is derived on
//! demand rather than cached. The only mutable session state is the
//! [`FilterSelection`] and the [`RevealMap`], both owned by [`Dashboard`].
//!
//! # Invariants
//!
//! 1. Field access never panics: any missing path segment, non-object
//!    intermediate, or non-scalar endpoint collapses to the empty-string
//!    sentinel ([`path`]).
//! 2. Every record carries a non-zero identifier after normalization
//!    ([`record::normalize_records`]).
//! 3. An empty chosen field implies the chosen value is treated as empty,
//!    regardless of stored content ([`FilterSelection::value`]).
//! 4. Derived option sets contain no duplicates and are sorted ascending
//!    ([`options::derive_options`]).
//! 5. Toggling reveal for one record never changes another record's state
//!    ([`RevealMap::toggle`]).

pub mod dashboard;
pub mod field;
pub mod filter;
pub mod options;
pub mod path;
pub mod record;
pub mod reveal;

pub use dashboard::{Dashboard, FilterSelection};
pub use field::{FIELD_CATALOG, FieldDescriptor};
pub use filter::apply_filter;
pub use options::derive_options;
pub use record::{Record, RecordId, normalize_records};
pub use reveal::{MASK_CAP, RevealMap, RevealState, mask};
