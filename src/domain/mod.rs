//! Domain models and types for Holonet.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Resource kinds** ([`ResourceKind`], [`ReferenceKind`])
//! - **Canonical records** from the databank ([`canonical`], [`CanonicalRecord`])
//! - **Reference records** from SWAPI ([`reference`], [`ReferenceRecord`])
//! - **Enriched records** combining both ([`enriched`])
//! - **Error types** ([`HolonetError`], [`SourceError`]) and the [`Result`] alias
//!
//! The two sources use overlapping type names (both list species and
//! vehicles), so those record types are addressed through their module:
//!
//! ```rust
//! use holonet::domain::{canonical, reference, Named};
//!
//! # fn example(a: &canonical::Species, b: &reference::Species) {
//! println!("{} / {}", a.name(), b.name());
//! # }
//! ```

pub mod canonical;
pub mod enriched;
pub mod errors;
pub mod ids;
pub mod kind;
pub mod reference;
pub mod result;

// Re-export commonly used types for convenience
pub use canonical::{CanonicalEntity, CanonicalRecord, Character, Droid, Location, Organization};
pub use enriched::{
    EnrichedCharacter, EnrichedFilm, EnrichedLocation, EnrichedSpecies, EnrichedVehicle,
    MatchStrategy,
};
pub use errors::{HolonetError, SourceError};
pub use ids::ReferenceId;
pub use kind::{ReferenceKind, ResourceKind};
pub use reference::{Craft, Person, Planet, ReferenceEntity, ReferenceRecord, Starship};
pub use result::Result;

/// A record with a display name, used for cross-source matching
///
/// Films are named by their title.
pub trait Named {
    /// Name as published by the record's source
    fn name(&self) -> &str;
}
