//! Per-kind enrichment output

use crate::domain::{
    Droid, EnrichedCharacter, EnrichedFilm, EnrichedLocation, EnrichedSpecies, EnrichedVehicle,
    Organization, ResourceKind,
};
use serde::Serialize;

/// Records produced for one [`ResourceKind`]
///
/// Serializes as the bare record array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceListing {
    Characters(Vec<EnrichedCharacter>),
    Droids(Vec<Droid>),
    Species(Vec<EnrichedSpecies>),
    Locations(Vec<EnrichedLocation>),
    Organizations(Vec<Organization>),
    Vehicles(Vec<EnrichedVehicle>),
    Films(Vec<EnrichedFilm>),
}

impl ResourceListing {
    /// Kind of the listed records
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceListing::Characters(_) => ResourceKind::Characters,
            ResourceListing::Droids(_) => ResourceKind::Droids,
            ResourceListing::Species(_) => ResourceKind::Species,
            ResourceListing::Locations(_) => ResourceKind::Locations,
            ResourceListing::Organizations(_) => ResourceKind::Organizations,
            ResourceListing::Vehicles(_) => ResourceKind::Vehicles,
            ResourceListing::Films(_) => ResourceKind::Films,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            ResourceListing::Characters(r) => r.len(),
            ResourceListing::Droids(r) => r.len(),
            ResourceListing::Species(r) => r.len(),
            ResourceListing::Locations(r) => r.len(),
            ResourceListing::Organizations(r) => r.len(),
            ResourceListing::Vehicles(r) => r.len(),
            ResourceListing::Films(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
