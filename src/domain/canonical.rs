//! Canonical records as listed by the databank
//!
//! Each resource kind gets its own record type. The common attributes are
//! `id`, `name`, `description` and `image`; everything else is optional and
//! omitted from serialized output when absent.

use super::kind::ResourceKind;
use super::Named;
use serde::{Deserialize, Serialize};

/// A character (person) from the databank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeworld: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<Vec<String>>,
}

/// A droid from the databank; never enriched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droid {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<Vec<String>>,
}

/// A species from the databank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeworld: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_lifespan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_colors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_colors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_colors: Option<String>,
}

/// A location (planet, moon, station) from the databank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// An organization from the databank; never enriched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissolved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<Vec<String>>,
}

/// A vehicle or starship from the databank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumables: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<Vec<String>>,
}

/// Film view synthesized from a SWAPI film
///
/// The databank has no film listing, so this record is derived from the
/// reference catalog rather than fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: String,
    pub title: String,
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub description: String,
    pub image: String,
}

/// Any canonical record, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRecord {
    Character(Character),
    Droid(Droid),
    Species(Species),
    Location(Location),
    Organization(Organization),
    Vehicle(Vehicle),
}

impl CanonicalRecord {
    /// Decodes a raw databank item into the record type for `kind`
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not match the record schema, or if
    /// `kind` has no databank listing.
    pub fn from_value(kind: ResourceKind, value: serde_json::Value) -> Result<Self, String> {
        let record = match kind {
            ResourceKind::Characters => serde_json::from_value(value).map(Self::Character),
            ResourceKind::Droids => serde_json::from_value(value).map(Self::Droid),
            ResourceKind::Species => serde_json::from_value(value).map(Self::Species),
            ResourceKind::Locations => serde_json::from_value(value).map(Self::Location),
            ResourceKind::Organizations => serde_json::from_value(value).map(Self::Organization),
            ResourceKind::Vehicles => serde_json::from_value(value).map(Self::Vehicle),
            ResourceKind::Films => return Err("The databank has no film listing".to_string()),
        };
        record.map_err(|e| format!("Invalid {kind} record: {e}"))
    }

    /// Kind of this record
    pub fn kind(&self) -> ResourceKind {
        match self {
            CanonicalRecord::Character(_) => ResourceKind::Characters,
            CanonicalRecord::Droid(_) => ResourceKind::Droids,
            CanonicalRecord::Species(_) => ResourceKind::Species,
            CanonicalRecord::Location(_) => ResourceKind::Locations,
            CanonicalRecord::Organization(_) => ResourceKind::Organizations,
            CanonicalRecord::Vehicle(_) => ResourceKind::Vehicles,
        }
    }
}

/// Typed access to one variant of [`CanonicalRecord`]
pub trait CanonicalEntity: Named + Sized {
    /// Kind listed by the databank for this record type
    const KIND: ResourceKind;

    /// Unwraps the matching variant
    fn from_record(record: CanonicalRecord) -> Option<Self>;
}

macro_rules! canonical_entity {
    ($ty:ident, $variant:ident, $kind:expr) => {
        impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        }

        impl CanonicalEntity for $ty {
            const KIND: ResourceKind = $kind;

            fn from_record(record: CanonicalRecord) -> Option<Self> {
                match record {
                    CanonicalRecord::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

canonical_entity!(Character, Character, ResourceKind::Characters);
canonical_entity!(Droid, Droid, ResourceKind::Droids);
canonical_entity!(Species, Species, ResourceKind::Species);
canonical_entity!(Location, Location, ResourceKind::Locations);
canonical_entity!(Organization, Organization, ResourceKind::Organizations);
canonical_entity!(Vehicle, Vehicle, ResourceKind::Vehicles);

impl Named for Film {
    fn name(&self) -> &str {
        &self.title
    }
}
