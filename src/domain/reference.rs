//! Reference records from the SWAPI catalog
//!
//! SWAPI records are identified only by their `url`. Relations to other
//! records are ordered lists of reference URLs; the single-valued
//! `homeworld` relation is optional because SWAPI reports `null` for some
//! species.

use super::kind::ReferenceKind;
use super::Named;
use serde::{Deserialize, Serialize};

/// A SWAPI person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub eye_color: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub hair_color: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub skin_color: String,
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// A SWAPI planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    #[serde(default)]
    pub rotation_period: String,
    #[serde(default)]
    pub orbital_period: String,
    #[serde(default)]
    pub diameter: String,
    #[serde(default)]
    pub climate: String,
    #[serde(default)]
    pub gravity: String,
    #[serde(default)]
    pub terrain: String,
    #[serde(default)]
    pub surface_water: String,
    #[serde(default)]
    pub population: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// A SWAPI species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub average_height: String,
    #[serde(default)]
    pub skin_colors: String,
    #[serde(default)]
    pub hair_colors: String,
    #[serde(default)]
    pub eye_colors: String,
    #[serde(default)]
    pub average_lifespan: String,
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// A SWAPI starship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub cost_in_credits: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub max_atmosphering_speed: String,
    #[serde(default)]
    pub crew: String,
    #[serde(default)]
    pub passengers: String,
    #[serde(default)]
    pub cargo_capacity: String,
    #[serde(default)]
    pub consumables: String,
    #[serde(default)]
    pub hyperdrive_rating: String,
    #[serde(rename = "MGLT", default)]
    pub mglt: String,
    #[serde(default)]
    pub starship_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// A SWAPI (non-starship) vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub cost_in_credits: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub max_atmosphering_speed: String,
    #[serde(default)]
    pub crew: String,
    #[serde(default)]
    pub passengers: String,
    #[serde(default)]
    pub cargo_capacity: String,
    #[serde(default)]
    pub consumables: String,
    #[serde(default)]
    pub vehicle_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// A SWAPI film
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    #[serde(default)]
    pub episode_id: u32,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// Any SWAPI record, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReferenceRecord {
    Person(Person),
    Planet(Planet),
    Species(Species),
    Starship(Starship),
    Vehicle(Vehicle),
    Film(Film),
}

impl ReferenceRecord {
    /// Decodes a raw SWAPI item into the record type for `kind`
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not match the record schema.
    pub fn from_value(kind: ReferenceKind, value: serde_json::Value) -> Result<Self, String> {
        let record = match kind {
            ReferenceKind::People => serde_json::from_value(value).map(Self::Person),
            ReferenceKind::Planets => serde_json::from_value(value).map(Self::Planet),
            ReferenceKind::Species => serde_json::from_value(value).map(Self::Species),
            ReferenceKind::Starships => serde_json::from_value(value).map(Self::Starship),
            ReferenceKind::Vehicles => serde_json::from_value(value).map(Self::Vehicle),
            ReferenceKind::Films => serde_json::from_value(value).map(Self::Film),
        };
        record.map_err(|e| format!("Invalid {kind} record: {e}"))
    }

    /// Kind of this record
    pub fn kind(&self) -> ReferenceKind {
        match self {
            ReferenceRecord::Person(_) => ReferenceKind::People,
            ReferenceRecord::Planet(_) => ReferenceKind::Planets,
            ReferenceRecord::Species(_) => ReferenceKind::Species,
            ReferenceRecord::Starship(_) => ReferenceKind::Starships,
            ReferenceRecord::Vehicle(_) => ReferenceKind::Vehicles,
            ReferenceRecord::Film(_) => ReferenceKind::Films,
        }
    }
}

impl Named for ReferenceRecord {
    fn name(&self) -> &str {
        match self {
            ReferenceRecord::Person(r) => r.name(),
            ReferenceRecord::Planet(r) => r.name(),
            ReferenceRecord::Species(r) => r.name(),
            ReferenceRecord::Starship(r) => r.name(),
            ReferenceRecord::Vehicle(r) => r.name(),
            ReferenceRecord::Film(r) => r.name(),
        }
    }
}

/// Typed access to one variant of [`ReferenceRecord`]
pub trait ReferenceEntity: Named + Clone + Send + Sync + 'static {
    /// SWAPI kind holding this record type
    const KIND: ReferenceKind;

    /// Reference URL identifying this record
    fn url(&self) -> &str;

    /// Unwraps the matching variant
    fn from_record(record: ReferenceRecord) -> Option<Self>;
}

macro_rules! reference_entity {
    ($ty:ident, $variant:ident, $kind:expr, $name:ident) => {
        impl Named for $ty {
            fn name(&self) -> &str {
                &self.$name
            }
        }

        impl ReferenceEntity for $ty {
            const KIND: ReferenceKind = $kind;

            fn url(&self) -> &str {
                &self.url
            }

            fn from_record(record: ReferenceRecord) -> Option<Self> {
                match record {
                    ReferenceRecord::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ReferenceRecord {
            fn from(record: $ty) -> Self {
                ReferenceRecord::$variant(record)
            }
        }
    };
}

reference_entity!(Person, Person, ReferenceKind::People, name);
reference_entity!(Planet, Planet, ReferenceKind::Planets, name);
reference_entity!(Species, Species, ReferenceKind::Species, name);
reference_entity!(Starship, Starship, ReferenceKind::Starships, name);
reference_entity!(Vehicle, Vehicle, ReferenceKind::Vehicles, name);
reference_entity!(Film, Film, ReferenceKind::Films, title);

/// Match target for canonical vehicles: SWAPI splits craft into two catalogs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Craft {
    Starship(Starship),
    Vehicle(Vehicle),
}

impl Craft {
    /// Pilot references of either craft type
    pub fn pilots(&self) -> &[String] {
        match self {
            Craft::Starship(s) => &s.pilots,
            Craft::Vehicle(v) => &v.pilots,
        }
    }

    /// Film references of either craft type
    pub fn films(&self) -> &[String] {
        match self {
            Craft::Starship(s) => &s.films,
            Craft::Vehicle(v) => &v.films,
        }
    }
}

impl Named for Craft {
    fn name(&self) -> &str {
        match self {
            Craft::Starship(s) => &s.name,
            Craft::Vehicle(v) => &v.name,
        }
    }
}
