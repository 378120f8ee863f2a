//! Enriched composite records
//!
//! An enriched record is a canonical record plus its matched SWAPI
//! counterpart (if any) plus the SWAPI records reached through that
//! counterpart's relation references. Canonical fields are flattened into
//! the serialized record; empty relation groups are omitted.

use super::canonical::{self, Character, Location};
use super::ids::ReferenceId;
use super::reference::{self, Craft, Person, Planet, Starship};
use serde::{Deserialize, Serialize};

/// Placeholder artwork for films, which the databank does not list
pub const FILM_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=600&h=400&fit=crop&crop=top";

/// Length of the crawl excerpt used as a film description
const FILM_DESCRIPTION_CHARS: usize = 200;

/// Which matcher step paired a canonical record with a SWAPI record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Case-insensitive equality
    Exact,
    /// Case-insensitive containment in either direction
    Substring,
    /// Alias rule from the configured table
    Alias,
}

/// Character enriched with its SWAPI person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCharacter {
    #[serde(flatten)]
    pub character: Character,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapi_data: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeworld_details: Option<Planet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub species_details: Vec<reference::Species>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub films: Vec<reference::Film>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub starships: Vec<Starship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vehicles_piloted: Vec<reference::Vehicle>,
}

impl EnrichedCharacter {
    /// Character with no SWAPI counterpart
    pub fn unmatched(character: Character) -> Self {
        Self {
            character,
            swapi_data: None,
            match_strategy: None,
            homeworld_details: None,
            species_details: Vec::new(),
            films: Vec::new(),
            starships: Vec::new(),
            vehicles_piloted: Vec::new(),
        }
    }

    /// Whether a SWAPI counterpart was found
    pub fn is_matched(&self) -> bool {
        self.swapi_data.is_some()
    }
}

/// Location enriched with its SWAPI planet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedLocation {
    #[serde(flatten)]
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapi_data: Option<Planet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub residents: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub films: Vec<reference::Film>,
}

impl EnrichedLocation {
    /// Location with no SWAPI counterpart
    pub fn unmatched(location: Location) -> Self {
        Self {
            location,
            swapi_data: None,
            match_strategy: None,
            residents: Vec::new(),
            films: Vec::new(),
        }
    }

    /// Whether a SWAPI counterpart was found
    pub fn is_matched(&self) -> bool {
        self.swapi_data.is_some()
    }
}

/// Species enriched with its SWAPI species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSpecies {
    #[serde(flatten)]
    pub species: canonical::Species,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapi_data: Option<reference::Species>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeworld_details: Option<Planet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub people: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub films: Vec<reference::Film>,
}

impl EnrichedSpecies {
    /// Species with no SWAPI counterpart
    pub fn unmatched(species: canonical::Species) -> Self {
        Self {
            species,
            swapi_data: None,
            match_strategy: None,
            homeworld_details: None,
            people: Vec::new(),
            films: Vec::new(),
        }
    }

    /// Whether a SWAPI counterpart was found
    pub fn is_matched(&self) -> bool {
        self.swapi_data.is_some()
    }
}

/// Vehicle enriched with its SWAPI starship or vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedVehicle {
    #[serde(flatten)]
    pub vehicle: canonical::Vehicle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapi_data: Option<Craft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pilots: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub films: Vec<reference::Film>,
}

impl EnrichedVehicle {
    /// Vehicle with no SWAPI counterpart
    pub fn unmatched(vehicle: canonical::Vehicle) -> Self {
        Self {
            vehicle,
            swapi_data: None,
            match_strategy: None,
            pilots: Vec::new(),
            films: Vec::new(),
        }
    }

    /// Whether a SWAPI counterpart was found
    pub fn is_matched(&self) -> bool {
        self.swapi_data.is_some()
    }
}

/// SWAPI film with its relation groups resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedFilm {
    #[serde(flatten)]
    pub film: canonical::Film,
    pub swapi_data: reference::Film,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub planets: Vec<Planet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<reference::Species>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub starships: Vec<Starship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<reference::Vehicle>,
}

impl EnrichedFilm {
    /// Film with its canonical view derived and no relations resolved yet
    pub fn from_reference(film: reference::Film) -> Self {
        Self {
            film: canonical_film(&film),
            swapi_data: film,
            characters: Vec::new(),
            planets: Vec::new(),
            species: Vec::new(),
            starships: Vec::new(),
            vehicles: Vec::new(),
        }
    }
}

/// Derives the canonical film view from a SWAPI film
///
/// The id is the numeric suffix of the film URL, falling back to the title
/// when the URL carries none.
pub fn canonical_film(film: &reference::Film) -> canonical::Film {
    let id = ReferenceId::from_url(&film.url)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| film.title.clone());

    let excerpt: String = film
        .opening_crawl
        .chars()
        .take(FILM_DESCRIPTION_CHARS)
        .collect();

    canonical::Film {
        id,
        title: film.title.clone(),
        episode_id: film.episode_id,
        opening_crawl: film.opening_crawl.clone(),
        director: film.director.clone(),
        producer: film.producer.clone(),
        release_date: film.release_date.clone(),
        description: format!("{excerpt}..."),
        image: FILM_PLACEHOLDER_IMAGE.to_string(),
    }
}
