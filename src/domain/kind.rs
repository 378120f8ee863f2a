//! Resource kinds exposed by the two sources

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of resource the engine can list
///
/// Every kind except [`ResourceKind::Films`] is backed by a databank
/// endpoint. Films are driven by the SWAPI film catalog instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Characters,
    Droids,
    Species,
    Locations,
    Organizations,
    Vehicles,
    Films,
}

impl ResourceKind {
    /// All kinds, in menu order
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Characters,
        ResourceKind::Films,
        ResourceKind::Droids,
        ResourceKind::Species,
        ResourceKind::Locations,
        ResourceKind::Organizations,
        ResourceKind::Vehicles,
    ];

    /// Lowercase name, also the databank path segment
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Characters => "characters",
            ResourceKind::Droids => "droids",
            ResourceKind::Species => "species",
            ResourceKind::Locations => "locations",
            ResourceKind::Organizations => "organizations",
            ResourceKind::Vehicles => "vehicles",
            ResourceKind::Films => "films",
        }
    }

    /// Databank endpoint for this kind, if the databank lists it
    pub fn databank_endpoint(self) -> Option<String> {
        match self {
            ResourceKind::Films => None,
            kind => Some(format!("/{}", kind.as_str())),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "characters" => Ok(ResourceKind::Characters),
            "droids" => Ok(ResourceKind::Droids),
            "species" => Ok(ResourceKind::Species),
            "locations" => Ok(ResourceKind::Locations),
            "organizations" => Ok(ResourceKind::Organizations),
            "vehicles" => Ok(ResourceKind::Vehicles),
            "films" => Ok(ResourceKind::Films),
            other => Err(format!("Unknown resource type: {other}")),
        }
    }
}

/// Kinds of record in the SWAPI reference catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    People,
    Planets,
    Species,
    Starships,
    Vehicles,
    Films,
}

impl ReferenceKind {
    /// SWAPI path segment
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::People => "people",
            ReferenceKind::Planets => "planets",
            ReferenceKind::Species => "species",
            ReferenceKind::Starships => "starships",
            ReferenceKind::Vehicles => "vehicles",
            ReferenceKind::Films => "films",
        }
    }

    /// Cache key under which the full listing of this kind is stored
    pub fn catalog_key(self) -> String {
        format!("catalog:{}", self.as_str())
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
