//! Reference catalog caching
//!
//! [`TtlCache`] is the generic read-through cache; [`CatalogCache`] pairs
//! two of them, one for whole SWAPI catalogs and one for single records
//! fetched through relation URLs.

pub mod catalog;
pub mod ttl;

pub use catalog::CatalogCache;
pub use ttl::TtlCache;
