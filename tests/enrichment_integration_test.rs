//! End-to-end enrichment runs against in-memory sources

use async_trait::async_trait;
use holonet::adapters::databank::SourceFeed;
use holonet::adapters::swapi::ReferenceCatalog;
use holonet::config::{EnrichmentConfig, HolonetConfig};
use holonet::core::cache::CatalogCache;
use holonet::core::enrich::{EnrichmentEngine, ResourceListing};
use holonet::domain::{
    CanonicalRecord, HolonetError, MatchStrategy, ReferenceId, ReferenceKind, ReferenceRecord,
    ResourceKind, Result, SourceError,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const SWAPI: &str = "https://swapi.test/api";

fn url(kind: &str, id: u32) -> String {
    format!("{SWAPI}/{kind}/{id}/")
}

#[derive(Default)]
struct MemoryFeed {
    listings: HashMap<ResourceKind, Vec<Value>>,
}

impl MemoryFeed {
    fn with(mut self, kind: ResourceKind, items: Vec<Value>) -> Self {
        self.listings.insert(kind, items);
        self
    }
}

#[async_trait]
impl SourceFeed for MemoryFeed {
    async fn fetch_listing(&self, kind: ResourceKind) -> Vec<CanonicalRecord> {
        self.listings
            .get(&kind)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| CanonicalRecord::from_value(kind, item).ok())
            .collect()
    }
}

#[derive(Default)]
struct MemoryCatalog {
    catalogs: HashMap<ReferenceKind, Vec<Value>>,
    failing_items: HashSet<String>,
    delays_ms: HashMap<String, u64>,
    paged: HashMap<ReferenceKind, (u32, Duration)>,
    offline: AtomicBool,
    catalog_calls: AtomicUsize,
    item_calls: AtomicUsize,
}

impl MemoryCatalog {
    fn with(mut self, kind: ReferenceKind, items: Vec<Value>) -> Self {
        self.catalogs.insert(kind, items);
        self
    }

    fn failing(mut self, item_url: String) -> Self {
        self.failing_items.insert(item_url);
        self
    }

    fn delayed(mut self, item_url: String, ms: u64) -> Self {
        self.delays_ms.insert(item_url, ms);
        self
    }

    /// Serves `kind` as `pages` pages, each taking `per_page`
    fn paged(mut self, kind: ReferenceKind, pages: u32, per_page: Duration) -> Self {
        self.paged.insert(kind, (pages, per_page));
        self
    }
}

#[async_trait]
impl ReferenceCatalog for MemoryCatalog {
    async fn fetch_catalog(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(SourceError::ConnectionFailed(SWAPI.to_string()).into());
        }
        if let Some((pages, per_page)) = self.paged.get(&kind) {
            for _ in 0..*pages {
                tokio::time::sleep(*per_page).await;
            }
        }
        Ok(self
            .catalogs
            .get(&kind)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| ReferenceRecord::from_value(kind, item).ok())
            .collect())
    }

    async fn fetch_by_id(&self, kind: ReferenceKind, id: ReferenceId) -> Result<ReferenceRecord> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        let item_url = url(kind.as_str(), id.get());

        if let Some(ms) = self.delays_ms.get(&item_url) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.offline.load(Ordering::SeqCst) || self.failing_items.contains(&item_url) {
            return Err(HolonetError::Source(SourceError::ServerError {
                status: 502,
                message: "bad gateway".to_string(),
            }));
        }

        let item = self
            .catalogs
            .get(&kind)
            .and_then(|items| items.iter().find(|item| item["url"] == item_url.as_str()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(item_url.clone()))?;
        ReferenceRecord::from_value(kind, item).map_err(|e| SourceError::InvalidFormat(e).into())
    }
}

fn canonical(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("About {name}"),
        "image": format!("https://databank.test/{id}.webp")
    })
}

fn reference_catalog() -> MemoryCatalog {
    MemoryCatalog::default()
        .with(
            ReferenceKind::People,
            vec![
                json!({
                    "name": "Luke Skywalker",
                    "homeworld": url("planets", 1),
                    "films": [url("films", 1)],
                    "url": url("people", 1)
                }),
                json!({
                    "name": "Darth Vader",
                    "homeworld": url("planets", 1),
                    "url": url("people", 4)
                }),
                json!({
                    "name": "Leia Organa",
                    "homeworld": url("planets", 2),
                    "films": [url("films", 1), url("films", 2)],
                    "url": url("people", 5)
                }),
            ],
        )
        .with(
            ReferenceKind::Planets,
            vec![
                json!({"name": "Tatooine", "residents": [url("people", 1), url("people", 4)], "url": url("planets", 1)}),
                json!({"name": "Alderaan", "residents": [url("people", 5)], "url": url("planets", 2)}),
            ],
        )
        .with(
            ReferenceKind::Films,
            vec![
                json!({"title": "A New Hope", "episode_id": 4, "characters": [url("people", 1), url("people", 5)], "url": url("films", 1)}),
                json!({"title": "The Empire Strikes Back", "episode_id": 5, "url": url("films", 2)}),
            ],
        )
}

fn engine(feed: MemoryFeed, catalog: Arc<MemoryCatalog>) -> EnrichmentEngine {
    EnrichmentEngine::new(
        Arc::new(feed),
        catalog,
        Arc::new(CatalogCache::default()),
        &EnrichmentConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_leia_keeps_homeworld_when_a_film_fails() {
    let feed = MemoryFeed::default().with(
        ResourceKind::Characters,
        vec![canonical("c5", "Leia Organa")],
    );
    let catalog = Arc::new(reference_catalog().failing(url("films", 2)));
    let engine = engine(feed, catalog);

    let characters = engine.characters().await;

    assert_eq!(characters.len(), 1);
    let leia = &characters[0];
    assert_eq!(leia.match_strategy, Some(MatchStrategy::Exact));
    assert_eq!(
        leia.homeworld_details.as_ref().map(|p| p.name.as_str()),
        Some("Alderaan")
    );
    let films: Vec<&str> = leia.films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(films, vec!["A New Hope"]);
}

#[tokio::test(start_paused = true)]
async fn test_output_follows_canonical_order() {
    let feed = MemoryFeed::default().with(
        ResourceKind::Characters,
        vec![
            canonical("c1", "Luke Skywalker"),
            canonical("c9", "Ahsoka Tano"),
            canonical("c4", "Vader"),
            canonical("c5", "Leia Organa"),
        ],
    );
    // Luke's relations finish last.
    let catalog = Arc::new(reference_catalog().delayed(url("planets", 1), 500));
    let engine = engine(feed, catalog);

    let characters = engine.characters().await;

    let ids: Vec<&str> = characters.iter().map(|c| c.character.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c9", "c4", "c5"]);

    assert_eq!(characters[0].match_strategy, Some(MatchStrategy::Exact));
    assert!(!characters[1].is_matched());
    assert_eq!(characters[2].match_strategy, Some(MatchStrategy::Substring));
    assert_eq!(
        characters[2].swapi_data.as_ref().map(|p| p.name.as_str()),
        Some("Darth Vader")
    );
}

#[tokio::test(start_paused = true)]
async fn test_organizations_pass_through_unchanged() {
    let items = vec![
        json!({
            "_id": "o1",
            "name": "Rebel Alliance",
            "description": "Resistance movement",
            "image": "https://databank.test/o1.webp"
        }),
        json!({
            "_id": "o2",
            "name": "Galactic Empire",
            "description": "Ruling government",
            "image": "https://databank.test/o2.webp"
        }),
    ];
    let feed = MemoryFeed::default().with(ResourceKind::Organizations, items.clone());
    let catalog = Arc::new(reference_catalog());
    let engine = engine(feed, Arc::clone(&catalog));

    let listing = engine.resource(ResourceKind::Organizations).await;

    let ResourceListing::Organizations(organizations) = &listing else {
        panic!("expected organizations, got {:?}", listing.kind());
    };
    assert_eq!(organizations.len(), 2);
    assert_eq!(organizations[0].name, "Rebel Alliance");
    assert_eq!(organizations[1].description, "Ruling government");
    assert_eq!(catalog.catalog_calls.load(Ordering::SeqCst), 0);
    assert_eq!(catalog.item_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_swapi_degrades_to_canonical_records() {
    let feed = MemoryFeed::default().with(
        ResourceKind::Locations,
        vec![canonical("l1", "Tatooine"), canonical("l2", "Alderaan")],
    );
    let catalog = reference_catalog();
    catalog.offline.store(true, Ordering::SeqCst);
    let engine = engine(feed, Arc::new(catalog));

    let (listing, summary) = engine.resource_with_summary(ResourceKind::Locations).await;

    let ResourceListing::Locations(locations) = listing else {
        panic!("expected locations");
    };
    assert_eq!(locations.len(), 2);
    assert!(locations.iter().all(|l| !l.is_matched()));
    assert_eq!(summary.unmatched, 2);
    assert_eq!(
        summary.degraded_catalogs,
        vec![ReferenceKind::Planets, ReferenceKind::People, ReferenceKind::Films]
    );
}

#[tokio::test(start_paused = true)]
async fn test_stale_catalog_served_when_swapi_goes_down() {
    let feed = MemoryFeed::default().with(
        ResourceKind::Locations,
        vec![canonical("l1", "Tatooine")],
    );
    let catalog = Arc::new(reference_catalog());
    let engine = engine(feed, Arc::clone(&catalog));

    let first = engine.locations().await;
    assert_eq!(first[0].residents.len(), 2);

    tokio::time::advance(Duration::from_secs(301)).await;
    catalog.offline.store(true, Ordering::SeqCst);

    let second = engine.locations().await;
    assert!(second[0].is_matched());
    assert_eq!(
        second[0].swapi_data.as_ref().map(|p| p.name.as_str()),
        Some("Tatooine")
    );
    let residents: Vec<&str> = second[0].residents.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(residents, vec!["Luke Skywalker", "Darth Vader"]);
}

#[tokio::test(start_paused = true)]
async fn test_films_are_built_from_the_swapi_catalog() {
    let engine = engine(MemoryFeed::default(), Arc::new(reference_catalog()));

    let films = engine.films().await;

    assert_eq!(films.len(), 2);
    assert_eq!(films[0].film.id, "1");
    assert_eq!(films[0].film.title, "A New Hope");
    let cast: Vec<&str> = films[0].characters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(cast, vec!["Luke Skywalker", "Leia Organa"]);
    assert!(films[1].characters.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_empty_canonical_listing_yields_empty_result() {
    let engine = engine(MemoryFeed::default(), Arc::new(reference_catalog()));

    let (listing, summary) = engine.resource_with_summary(ResourceKind::Species).await;

    assert!(listing.is_empty());
    assert_eq!(summary.total_records, 0);
}

#[tokio::test(start_paused = true)]
async fn test_enriched_character_serialization() {
    let feed = MemoryFeed::default().with(
        ResourceKind::Characters,
        vec![canonical("c5", "Leia Organa"), canonical("c9", "Ahsoka Tano")],
    );
    let engine = engine(feed, Arc::new(reference_catalog()));

    let listing = engine.resource(ResourceKind::Characters).await;
    let value = serde_json::to_value(&listing).unwrap();

    assert_eq!(value[0]["id"], "c5");
    assert_eq!(value[0]["name"], "Leia Organa");
    assert_eq!(value[0]["swapi_data"]["name"], "Leia Organa");
    assert_eq!(value[0]["homeworld_details"]["name"], "Alderaan");
    assert_eq!(value[0]["match_strategy"], "exact");
    assert!(value[1].get("swapi_data").is_none());
    assert!(value[1].get("films").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_slow_paged_catalog_is_not_abandoned() {
    // 20 pages of 4s each: every request is within the client timeout, the
    // whole drain is longer than the record fetch timeout.
    let feed = MemoryFeed::default().with(
        ResourceKind::Characters,
        vec![canonical("c1", "Luke Skywalker")],
    );
    let catalog = Arc::new(reference_catalog().paged(
        ReferenceKind::People,
        20,
        Duration::from_secs(4),
    ));
    let engine = EnrichmentEngine::new(
        Arc::new(feed),
        catalog,
        Arc::new(CatalogCache::new(&HolonetConfig::default().cache)),
        &EnrichmentConfig::default(),
    );

    let (listing, summary) = engine.resource_with_summary(ResourceKind::Characters).await;

    assert_eq!(listing.len(), 1);
    assert_eq!(summary.matched, 1);
    assert!(summary.is_complete(), "degraded: {:?}", summary.degraded_catalogs);
    assert!(HolonetConfig::default().cache.fetch_timeout() < Duration::from_secs(80));
}

#[tokio::test(start_paused = true)]
async fn test_species_resolve_homeworld_people_and_films() {
    let feed = MemoryFeed::default().with(
        ResourceKind::Species,
        vec![canonical("s1", "Human"), canonical("s2", "Droid")],
    );
    let catalog = reference_catalog()
        .with(
            ReferenceKind::Species,
            vec![
                json!({
                    "name": "Human",
                    "homeworld": url("planets", 2),
                    "people": [url("people", 5), url("people", 99), url("people", 1)],
                    "films": [url("films", 2), url("films", 1)],
                    "url": url("species", 1)
                }),
                json!({
                    "name": "Droid",
                    "homeworld": null,
                    "people": [],
                    "url": url("species", 2)
                }),
            ],
        )
        .failing(url("films", 2));
    let engine = engine(feed, Arc::new(catalog));

    let (listing, summary) = engine.resource_with_summary(ResourceKind::Species).await;

    let ResourceListing::Species(species) = listing else {
        panic!("expected species");
    };
    assert_eq!(species.len(), 2);
    assert_eq!(summary.matched, 2);

    let human = &species[0];
    assert_eq!(human.match_strategy, Some(MatchStrategy::Exact));
    assert_eq!(
        human.homeworld_details.as_ref().map(|p| p.name.as_str()),
        Some("Alderaan")
    );
    let people: Vec<&str> = human.people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(people, vec!["Leia Organa", "Luke Skywalker"]);
    let films: Vec<&str> = human.films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(films, vec!["A New Hope"]);

    let droid = &species[1];
    assert!(droid.is_matched());
    assert!(droid.homeworld_details.is_none());
    assert!(droid.people.is_empty());
    assert!(droid.films.is_empty());
}
