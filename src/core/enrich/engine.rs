//! Enrichment orchestration
//!
//! Each run loads the canonical listing and the SWAPI catalogs it needs
//! concurrently, pairs every canonical record with a catalog entry and
//! resolves the paired entry's relations. Records are enriched at most
//! `max_concurrency` at a time, in canonical order. Every failure below the
//! engine degrades the output instead of failing the run.

use super::listing::ResourceListing;
use super::summary::EnrichmentSummary;
use crate::adapters::databank::{DatabankClient, SourceFeed};
use crate::adapters::swapi::{ReferenceCatalog, SwapiClient};
use crate::config::{EnrichmentConfig, HolonetConfig};
use crate::core::cache::CatalogCache;
use crate::core::matcher::{find_match, AliasTable};
use crate::core::resolver::RelationResolver;
use crate::domain::reference::{self, Craft, Person, Planet, Starship};
use crate::domain::{
    canonical, CanonicalEntity, CanonicalRecord, Character, Droid, EnrichedCharacter,
    EnrichedFilm, EnrichedLocation, EnrichedSpecies, EnrichedVehicle, HolonetError, Location,
    MatchStrategy, Named, Organization, ReferenceEntity, ReferenceKind, ReferenceRecord,
    ResourceKind, Result,
};
use crate::{log_catalog_degraded, log_enrichment_start};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// A catalog as loaded for one run
struct LoadedCatalog {
    kind: ReferenceKind,
    records: Arc<Vec<ReferenceRecord>>,
    degraded: bool,
}

impl LoadedCatalog {
    fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }
}

/// Combines canonical records with their SWAPI counterparts
///
/// # Example
///
/// ```rust,no_run
/// use holonet::config::HolonetConfig;
/// use holonet::core::enrich::EnrichmentEngine;
///
/// # async fn example() -> holonet::domain::Result<()> {
/// let engine = EnrichmentEngine::from_config(&HolonetConfig::default())?;
///
/// for character in engine.characters().await {
///     let homeworld = character
///         .homeworld_details
///         .as_ref()
///         .map(|planet| planet.name.as_str())
///         .unwrap_or("unknown");
///     println!("{} ({homeworld})", character.character.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct EnrichmentEngine {
    feed: Arc<dyn SourceFeed>,
    catalog: Arc<dyn ReferenceCatalog>,
    cache: Arc<CatalogCache>,
    resolver: RelationResolver,
    aliases: AliasTable,
    max_concurrency: usize,
}

impl EnrichmentEngine {
    /// Creates an engine over the given sources and cache
    pub fn new(
        feed: Arc<dyn SourceFeed>,
        catalog: Arc<dyn ReferenceCatalog>,
        cache: Arc<CatalogCache>,
        config: &EnrichmentConfig,
    ) -> Self {
        let resolver = RelationResolver::new(
            Arc::clone(&catalog),
            Arc::clone(&cache),
            config.max_concurrency,
        );

        Self {
            feed,
            catalog,
            cache,
            resolver,
            aliases: AliasTable::new(&config.aliases),
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    /// Creates an engine talking to the configured databank and SWAPI
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &HolonetConfig) -> Result<Self> {
        let feed = Arc::new(DatabankClient::new(&config.databank)?);
        let catalog = Arc::new(SwapiClient::new(&config.swapi)?);
        let cache = Arc::new(CatalogCache::new(&config.cache));

        tracing::debug!(
            databank = %feed.base_url(),
            swapi = %catalog.base_url(),
            ttl_seconds = config.cache.ttl_seconds,
            "Enrichment engine configured"
        );

        Ok(Self::new(feed, catalog, cache, &config.enrichment))
    }

    /// Cache shared by this engine's runs
    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    /// Characters, matched against SWAPI people
    pub async fn characters(&self) -> Vec<EnrichedCharacter> {
        self.run_characters().await.0
    }

    /// Locations, matched against SWAPI planets
    pub async fn locations(&self) -> Vec<EnrichedLocation> {
        self.run_locations().await.0
    }

    /// Species, matched against SWAPI species
    pub async fn species(&self) -> Vec<EnrichedSpecies> {
        self.run_species().await.0
    }

    /// Vehicles, matched against SWAPI starships and then vehicles
    pub async fn vehicles(&self) -> Vec<EnrichedVehicle> {
        self.run_vehicles().await.0
    }

    /// SWAPI films with their relations resolved
    pub async fn films(&self) -> Vec<EnrichedFilm> {
        self.run_films().await.0
    }

    /// Droids, unchanged from the databank
    pub async fn droids(&self) -> Vec<Droid> {
        self.run_passthrough(ResourceKind::Droids).await.0
    }

    /// Organizations, unchanged from the databank
    pub async fn organizations(&self) -> Vec<Organization> {
        self.run_passthrough(ResourceKind::Organizations).await.0
    }

    /// Enriched records for `kind`
    pub async fn resource(&self, kind: ResourceKind) -> ResourceListing {
        self.resource_with_summary(kind).await.0
    }

    /// Enriched records for a kind given by name, e.g. `"locations"`
    ///
    /// # Errors
    ///
    /// Returns [`HolonetError::Validation`] for an unknown kind.
    pub async fn resource_named(&self, name: &str) -> Result<ResourceListing> {
        let kind: ResourceKind = name.parse().map_err(HolonetError::Validation)?;
        Ok(self.resource(kind).await)
    }

    /// Enriched records for `kind` together with the run summary
    pub async fn resource_with_summary(
        &self,
        kind: ResourceKind,
    ) -> (ResourceListing, EnrichmentSummary) {
        match kind {
            ResourceKind::Characters => {
                let (records, summary) = self.run_characters().await;
                (ResourceListing::Characters(records), summary)
            }
            ResourceKind::Locations => {
                let (records, summary) = self.run_locations().await;
                (ResourceListing::Locations(records), summary)
            }
            ResourceKind::Species => {
                let (records, summary) = self.run_species().await;
                (ResourceListing::Species(records), summary)
            }
            ResourceKind::Vehicles => {
                let (records, summary) = self.run_vehicles().await;
                (ResourceListing::Vehicles(records), summary)
            }
            ResourceKind::Films => {
                let (records, summary) = self.run_films().await;
                (ResourceListing::Films(records), summary)
            }
            ResourceKind::Droids => {
                let (records, summary) = self.run_passthrough(kind).await;
                (ResourceListing::Droids(records), summary)
            }
            ResourceKind::Organizations => {
                let (records, summary) = self.run_passthrough(kind).await;
                (ResourceListing::Organizations(records), summary)
            }
        }
    }

    async fn run_characters(&self) -> (Vec<EnrichedCharacter>, EnrichmentSummary) {
        let started = Instant::now();
        let mut summary = self.begin(ResourceKind::Characters);

        let (listing, people, planets, species, films, starships, vehicles) = tokio::join!(
            self.feed.fetch_listing(ResourceKind::Characters),
            self.load_catalog(ReferenceKind::People),
            self.load_catalog(ReferenceKind::Planets),
            self.load_catalog(ReferenceKind::Species),
            self.load_catalog(ReferenceKind::Films),
            self.load_catalog(ReferenceKind::Starships),
            self.load_catalog(ReferenceKind::Vehicles),
        );
        note_degraded(
            &mut summary,
            &[&people, &planets, &species, &films, &starships, &vehicles],
        );

        let characters: Vec<Character> = typed_listing(listing);
        let enriched = self
            .enrich_in_order(characters, |character| {
                self.enrich_character(character, people.records())
            })
            .await;

        enriched.iter().for_each(|r| summary.record(r.is_matched()));
        self.finish(enriched, summary, started)
    }

    async fn enrich_character(
        &self,
        character: Character,
        people: &[ReferenceRecord],
    ) -> EnrichedCharacter {
        let Some((person, strategy)) = self.match_in::<Person>(character.name(), people) else {
            return EnrichedCharacter::unmatched(character);
        };

        let (homeworld_details, species_details, films, starships, vehicles_piloted) = tokio::join!(
            self.resolver.resolve_one::<Planet>(person.homeworld.as_deref()),
            self.resolver.resolve::<reference::Species>(&person.species),
            self.resolver.resolve::<reference::Film>(&person.films),
            self.resolver.resolve::<Starship>(&person.starships),
            self.resolver.resolve::<reference::Vehicle>(&person.vehicles),
        );

        EnrichedCharacter {
            character,
            swapi_data: Some(person),
            match_strategy: Some(strategy),
            homeworld_details,
            species_details,
            films,
            starships,
            vehicles_piloted,
        }
    }

    async fn run_locations(&self) -> (Vec<EnrichedLocation>, EnrichmentSummary) {
        let started = Instant::now();
        let mut summary = self.begin(ResourceKind::Locations);

        let (listing, planets, people, films) = tokio::join!(
            self.feed.fetch_listing(ResourceKind::Locations),
            self.load_catalog(ReferenceKind::Planets),
            self.load_catalog(ReferenceKind::People),
            self.load_catalog(ReferenceKind::Films),
        );
        note_degraded(&mut summary, &[&planets, &people, &films]);

        let locations: Vec<Location> = typed_listing(listing);
        let enriched = self
            .enrich_in_order(locations, |location| {
                self.enrich_location(location, planets.records())
            })
            .await;

        enriched.iter().for_each(|r| summary.record(r.is_matched()));
        self.finish(enriched, summary, started)
    }

    async fn enrich_location(
        &self,
        location: Location,
        planets: &[ReferenceRecord],
    ) -> EnrichedLocation {
        let Some((planet, strategy)) = self.match_in::<Planet>(location.name(), planets) else {
            return EnrichedLocation::unmatched(location);
        };

        let (residents, films) = tokio::join!(
            self.resolver.resolve::<Person>(&planet.residents),
            self.resolver.resolve::<reference::Film>(&planet.films),
        );

        EnrichedLocation {
            location,
            swapi_data: Some(planet),
            match_strategy: Some(strategy),
            residents,
            films,
        }
    }

    async fn run_species(&self) -> (Vec<EnrichedSpecies>, EnrichmentSummary) {
        let started = Instant::now();
        let mut summary = self.begin(ResourceKind::Species);

        let (listing, species, people, planets, films) = tokio::join!(
            self.feed.fetch_listing(ResourceKind::Species),
            self.load_catalog(ReferenceKind::Species),
            self.load_catalog(ReferenceKind::People),
            self.load_catalog(ReferenceKind::Planets),
            self.load_catalog(ReferenceKind::Films),
        );
        note_degraded(&mut summary, &[&species, &people, &planets, &films]);

        let listed: Vec<canonical::Species> = typed_listing(listing);
        let enriched = self
            .enrich_in_order(listed, |entry| self.enrich_species(entry, species.records()))
            .await;

        enriched.iter().for_each(|r| summary.record(r.is_matched()));
        self.finish(enriched, summary, started)
    }

    async fn enrich_species(
        &self,
        species: canonical::Species,
        catalog: &[ReferenceRecord],
    ) -> EnrichedSpecies {
        let Some((matched, strategy)) =
            self.match_in::<reference::Species>(species.name(), catalog)
        else {
            return EnrichedSpecies::unmatched(species);
        };

        let (homeworld_details, people, films) = tokio::join!(
            self.resolver.resolve_one::<Planet>(matched.homeworld.as_deref()),
            self.resolver.resolve::<Person>(&matched.people),
            self.resolver.resolve::<reference::Film>(&matched.films),
        );

        EnrichedSpecies {
            species,
            swapi_data: Some(matched),
            match_strategy: Some(strategy),
            homeworld_details,
            people,
            films,
        }
    }

    async fn run_vehicles(&self) -> (Vec<EnrichedVehicle>, EnrichmentSummary) {
        let started = Instant::now();
        let mut summary = self.begin(ResourceKind::Vehicles);

        let (listing, starships, vehicles, people, films) = tokio::join!(
            self.feed.fetch_listing(ResourceKind::Vehicles),
            self.load_catalog(ReferenceKind::Starships),
            self.load_catalog(ReferenceKind::Vehicles),
            self.load_catalog(ReferenceKind::People),
            self.load_catalog(ReferenceKind::Films),
        );
        note_degraded(&mut summary, &[&starships, &vehicles, &people, &films]);

        let listed: Vec<canonical::Vehicle> = typed_listing(listing);
        let enriched = self
            .enrich_in_order(listed, |vehicle| {
                self.enrich_vehicle(vehicle, starships.records(), vehicles.records())
            })
            .await;

        enriched.iter().for_each(|r| summary.record(r.is_matched()));
        self.finish(enriched, summary, started)
    }

    async fn enrich_vehicle(
        &self,
        vehicle: canonical::Vehicle,
        starships: &[ReferenceRecord],
        vehicles: &[ReferenceRecord],
    ) -> EnrichedVehicle {
        let craft = self
            .match_in::<Starship>(vehicle.name(), starships)
            .map(|(ship, strategy)| (Craft::Starship(ship), strategy))
            .or_else(|| {
                self.match_in::<reference::Vehicle>(vehicle.name(), vehicles)
                    .map(|(v, strategy)| (Craft::Vehicle(v), strategy))
            });

        let Some((craft, strategy)) = craft else {
            return EnrichedVehicle::unmatched(vehicle);
        };

        let (pilots, films) = tokio::join!(
            self.resolver.resolve::<Person>(craft.pilots()),
            self.resolver.resolve::<reference::Film>(craft.films()),
        );

        EnrichedVehicle {
            vehicle,
            swapi_data: Some(craft),
            match_strategy: Some(strategy),
            pilots,
            films,
        }
    }

    async fn run_films(&self) -> (Vec<EnrichedFilm>, EnrichmentSummary) {
        let started = Instant::now();
        let mut summary = self.begin(ResourceKind::Films);

        let (films, people, planets, species, starships, vehicles) = tokio::join!(
            self.load_catalog(ReferenceKind::Films),
            self.load_catalog(ReferenceKind::People),
            self.load_catalog(ReferenceKind::Planets),
            self.load_catalog(ReferenceKind::Species),
            self.load_catalog(ReferenceKind::Starships),
            self.load_catalog(ReferenceKind::Vehicles),
        );
        note_degraded(
            &mut summary,
            &[&films, &people, &planets, &species, &starships, &vehicles],
        );

        let listed: Vec<reference::Film> = films
            .records()
            .iter()
            .cloned()
            .filter_map(reference::Film::from_record)
            .collect();
        let enriched = self
            .enrich_in_order(listed, |film| self.enrich_film(film))
            .await;

        // Every film is its own SWAPI counterpart.
        enriched.iter().for_each(|_| summary.record(true));
        self.finish(enriched, summary, started)
    }

    async fn enrich_film(&self, film: reference::Film) -> EnrichedFilm {
        let (characters, planets, species, starships, vehicles) = tokio::join!(
            self.resolver.resolve::<Person>(&film.characters),
            self.resolver.resolve::<Planet>(&film.planets),
            self.resolver.resolve::<reference::Species>(&film.species),
            self.resolver.resolve::<Starship>(&film.starships),
            self.resolver.resolve::<reference::Vehicle>(&film.vehicles),
        );

        EnrichedFilm {
            characters,
            planets,
            species,
            starships,
            vehicles,
            ..EnrichedFilm::from_reference(film)
        }
    }

    async fn run_passthrough<T: CanonicalEntity>(
        &self,
        kind: ResourceKind,
    ) -> (Vec<T>, EnrichmentSummary) {
        let started = Instant::now();
        let mut summary = self.begin(kind);

        let records: Vec<T> = typed_listing(self.feed.fetch_listing(kind).await);

        records.iter().for_each(|_| summary.record(false));
        self.finish(records, summary, started)
    }

    /// Runs `enrich` over `records` with bounded concurrency, keeping order
    async fn enrich_in_order<R, T, F, Fut>(&self, records: Vec<R>, enrich: F) -> Vec<T>
    where
        F: FnMut(R) -> Fut,
        Fut: Future<Output = T>,
    {
        stream::iter(records)
            .map(enrich)
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    fn begin(&self, kind: ResourceKind) -> EnrichmentSummary {
        log_enrichment_start!(kind);
        EnrichmentSummary::new(kind)
    }

    fn finish<T>(
        &self,
        records: Vec<T>,
        summary: EnrichmentSummary,
        started: Instant,
    ) -> (Vec<T>, EnrichmentSummary) {
        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        (records, summary)
    }

    /// Loads a catalog through the cache, or an empty one if unavailable
    async fn load_catalog(&self, kind: ReferenceKind) -> LoadedCatalog {
        let catalog = Arc::clone(&self.catalog);
        let loaded = self
            .cache
            .catalog(kind, || async move { catalog.fetch_catalog(kind).await })
            .await;

        match loaded {
            Some(records) => LoadedCatalog {
                kind,
                records,
                degraded: false,
            },
            None => {
                log_catalog_degraded!(kind, "no cached copy to fall back on");
                LoadedCatalog {
                    kind,
                    records: Arc::new(Vec::new()),
                    degraded: true,
                }
            }
        }
    }

    /// Matches `name` within a catalog and unwraps the typed record
    fn match_in<T: ReferenceEntity>(
        &self,
        name: &str,
        catalog: &[ReferenceRecord],
    ) -> Option<(T, MatchStrategy)> {
        let hit = find_match(name, catalog, &self.aliases)?;
        tracing::trace!(
            name = %name,
            matched = %hit.record.name(),
            strategy = ?hit.strategy,
            "Matched reference record"
        );
        T::from_record(hit.record.clone()).map(|record| (record, hit.strategy))
    }
}

fn note_degraded(summary: &mut EnrichmentSummary, catalogs: &[&LoadedCatalog]) {
    for catalog in catalogs.iter().filter(|c| c.degraded) {
        summary.add_degraded(catalog.kind);
    }
}

/// Unwraps the listing into its record type, dropping foreign variants
fn typed_listing<T: CanonicalEntity>(records: Vec<CanonicalRecord>) -> Vec<T> {
    records.into_iter().filter_map(T::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReferenceId, SourceError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeFeed {
        listings: HashMap<ResourceKind, Vec<Value>>,
    }

    #[async_trait]
    impl SourceFeed for FakeFeed {
        async fn fetch_listing(&self, kind: ResourceKind) -> Vec<CanonicalRecord> {
            self.listings
                .get(&kind)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter_map(|v| CanonicalRecord::from_value(kind, v).ok())
                .collect()
        }
    }

    #[derive(Default)]
    struct FakeCatalog {
        catalogs: HashMap<ReferenceKind, Vec<Value>>,
        failing_catalogs: Vec<ReferenceKind>,
        catalog_calls: AtomicUsize,
        item_requests: Mutex<Vec<String>>,
        item_latency: Option<Duration>,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl FakeCatalog {
        fn find(&self, kind: ReferenceKind, id: ReferenceId) -> Option<Value> {
            let suffix = format!("/{}/{}/", kind.as_str(), id);
            self.catalogs
                .get(&kind)?
                .iter()
                .find(|v| v["url"].as_str().is_some_and(|u| u.ends_with(&suffix)))
                .cloned()
        }
    }

    #[async_trait]
    impl ReferenceCatalog for FakeCatalog {
        async fn fetch_catalog(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>> {
            self.catalog_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_catalogs.contains(&kind) {
                return Err(SourceError::Timeout(kind.to_string()).into());
            }
            Ok(self
                .catalogs
                .get(&kind)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter_map(|v| ReferenceRecord::from_value(kind, v).ok())
                .collect())
        }

        async fn fetch_by_id(&self, kind: ReferenceKind, id: ReferenceId) -> Result<ReferenceRecord> {
            self.item_requests
                .lock()
                .unwrap()
                .push(format!("{kind}/{id}"));

            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
            if let Some(latency) = self.item_latency {
                tokio::time::sleep(latency).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let value = self
                .find(kind, id)
                .ok_or_else(|| SourceError::NotFound(format!("{kind}/{id}")))?;
            ReferenceRecord::from_value(kind, value)
                .map_err(|e| SourceError::InvalidFormat(e).into())
        }
    }

    fn swapi(kind: &str, id: u32) -> String {
        format!("https://swapi.test/api/{kind}/{id}/")
    }

    fn engine(feed: FakeFeed, catalog: Arc<FakeCatalog>) -> EnrichmentEngine {
        EnrichmentEngine::new(
            Arc::new(feed),
            catalog,
            Arc::new(CatalogCache::default()),
            &EnrichmentConfig::default(),
        )
    }

    fn falcon_fixture() -> (FakeFeed, FakeCatalog) {
        let mut feed = FakeFeed::default();
        feed.listings.insert(
            ResourceKind::Vehicles,
            vec![
                json!({"_id": "v1", "name": "Millennium Falcon", "description": "", "image": ""}),
                json!({"_id": "v2", "name": "Snowspeeder", "description": "", "image": ""}),
                json!({"_id": "v3", "name": "Podracer", "description": "", "image": ""}),
            ],
        );

        let mut catalog = FakeCatalog::default();
        catalog.catalogs.insert(
            ReferenceKind::Starships,
            vec![json!({
                "name": "Millennium Falcon",
                "pilots": [swapi("people", 14)],
                "url": swapi("starships", 10)
            })],
        );
        catalog.catalogs.insert(
            ReferenceKind::Vehicles,
            vec![json!({
                "name": "Snowspeeder",
                "films": [swapi("films", 2)],
                "url": swapi("vehicles", 14)
            })],
        );
        catalog.catalogs.insert(
            ReferenceKind::People,
            vec![json!({"name": "Han Solo", "url": swapi("people", 14)})],
        );
        catalog.catalogs.insert(
            ReferenceKind::Films,
            vec![json!({"title": "The Empire Strikes Back", "episode_id": 5, "url": swapi("films", 2)})],
        );
        (feed, catalog)
    }

    #[tokio::test]
    async fn test_vehicles_match_starships_then_vehicles() {
        let (feed, catalog) = falcon_fixture();
        let engine = engine(feed, Arc::new(catalog));

        let (vehicles, summary) = engine.run_vehicles().await;

        assert_eq!(vehicles.len(), 3);
        assert!(matches!(vehicles[0].swapi_data, Some(Craft::Starship(_))));
        assert_eq!(vehicles[0].pilots[0].name, "Han Solo");
        assert!(matches!(vehicles[1].swapi_data, Some(Craft::Vehicle(_))));
        assert_eq!(vehicles[1].films[0].title, "The Empire Strikes Back");
        assert!(!vehicles[2].is_matched());

        assert_eq!(summary.matched, 2);
        assert_eq!(summary.unmatched, 1);
        assert!(summary.is_complete());
    }

    #[tokio::test]
    async fn test_catalogs_are_shared_across_runs() {
        let (feed, catalog) = falcon_fixture();
        let catalog = Arc::new(catalog);
        let engine = engine(feed, Arc::clone(&catalog));

        engine.vehicles().await;
        let after_first = catalog.catalog_calls.load(Ordering::SeqCst);
        engine.vehicles().await;

        assert_eq!(after_first, 4);
        assert_eq!(catalog.catalog_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_degraded_catalog_is_reported() {
        let (feed, mut catalog) = falcon_fixture();
        catalog.failing_catalogs.push(ReferenceKind::Starships);
        let engine = engine(feed, Arc::new(catalog));

        let (vehicles, summary) = engine.run_vehicles().await;

        assert_eq!(vehicles.len(), 3);
        assert!(!vehicles[0].is_matched());
        assert!(vehicles[1].is_matched());
        assert_eq!(summary.degraded_catalogs, vec![ReferenceKind::Starships]);
    }

    #[tokio::test]
    async fn test_unmatched_records_resolve_nothing() {
        let mut feed = FakeFeed::default();
        feed.listings.insert(
            ResourceKind::Locations,
            vec![json!({"_id": "l1", "name": "Lothal", "description": "", "image": ""})],
        );
        let catalog = Arc::new(FakeCatalog::default());
        let engine = engine(feed, Arc::clone(&catalog));

        let locations = engine.locations().await;

        assert_eq!(locations.len(), 1);
        assert!(!locations[0].is_matched());
        assert!(catalog.item_requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_records_are_enriched_with_bounded_concurrency() {
        let planets = ["Tatooine", "Alderaan", "Hoth", "Dagobah", "Endor", "Naboo"];

        let mut feed = FakeFeed::default();
        feed.listings.insert(
            ResourceKind::Locations,
            planets
                .iter()
                .enumerate()
                .map(|(i, name)| json!({"_id": format!("l{i}"), "name": name}))
                .collect(),
        );

        let mut catalog = FakeCatalog {
            item_latency: Some(Duration::from_millis(100)),
            ..FakeCatalog::default()
        };
        catalog.catalogs.insert(
            ReferenceKind::Planets,
            planets
                .iter()
                .zip(1u32..)
                .map(|(name, id)| {
                    json!({"name": name, "residents": [swapi("people", id)], "url": swapi("planets", id)})
                })
                .collect(),
        );
        catalog.catalogs.insert(
            ReferenceKind::People,
            (1u32..=6)
                .map(|id| json!({"name": format!("Resident {id}"), "url": swapi("people", id)}))
                .collect(),
        );
        let catalog = Arc::new(catalog);

        let config = EnrichmentConfig {
            max_concurrency: 2,
            ..EnrichmentConfig::default()
        };
        let engine = EnrichmentEngine::new(
            Arc::new(feed),
            Arc::clone(&catalog) as Arc<dyn ReferenceCatalog>,
            Arc::new(CatalogCache::default()),
            &config,
        );

        let locations = engine.locations().await;

        let names: Vec<&str> = locations.iter().map(|l| l.location.name.as_str()).collect();
        assert_eq!(names, planets);
        assert!(locations.iter().all(|l| l.residents.len() == 1));
        assert_eq!(catalog.item_requests.lock().unwrap().len(), 6);
        assert_eq!(catalog.peak_in_flight.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resource_named_rejects_unknown_kind() {
        let engine = engine(FakeFeed::default(), Arc::new(FakeCatalog::default()));

        let err = engine.resource_named("wookiees").await.unwrap_err();

        assert!(matches!(err, HolonetError::Validation(_)));
        assert!(err.to_string().contains("Unknown resource type: wookiees"));
    }

    #[tokio::test]
    async fn test_resource_dispatches_by_kind() {
        let (feed, catalog) = falcon_fixture();
        let engine = engine(feed, Arc::new(catalog));

        let (listing, summary) = engine.resource_with_summary(ResourceKind::Films).await;

        assert_eq!(listing.kind(), ResourceKind::Films);
        assert_eq!(listing.len(), 1);
        assert_eq!(summary.kind, ResourceKind::Films);
        assert_eq!(summary.total_records, 1);
    }
}
