//! Price-update pipeline: eligibility, resolution, pacing, reporting.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{CsItem, PacingPolicy, RunReport, SkipReason, UpdateOutcome};
use crate::error::ServiceError;
use crate::market::{ListingsQuery, ListingsSource};
use crate::persistence::PriceStore;

/// Orchestration layer for price-update runs.
///
/// Owns references to a [`ListingsSource`] for market data and a
/// [`PriceStore`] for the catalog and price history. Both are injected
/// at construction so invocations never share hidden state. Every run
/// follows the pattern: load items → partition per policy → resolve and
/// write each item → fold outcomes into a [`RunReport`].
#[derive(Clone)]
pub struct PriceUpdateService {
    market: Arc<dyn ListingsSource>,
    store: Arc<dyn PriceStore>,
    listing_limit: u32,
}

impl std::fmt::Debug for PriceUpdateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceUpdateService")
            .field("listing_limit", &self.listing_limit)
            .finish_non_exhaustive()
    }
}

impl PriceUpdateService {
    /// Creates a new `PriceUpdateService`.
    ///
    /// `listing_limit` bounds how many listings are requested per item;
    /// only the first (lowest-priced) one is ever accepted.
    #[must_use]
    pub fn new(
        market: Arc<dyn ListingsSource>,
        store: Arc<dyn PriceStore>,
        listing_limit: u32,
    ) -> Self {
        Self {
            market,
            store,
            listing_limit,
        }
    }

    /// Decides eligibility and resolves a price for one item.
    ///
    /// An item is skipped (not failed) when it has no `def_index`, when
    /// both wear bounds are absent, or when the query returns zero
    /// listings. Otherwise the first listing's price is authoritative —
    /// the API sorts ascending, so that is the lowest offer. Adapter
    /// failures become a `Failed` outcome for this item only.
    pub async fn resolve_item(&self, item: &CsItem) -> UpdateOutcome {
        let Some(def_index) = item.def_index else {
            return UpdateOutcome::Skipped(SkipReason::MissingDefIndex);
        };
        if item.min_float.is_none() && item.max_float.is_none() {
            return UpdateOutcome::Skipped(SkipReason::MissingFloatRange);
        }

        let query = ListingsQuery {
            def_index,
            paint_index: item.paint_index,
            min_float: item.min_float,
            max_float: item.max_float,
            category: Some(item.category.as_i16()),
            limit: self.listing_limit,
        };

        match self.market.fetch_listings(&query).await {
            Ok(listings) => match listings.first() {
                Some(lowest) => UpdateOutcome::Updated {
                    item_id: item.id,
                    price_cents: lowest.price,
                },
                None => UpdateOutcome::Skipped(SkipReason::NoListings),
            },
            Err(e) => UpdateOutcome::Failed(format!("{}: {e}", item.label())),
        }
    }

    /// Resolves one item and appends its price row on success.
    ///
    /// A write failure downgrades the outcome to `Failed` for this item
    /// only; sibling items are unaffected.
    pub async fn process_item(&self, item: &CsItem) -> UpdateOutcome {
        match self.resolve_item(item).await {
            UpdateOutcome::Updated {
                item_id,
                price_cents,
            } => {
                if let Err(e) = self.store.insert_price(item_id, price_cents).await {
                    let message = format!("{}: {e}", item.label());
                    tracing::error!(%message, "price write failed");
                    return UpdateOutcome::Failed(message);
                }
                tracing::info!(item = %item.label(), price_cents, "price updated");
                UpdateOutcome::Updated {
                    item_id,
                    price_cents,
                }
            }
            UpdateOutcome::Skipped(reason) => {
                tracing::debug!(item = %item.label(), %reason, "item skipped");
                UpdateOutcome::Skipped(reason)
            }
            UpdateOutcome::Failed(message) => {
                tracing::error!(%message, "price resolution failed");
                UpdateOutcome::Failed(message)
            }
        }
    }

    /// Runs a full update over every tracked item under the given
    /// pacing policy and returns the aggregated report.
    ///
    /// Items are processed in groups of `policy.group_size`, all items
    /// within a group concurrently, with `policy.pause` between groups
    /// (never after the last). Failed items are recorded and left for
    /// the next run — nothing is retried within a run.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] only when the item set itself cannot
    /// be loaded; per-item failures are folded into the report instead.
    pub async fn run(&self, policy: &PacingPolicy) -> Result<RunReport, ServiceError> {
        let items = self.store.list_items().await?;
        let mut report = RunReport::new(items.len());
        if items.is_empty() {
            tracing::info!("no items to update");
            return Ok(report);
        }

        tracing::info!(
            total = items.len(),
            group_size = policy.group_size,
            pause_ms = policy.pause.as_millis() as u64,
            "starting price update"
        );

        for (index, group) in items.chunks(policy.group_size.max(1)).enumerate() {
            if index > 0 {
                tokio::time::sleep(policy.pause).await;
            }
            let outcomes = join_all(group.iter().map(|item| self.process_item(item))).await;
            for outcome in outcomes {
                report.record(outcome);
            }
        }

        tracing::info!(
            success = report.success,
            failed = report.failed,
            skipped = report.skipped,
            "price update completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::time::Instant;

    use super::*;
    use crate::domain::{ItemCategory, ItemId};
    use crate::market::Listing;

    fn make_item(
        id: i64,
        def_index: Option<i64>,
        min_float: Option<f64>,
        max_float: Option<f64>,
    ) -> CsItem {
        CsItem {
            id: ItemId::new(id),
            def_index,
            def_name: format!("Skin {id}"),
            paint_index: None,
            paint_name: None,
            min_float,
            max_float,
            category: ItemCategory::Weapon,
            market_hash_name: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn eligible_item(id: i64) -> CsItem {
        make_item(id, Some(id * 10), Some(0.0), Some(1.0))
    }

    fn listing(price: i64) -> Listing {
        Listing {
            id: String::new(),
            price,
            wear_value: None,
            def_index: None,
            paint_index: None,
            market_hash_name: None,
        }
    }

    /// Returns the same listings for every query, counting calls.
    struct StaticSource {
        listings: Vec<Listing>,
        calls: Mutex<usize>,
    }

    impl StaticSource {
        fn new(listings: Vec<Listing>) -> Self {
            Self {
                listings,
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().map(|c| *c).unwrap_or(0)
        }
    }

    #[async_trait]
    impl ListingsSource for StaticSource {
        async fn fetch_listings(
            &self,
            _query: &ListingsQuery,
        ) -> Result<Vec<Listing>, ServiceError> {
            if let Ok(mut calls) = self.calls.lock() {
                *calls += 1;
            }
            Ok(self.listings.clone())
        }
    }

    /// Fails queries for one def_index, succeeds for the rest.
    struct FlakySource {
        fail_def_index: i64,
        price: i64,
    }

    #[async_trait]
    impl ListingsSource for FlakySource {
        async fn fetch_listings(
            &self,
            query: &ListingsQuery,
        ) -> Result<Vec<Listing>, ServiceError> {
            if query.def_index == self.fail_def_index {
                return Err(ServiceError::Upstream("csfloat returned 503".to_string()));
            }
            Ok(vec![listing(self.price)])
        }
    }

    /// Records when each fetch starts and simulates upstream latency.
    struct PacedSource {
        delay: Duration,
        starts: Mutex<Vec<Instant>>,
    }

    impl PacedSource {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                starts: Mutex::new(Vec::new()),
            }
        }

        fn start_offsets(&self) -> Vec<Duration> {
            let starts = self.starts.lock().map(|s| s.clone()).unwrap_or_default();
            let Some(first) = starts.first().copied() else {
                return Vec::new();
            };
            starts.iter().map(|t| t.duration_since(first)).collect()
        }
    }

    #[async_trait]
    impl ListingsSource for PacedSource {
        async fn fetch_listings(
            &self,
            _query: &ListingsQuery,
        ) -> Result<Vec<Listing>, ServiceError> {
            if let Ok(mut starts) = self.starts.lock() {
                starts.push(Instant::now());
            }
            tokio::time::sleep(self.delay).await;
            Ok(vec![listing(9_000)])
        }
    }

    /// In-memory store: fixed item set, appended rows captured.
    struct MemoryStore {
        items: Vec<CsItem>,
        rows: Mutex<Vec<(ItemId, i64)>>,
        fail_writes: bool,
    }

    impl MemoryStore {
        fn new(items: Vec<CsItem>) -> Self {
            Self {
                items,
                rows: Mutex::new(Vec::new()),
                fail_writes: false,
            }
        }

        fn failing_writes(items: Vec<CsItem>) -> Self {
            Self {
                items,
                rows: Mutex::new(Vec::new()),
                fail_writes: true,
            }
        }

        fn rows(&self) -> Vec<(ItemId, i64)> {
            self.rows.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl PriceStore for MemoryStore {
        async fn list_items(&self) -> Result<Vec<CsItem>, ServiceError> {
            Ok(self.items.clone())
        }

        async fn insert_price(
            &self,
            item_id: ItemId,
            price_cents: i64,
        ) -> Result<(), ServiceError> {
            if self.fail_writes {
                return Err(ServiceError::PersistenceError(
                    "insert rejected".to_string(),
                ));
            }
            if let Ok(mut rows) = self.rows.lock() {
                rows.push((item_id, price_cents));
            }
            Ok(())
        }
    }

    /// Store whose item load always fails.
    struct BrokenStore;

    #[async_trait]
    impl PriceStore for BrokenStore {
        async fn list_items(&self) -> Result<Vec<CsItem>, ServiceError> {
            Err(ServiceError::PersistenceError(
                "connection refused".to_string(),
            ))
        }

        async fn insert_price(&self, _: ItemId, _: i64) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn make_service(
        source: Arc<dyn ListingsSource>,
        store: Arc<dyn PriceStore>,
    ) -> PriceUpdateService {
        PriceUpdateService::new(source, store, 5)
    }

    #[tokio::test]
    async fn item_without_def_index_is_skipped() {
        let source = Arc::new(StaticSource::new(vec![listing(100)]));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(vec![]));
        let service = make_service(Arc::clone(&source) as Arc<dyn ListingsSource>, store);

        let item = make_item(1, None, Some(0.0), Some(1.0));
        let outcome = service.resolve_item(&item).await;
        assert_eq!(
            outcome,
            UpdateOutcome::Skipped(SkipReason::MissingDefIndex)
        );
        // Ineligible items never reach the network.
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn item_without_float_range_is_skipped() {
        let source = Arc::new(StaticSource::new(vec![listing(100)]));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(vec![]));
        let service = make_service(Arc::clone(&source) as Arc<dyn ListingsSource>, store);

        let item = make_item(1, Some(7), None, None);
        let outcome = service.resolve_item(&item).await;
        assert_eq!(
            outcome,
            UpdateOutcome::Skipped(SkipReason::MissingFloatRange)
        );
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn one_float_bound_is_enough_for_eligibility() {
        let source: Arc<dyn ListingsSource> = Arc::new(StaticSource::new(vec![listing(500)]));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(vec![]));
        let service = make_service(source, store);

        let item = make_item(1, Some(7), Some(0.15), None);
        let outcome = service.resolve_item(&item).await;
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                item_id: ItemId::new(1),
                price_cents: 500,
            }
        );
    }

    #[tokio::test]
    async fn resolver_accepts_first_listing_from_sorted_response() {
        let source: Arc<dyn ListingsSource> =
            Arc::new(StaticSource::new(vec![listing(90), listing(100), listing(150)]));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(vec![]));
        let service = make_service(source, store);

        let outcome = service.resolve_item(&eligible_item(1)).await;
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                item_id: ItemId::new(1),
                price_cents: 90,
            }
        );
    }

    #[tokio::test]
    async fn resolver_trusts_api_order_over_min_scan_or_average() {
        // Deliberately unsorted: first-element semantics yield 100,
        // a min-by-scan would yield 90 and an average 113.
        let source: Arc<dyn ListingsSource> =
            Arc::new(StaticSource::new(vec![listing(100), listing(150), listing(90)]));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(vec![]));
        let service = make_service(source, store);

        let outcome = service.resolve_item(&eligible_item(1)).await;
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                item_id: ItemId::new(1),
                price_cents: 100,
            }
        );
    }

    #[tokio::test]
    async fn zero_listings_skip_without_writing() {
        let source: Arc<dyn ListingsSource> = Arc::new(StaticSource::new(vec![]));
        let store = Arc::new(MemoryStore::new(vec![eligible_item(1)]));
        let service = make_service(source, Arc::clone(&store) as Arc<dyn PriceStore>);

        let report = service
            .run(&PacingPolicy::concurrent(5, Duration::from_secs(1)))
            .await;
        let Ok(report) = report else {
            panic!("run failed");
        };
        assert_eq!(report.skipped, 1);
        assert_eq!(report.success, 0);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn failure_of_one_item_does_not_affect_siblings() {
        let items = vec![eligible_item(1), eligible_item(2)];
        let source: Arc<dyn ListingsSource> = Arc::new(FlakySource {
            fail_def_index: 10, // item 1
            price: 4_200,
        });
        let store = Arc::new(MemoryStore::new(items));
        let service = make_service(source, Arc::clone(&store) as Arc<dyn PriceStore>);

        let report = service
            .run(&PacingPolicy::concurrent(5, Duration::from_secs(1)))
            .await;
        let Ok(report) = report else {
            panic!("run failed");
        };
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.success, 1);
        assert_eq!(report.errors.len(), 1);
        let Some(error) = report.errors.first() else {
            panic!("missing error message");
        };
        assert!(error.contains("item 1 (Skin 1)"));
        // Item 2's row was written despite item 1's failure.
        assert_eq!(store.rows(), vec![(ItemId::new(2), 4_200)]);
    }

    #[tokio::test]
    async fn write_failure_is_an_item_failure_not_a_run_abort() {
        let store = Arc::new(MemoryStore::failing_writes(vec![
            eligible_item(1),
            make_item(2, None, None, None),
        ]));
        let source: Arc<dyn ListingsSource> = Arc::new(StaticSource::new(vec![listing(100)]));
        let service = make_service(source, Arc::clone(&store) as Arc<dyn PriceStore>);

        let report = service
            .run(&PacingPolicy::concurrent(5, Duration::from_secs(1)))
            .await;
        let Ok(report) = report else {
            panic!("run failed");
        };
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.success, 0);
    }

    #[tokio::test]
    async fn repeated_runs_append_rather_than_update() {
        let store = Arc::new(MemoryStore::new(vec![eligible_item(1)]));
        let source: Arc<dyn ListingsSource> = Arc::new(StaticSource::new(vec![listing(777)]));
        let service = make_service(source, Arc::clone(&store) as Arc<dyn PriceStore>);

        let policy = PacingPolicy::concurrent(5, Duration::from_secs(1));
        for _ in 0..2 {
            let report = service.run(&policy).await;
            let Ok(report) = report else {
                panic!("run failed");
            };
            assert_eq!(report.success, 1);
        }
        // Two rows with equal cents — append-only history, no upsert.
        assert_eq!(
            store.rows(),
            vec![(ItemId::new(1), 777), (ItemId::new(1), 777)]
        );
    }

    #[tokio::test]
    async fn empty_item_set_short_circuits() {
        let source = Arc::new(StaticSource::new(vec![listing(100)]));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(vec![]));
        let service = make_service(Arc::clone(&source) as Arc<dyn ListingsSource>, store);

        let report = service
            .run(&PacingPolicy::concurrent(5, Duration::from_secs(1)))
            .await;
        let Ok(report) = report else {
            panic!("run failed");
        };
        assert!(report.is_empty());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn item_load_failure_is_run_fatal() {
        let source: Arc<dyn ListingsSource> = Arc::new(StaticSource::new(vec![]));
        let store: Arc<dyn PriceStore> = Arc::new(BrokenStore);
        let service = make_service(source, store);

        let result = service
            .run(&PacingPolicy::concurrent(5, Duration::from_secs(1)))
            .await;
        assert!(matches!(result, Err(ServiceError::PersistenceError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn batch_mode_dispatches_groups_with_pauses_between() {
        // 12 items in groups of 5 → groups of 5, 5, 2. Each fetch takes
        // 100 ms of simulated upstream latency; the pause is 1 s.
        let items: Vec<CsItem> = (1..=12).map(eligible_item).collect();
        let source = Arc::new(PacedSource::new(Duration::from_millis(100)));
        let store = Arc::new(MemoryStore::new(items));
        let service = make_service(
            Arc::clone(&source) as Arc<dyn ListingsSource>,
            Arc::clone(&store) as Arc<dyn PriceStore>,
        );

        let started = Instant::now();
        let report = service
            .run(&PacingPolicy::concurrent(5, Duration::from_secs(1)))
            .await;
        let elapsed = started.elapsed();

        let Ok(report) = report else {
            panic!("run failed");
        };
        assert_eq!(report.success, 12);
        assert_eq!(store.rows().len(), 12);

        let offsets = source.start_offsets();
        assert_eq!(offsets.len(), 12);
        // Every item in a group starts at the same paused-clock instant
        // (concurrent dispatch: item N+1 does not wait for item N), and
        // each group starts one fetch-latency plus one pause after the
        // previous group.
        for (index, offset) in offsets.iter().enumerate() {
            let group = index / 5;
            let expected = Duration::from_millis(group as u64 * 1_100);
            assert_eq!(*offset, expected, "item {index} started off-schedule");
        }
        // Three groups: two pauses, three rounds of latency — and no
        // trailing pause after the final group.
        assert_eq!(elapsed, Duration::from_millis(2_300));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_mode_is_sequential_with_long_pauses() {
        let items: Vec<CsItem> = (1..=3).map(eligible_item).collect();
        let source = Arc::new(PacedSource::new(Duration::from_millis(100)));
        let store: Arc<dyn PriceStore> = Arc::new(MemoryStore::new(items));
        let service = make_service(Arc::clone(&source) as Arc<dyn ListingsSource>, store);

        let report = service
            .run(&PacingPolicy::sequential(Duration::from_secs(10)))
            .await;
        let Ok(report) = report else {
            panic!("run failed");
        };
        assert_eq!(report.success, 3);

        let offsets = source.start_offsets();
        // Strictly one at a time: each request starts only after the
        // previous one finished and the 10 s pause elapsed.
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(10_100),
                Duration::from_millis(20_200),
            ]
        );
    }
}
