//! # Selection Controller
//!
//! Owns the [`FilterState`], the published [`ResultSet`] and the list/detail
//! view mode, and is the only thing the view layer talks to.
//!
//! ## Load states
//!
//! ```text
//!   Idle ──edit──▶ Loading ──debounce elapsed──▶ Ready
//!                    ▲  │                          │
//!                    └──┘ edit (restart timer)     │
//!                    ▲                             │
//!                    └───────────edit──────────────┘
//! ```
//!
//! Every edit aborts the pending debounce task and schedules a fresh one, so
//! only the last filter state in a burst of edits is ever evaluated. Each
//! schedule also bumps a generation number, and a task only publishes if its
//! generation is still current when it writes to the snapshot channel. A task
//! that was already past its sleep when it got aborted therefore cannot
//! overwrite newer state.
//!
//! Snapshots are published through a [`tokio::sync::watch`] channel; see
//! [`SelectionController::subscribe`].

use crate::catalog::Catalog;
use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::filter::{matching_positions, DifficultyFilter, FilterState};
use crate::model::Recipe;
use crate::stats::{aggregate, Stats};
use log::{debug, warn};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    /// Nothing has been edited yet; the full catalog is shown.
    Idle,
    /// An edit is waiting out the debounce delay.
    Loading,
    /// The latest filter state has been evaluated and published.
    Ready,
}

/// Which perspective the view should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Detail(String),
}

/// The catalog subsequence matching a filter state, in catalog order.
#[derive(Clone)]
pub struct ResultSet {
    catalog: Arc<Catalog>,
    positions: Arc<[usize]>,
}

impl ResultSet {
    fn new(catalog: Arc<Catalog>, positions: Vec<usize>) -> Self {
        Self {
            catalog,
            positions: positions.into(),
        }
    }

    fn everything(catalog: Arc<Catalog>) -> Self {
        let positions = (0..catalog.len()).collect();
        Self::new(catalog, positions)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> + '_ {
        let recipes = self.catalog.recipes();
        self.positions.iter().map(move |&p| &recipes[p])
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|r| r.id == id)
    }

    /// e.g. "Showing 3 of 12 recipes"
    pub fn summary(&self) -> String {
        format!("Showing {} of {} recipes", self.len(), self.catalog.len())
    }
}

impl PartialEq for ResultSet {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions
    }
}

impl fmt::Debug for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSet")
            .field("ids", &self.ids())
            .field("catalog_len", &self.catalog.len())
            .finish()
    }
}

/// What the view renders from: published on every state transition.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub load_state: LoadState,
    /// Filter state the pending or published results belong to
    pub filter: FilterState,
    pub results: ResultSet,
    /// Incremented on every edit
    pub generation: u64,
    /// Number of result sets published since start
    pub publications: u64,
}

#[derive(Debug)]
pub struct SelectionController {
    catalog: Arc<Catalog>,
    stats: Stats,
    filter: FilterState,
    view: ViewMode,
    debounce: Duration,
    runtime: Handle,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    snapshot: Arc<watch::Sender<Snapshot>>,
}

impl SelectionController {
    /// Create a controller over `catalog`. Must be called from within a tokio
    /// runtime, which is used to run the debounce timer.
    pub fn new(catalog: Catalog, debounce: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            FinderError::RuntimeError(format!("no tokio runtime available: {}", e))
        })?;

        let catalog = Arc::new(catalog);
        let stats = aggregate(catalog.recipes());
        let filter = FilterState::default();
        let (snapshot, _) = watch::channel(Snapshot {
            load_state: LoadState::Idle,
            filter: filter.clone(),
            results: ResultSet::everything(Arc::clone(&catalog)),
            generation: 0,
            publications: 0,
        });

        Ok(Self {
            catalog,
            stats,
            filter,
            view: ViewMode::List,
            debounce,
            runtime,
            generation: 0,
            pending: None,
            snapshot: Arc::new(snapshot),
        })
    }

    /// Load the configured catalog (or the bundled one) and build a controller.
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::bundled()?,
        };
        Self::new(catalog, config.debounce())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[String] {
        self.catalog.categories()
    }

    /// Whole-catalog statistics; independent of the filter state.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active()
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    pub fn load_state(&self) -> LoadState {
        self.snapshot.borrow().load_state
    }

    /// Most recently published results. While loading this is still the
    /// previous result set.
    pub fn results(&self) -> ResultSet {
        self.snapshot.borrow().results.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Wait until the latest edit has been evaluated and return that snapshot.
    pub async fn settled(&self) -> Snapshot {
        let generation = self.generation;
        let mut receiver = self.snapshot.subscribe();
        let settled = match receiver
            .wait_for(|s| s.generation == generation && s.load_state != LoadState::Loading)
            .await
        {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.filter.query {
            return;
        }
        self.filter.query = query;
        self.schedule();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if category == self.filter.category {
            return;
        }
        if !self.catalog.categories().contains(&category) {
            warn!("Category '{}' is not in the catalog's category list", category);
        }
        self.filter.category = category;
        self.schedule();
    }

    pub fn set_difficulty(&mut self, difficulty: DifficultyFilter) {
        if difficulty == self.filter.difficulty {
            return;
        }
        self.filter.difficulty = difficulty;
        self.schedule();
    }

    /// Reset every selection to its default. Always re-runs the debounce
    /// cycle, even when nothing was active.
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        debug!("Clearing all filters");
        self.schedule();
    }

    /// Pick a recipe uniformly from the full catalog and show its detail view.
    pub fn pick_random(&mut self) -> Option<&Recipe> {
        self.pick_random_with(&mut rand::rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Recipe> {
        if self.catalog.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.catalog.len());
        let recipe = &self.catalog.recipes()[index];
        debug!("Random pick: {}", recipe.id);
        self.view = ViewMode::Detail(recipe.id.clone());
        Some(recipe)
    }

    pub fn select_recipe(&mut self, id: &str) -> Result<&Recipe> {
        let recipe = self
            .catalog
            .get(id)
            .ok_or_else(|| FinderError::UnknownRecipe(id.to_string()))?;
        self.view = ViewMode::Detail(recipe.id.clone());
        Ok(recipe)
    }

    /// The recipe shown in the detail view, if any.
    pub fn selected_recipe(&self) -> Option<&Recipe> {
        match &self.view {
            ViewMode::Detail(id) => self.catalog.get(id),
            ViewMode::List => None,
        }
    }

    pub fn back(&mut self) {
        self.view = ViewMode::List;
    }

    fn schedule(&mut self) {
        if let Some(task) = self.pending.take() {
            if !task.is_finished() {
                debug!("Cancelling pending filter run (generation {})", self.generation);
            }
            task.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let filter = self.filter.clone();

        self.snapshot.send_modify(|s| {
            s.load_state = LoadState::Loading;
            s.filter = filter.clone();
            s.generation = generation;
        });
        debug!(
            "Scheduled filter run {} in {:?}: {:?}",
            generation, self.debounce, filter
        );

        let catalog = Arc::clone(&self.catalog);
        let sender = Arc::clone(&self.snapshot);
        let delay = self.debounce;

        self.pending = Some(self.runtime.spawn(async move {
            sleep(delay).await;

            let positions = matching_positions(catalog.recipes(), &filter);
            let results = ResultSet::new(catalog, positions);
            let count = results.len();

            let published = publish_results(&sender, generation, results);

            if published {
                debug!("Published {} results for run {}", count, generation);
            } else {
                debug!("Discarded stale results for run {}", generation);
            }
        }));
    }
}

/// Publish `results` as ready unless a newer edit has superseded `generation`.
fn publish_results(
    sender: &watch::Sender<Snapshot>,
    generation: u64,
    results: ResultSet,
) -> bool {
    sender.send_if_modified(move |s| {
        if s.generation != generation {
            return false;
        }
        s.load_state = LoadState::Ready;
        s.results = results;
        s.publications += 1;
        true
    })
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
