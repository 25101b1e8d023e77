//! Recipe discovery over a small, static catalog.
//!
//! The catalog is small enough that every query is a full linear scan. The
//! crate has no view code of its own: a presentation layer drives a
//! [`SelectionController`] and renders the snapshots it publishes.
//!
//! - [`catalog`]: validated, read-only recipe collection
//! - [`filter`]: text, category and difficulty predicates
//! - [`stats`]: whole-catalog summary figures
//! - [`controller`]: debounced re-filtering, random pick, detail/back
//! - [`config`]: file and environment configuration

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod stats;

pub use catalog::Catalog;
pub use config::FinderConfig;
pub use controller::{LoadState, ResultSet, SelectionController, Snapshot, ViewMode};
pub use error::{FinderError, Result};
pub use filter::{filter, DifficultyFilter, FilterState};
pub use model::{Difficulty, Ingredient, Recipe, StarRating, ALL};
pub use stats::{aggregate, Stats};

/// Filter the bundled catalog once, without debouncing.
///
/// # Example
/// ```
/// let names = recipe_finder::search_bundled("choma").unwrap();
/// assert!(names.contains(&"Nyama Choma".to_string()));
/// ```
pub fn search_bundled(query: &str) -> Result<Vec<String>> {
    let catalog = Catalog::bundled()?;
    let state = FilterState::default().with_query(query);
    Ok(filter(catalog.recipes(), &state)
        .into_iter()
        .map(|r| r.name.clone())
        .collect())
}
