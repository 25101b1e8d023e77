//! Catalog store: the read-only collection every query runs against.
//!
//! A catalog is validated once when it is built and never changes afterwards.
//! The controller shares it behind an `Arc` with its pending debounce task.

use crate::error::{FinderError, Result};
use crate::model::{Recipe, ALL};
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../data/kenyan_recipes.json");

/// On-disk shape of a catalog document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<String>,
    recipes: Vec<Recipe>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<String>,
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Build a catalog, checking the record invariants.
    ///
    /// `categories` is the ordered label list shown to users and must contain
    /// the `"All"` sentinel. Every recipe needs a unique non-empty id, a
    /// category from that list (other than `"All"`) and a rating in `[0, 5]`.
    pub fn new(categories: Vec<String>, recipes: Vec<Recipe>) -> Result<Self> {
        if !categories.iter().any(|c| c == ALL) {
            return Err(FinderError::InvalidCatalog(format!(
                "category list must contain \"{}\"",
                ALL
            )));
        }

        let mut seen = HashSet::with_capacity(recipes.len());
        for recipe in &recipes {
            if recipe.id.trim().is_empty() {
                return Err(FinderError::InvalidCatalog(format!(
                    "recipe \"{}\" has an empty id",
                    recipe.name
                )));
            }
            if !seen.insert(recipe.id.as_str()) {
                return Err(FinderError::InvalidCatalog(format!(
                    "duplicate recipe id \"{}\"",
                    recipe.id
                )));
            }
            if recipe.category == ALL || !categories.contains(&recipe.category) {
                return Err(FinderError::InvalidCatalog(format!(
                    "recipe \"{}\" has unknown category \"{}\"",
                    recipe.id, recipe.category
                )));
            }
            if !(0.0..=5.0).contains(&recipe.rating) {
                return Err(FinderError::InvalidCatalog(format!(
                    "recipe \"{}\" has rating {} outside 0-5",
                    recipe.id, recipe.rating
                )));
            }
        }

        Ok(Self {
            categories,
            recipes,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.categories, file.recipes)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} recipes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The Kenyan recipe collection compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Category labels in display order, including the `"All"` sentinel.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
