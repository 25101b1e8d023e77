//! Filter engine.
//!
//! Three predicates are combined with AND: a case-insensitive text match over
//! name, description, ingredient names and tags; an exact category match; and
//! an exact difficulty match. Each predicate is skipped when its selector is
//! empty or `"All"`. Output always keeps catalog order.

use crate::model::{Difficulty, Recipe, ALL};
use serde::Serialize;
use std::fmt;

/// Difficulty values offered as filters. `Hard` recipes exist in the data
/// model but there is no option that selects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DifficultyFilter {
    #[default]
    All,
    Easy,
    Medium,
}

impl DifficultyFilter {
    /// Options in the order the difficulty selector lists them.
    pub fn options() -> [DifficultyFilter; 3] {
        [
            DifficultyFilter::All,
            DifficultyFilter::Easy,
            DifficultyFilter::Medium,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyFilter::All => ALL,
            DifficultyFilter::Easy => "Easy",
            DifficultyFilter::Medium => "Medium",
        }
    }

    fn accepts(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Easy => difficulty == Difficulty::Easy,
            DifficultyFilter::Medium => difficulty == Difficulty::Medium,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The active search and filter selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub query: String,
    pub category: String,
    pub difficulty: DifficultyFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL.to_string(),
            difficulty: DifficultyFilter::All,
        }
    }
}

impl FilterState {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyFilter) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// True when any selection narrows the catalog.
    pub fn is_active(&self) -> bool {
        !normalize_query(&self.query).is_empty()
            || self.category != ALL
            || self.difficulty != DifficultyFilter::All
    }

    /// Evaluate all three predicates against one recipe.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        Matcher::new(self).matches(recipe)
    }
}

/// Lowercase and trim free text for case-insensitive matching.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// A `FilterState` with its query normalized once up front.
struct Matcher<'s> {
    needle: String,
    category: Option<&'s str>,
    difficulty: DifficultyFilter,
}

impl<'s> Matcher<'s> {
    fn new(state: &'s FilterState) -> Self {
        Self {
            needle: normalize_query(&state.query),
            category: (state.category != ALL).then_some(state.category.as_str()),
            difficulty: state.difficulty,
        }
    }

    fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_text(recipe)
            && self.category.map_or(true, |c| recipe.category == c)
            && self.difficulty.accepts(recipe.difficulty)
    }

    fn matches_text(&self, recipe: &Recipe) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.needle);

        hit(recipe.name.as_str())
            || hit(recipe.description.as_str())
            || recipe.ingredients.iter().any(|i| hit(i.name.as_str()))
            || recipe.tags.iter().any(|t| hit(t.as_str()))
    }
}

/// Return the recipes matching `state`, in their original order.
pub fn filter<'a, I>(recipes: I, state: &FilterState) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let matcher = Matcher::new(state);
    recipes
        .into_iter()
        .filter(|recipe| matcher.matches(recipe))
        .collect()
}

/// Catalog positions of the recipes matching `state`, ascending.
pub fn matching_positions(recipes: &[Recipe], state: &FilterState) -> Vec<usize> {
    let matcher = Matcher::new(state);
    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| matcher.matches(recipe))
        .map(|(position, _)| position)
        .collect()
}
