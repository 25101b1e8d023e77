use crate::model::{Recipe, STREET_FOODS, VEGETARIAN_TAG};
use serde::Serialize;

/// Summary figures over the whole catalog. Filters never affect these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub vegetarian_count: usize,
    pub street_food_count: usize,
    /// Mean rating rounded to one decimal place, `0.0` for an empty catalog.
    pub average_rating: f64,
}

pub fn aggregate(recipes: &[Recipe]) -> Stats {
    if recipes.is_empty() {
        return Stats::default();
    }

    let vegetarian_count = recipes.iter().filter(|r| r.has_tag(VEGETARIAN_TAG)).count();
    let street_food_count = recipes
        .iter()
        .filter(|r| r.category == STREET_FOODS)
        .count();
    let rating_sum: f64 = recipes.iter().map(|r| r.rating).sum();

    Stats {
        total: recipes.len(),
        vegetarian_count,
        street_food_count,
        average_rating: round_to_tenth(rating_sum / recipes.len() as f64),
    }
}

/// Round through the decimal expansion so binary ties such as 4.35
/// (stored as 4.3499...) round down, the way a fixed one-place display does.
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn rated(recipes: &[Recipe], ratings: &[f64]) -> Vec<Recipe> {
        recipes
            .iter()
            .zip(ratings)
            .map(|(recipe, &rating)| Recipe {
                rating,
                ..recipe.clone()
            })
            .collect()
    }

    #[test]
    fn test_empty_catalog_has_zero_stats() {
        let stats = aggregate(&[]);
        assert_eq!(
            stats,
            Stats {
                total: 0,
                vegetarian_count: 0,
                street_food_count: 0,
                average_rating: 0.0,
            }
        );
    }

    #[test]
    fn test_average_of_three_ratings() {
        let catalog = Catalog::bundled().unwrap();
        let recipes = rated(catalog.recipes(), &[4.0, 5.0, 3.0]);
        assert_eq!(recipes.len(), 3);
        assert_eq!(aggregate(&recipes).average_rating, 4.0);
    }

    #[test]
    fn test_average_is_rounded_to_one_decimal() {
        let catalog = Catalog::bundled().unwrap();
        let recipes = rated(catalog.recipes(), &[4.0, 4.0, 4.5]);
        // 12.5 / 3 = 4.1666...
        assert_eq!(aggregate(&recipes).average_rating, 4.2);
    }

    #[test]
    fn test_average_rounds_binary_ties_by_decimal_expansion() {
        let catalog = Catalog::bundled().unwrap();
        let recipes = rated(catalog.recipes(), &[4.3, 4.4]);
        assert_eq!(aggregate(&recipes).average_rating, 4.3);
    }

    #[test]
    fn test_bundled_catalog_stats() {
        let catalog = Catalog::bundled().unwrap();
        let stats = aggregate(catalog.recipes());
        assert_eq!(stats.total, 12);
        assert_eq!(stats.vegetarian_count, 8);
        assert_eq!(stats.street_food_count, 3);
        assert_eq!(stats.average_rating, 4.6);
    }

    #[test]
    fn test_vegetarian_tag_match_is_exact() {
        let catalog = Catalog::bundled().unwrap();
        let mut recipe = catalog.recipes()[0].clone();
        recipe.tags = vec!["vegetarian".to_string(), "Vegetarian-ish".to_string()];
        assert_eq!(aggregate(&[recipe]).vegetarian_count, 0);
    }
}
