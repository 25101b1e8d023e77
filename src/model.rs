use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label used only as a filter value meaning "no restriction".
pub const ALL: &str = "All";

/// Tag counted by the vegetarian statistic.
pub const VEGETARIAN_TAG: &str = "Vegetarian";

/// Category counted by the street food statistic.
pub const STREET_FOODS: &str = "Street Foods";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

/// A single catalog record. Never mutated once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Star breakdown for card rendering.
    pub fn stars(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }
}

/// How many full, half and empty stars represent a rating out of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarRating {
    pub const MAX: u8 = 5;

    pub fn from_rating(rating: f64) -> Self {
        let rating = rating.clamp(0.0, f64::from(Self::MAX));
        let full = rating.floor() as u8;
        let half = u8::from(rating.fract() >= 0.5);
        Self {
            full,
            half,
            empty: Self::MAX - full - half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_rating_with_half_star() {
        let stars = StarRating::from_rating(4.5);
        assert_eq!(
            stars,
            StarRating {
                full: 4,
                half: 1,
                empty: 0
            }
        );
    }

    #[test]
    fn test_star_rating_rounds_down_small_fractions() {
        let stars = StarRating::from_rating(3.2);
        assert_eq!(stars.full, 3);
        assert_eq!(stars.half, 0);
        assert_eq!(stars.empty, 2);
    }

    #[test]
    fn test_star_rating_bounds() {
        assert_eq!(StarRating::from_rating(0.0).empty, 5);
        assert_eq!(StarRating::from_rating(5.0).full, 5);
        assert_eq!(StarRating::from_rating(5.0).empty, 0);
    }

    #[test]
    fn test_recipe_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "chai",
            "name": "Chai",
            "description": "Spiced milk tea",
            "category": "Drinks",
            "difficulty": "Easy",
            "ingredients": [{"name": "Tea leaves", "quantity": "2 tsp"}],
            "tags": ["Vegetarian"],
            "rating": 4.9,
            "reviews": 310,
            "prepTime": "5 mins",
            "cookTime": "10 mins",
            "youtubeVideo": "https://www.youtube.com/watch?v=example"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.prep_time, "5 mins");
        assert_eq!(recipe.cook_time, "10 mins");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert!(recipe.has_tag("Vegetarian"));
        assert!(recipe.youtube_video.is_some());
        assert!(recipe.tips.is_none());
        assert!(recipe.instructions.is_empty());
    }
}
