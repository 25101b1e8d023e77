use log::debug;
use recipe_finder::{DifficultyFilter, FinderConfig, Recipe, SelectionController};
use std::env;

const USAGE: &str = "Usage: recipe-finder [QUERY] [--category NAME] [--difficulty All|Easy|Medium] [--random]";

fn parse_difficulty(value: &str) -> Option<DifficultyFilter> {
    DifficultyFilter::options()
        .into_iter()
        .find(|option| option.as_str().eq_ignore_ascii_case(value))
}

fn print_card(recipe: &Recipe) {
    let stars = recipe.stars();
    println!(
        "{:<16} {:<13} {:<7} {}{}{} ({})",
        recipe.name,
        recipe.category,
        recipe.difficulty,
        "*".repeat(stars.full as usize),
        "+".repeat(stars.half as usize),
        ".".repeat(stars.empty as usize),
        recipe.reviews
    );
}

fn print_detail(recipe: &Recipe) {
    println!("{} ({}, {})", recipe.name, recipe.cuisine, recipe.region);
    println!("{}", recipe.description);
    println!(
        "Prep {} | Cook {} | Serves {} | {}",
        recipe.prep_time, recipe.cook_time, recipe.servings, recipe.calories
    );
    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {} ({})", ingredient.name, ingredient.quantity);
    }
    println!("\nInstructions:");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", step + 1, instruction);
    }
}

/// Selections requested on the command line.
#[derive(Debug, Default, PartialEq)]
struct Options {
    query: String,
    category: Option<String>,
    difficulty: Option<DifficultyFilter>,
    random: bool,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<Options, &'static str>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut words = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--category" => options.category = Some(args.next().ok_or(USAGE)?),
            "--difficulty" => {
                let value = args.next().ok_or(USAGE)?;
                options.difficulty = Some(parse_difficulty(&value).ok_or(USAGE)?);
            }
            "--random" => options.random = true,
            "-h" | "--help" => options.help = true,
            flag if flag.starts_with('-') => return Err(USAGE),
            word => words.push(word.to_string()),
        }
    }
    options.query = words.join(" ");
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = FinderConfig::load()?;
    debug!("{:#?}", config);
    let mut controller = SelectionController::from_config(&config)?;

    let options = parse_args(env::args().skip(1))?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    controller.set_query(options.query);
    if let Some(category) = options.category {
        controller.set_category(category);
    }
    if let Some(difficulty) = options.difficulty {
        controller.set_difficulty(difficulty);
    }

    if options.random {
        if let Some(recipe) = controller.pick_random() {
            print_detail(recipe);
        }
        return Ok(());
    }

    let stats = controller.stats();
    println!(
        "{} recipes | {} vegetarian | {} street foods | avg rating {:.1}\n",
        stats.total, stats.vegetarian_count, stats.street_food_count, stats.average_rating
    );

    let snapshot = controller.settled().await;
    if snapshot.results.is_empty() {
        println!("No recipes found. Try adjusting your search or filters.");
        return Ok(());
    }

    println!("{}", snapshot.results.summary());
    for recipe in snapshot.results.iter() {
        print_card(recipe);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_words_form_one_query() {
        let options = parse_args(args(&["nyama", "choma"])).unwrap();
        assert_eq!(options.query, "nyama choma");
    }

    #[test]
    fn test_flags_mixed_with_query_words() {
        let options = parse_args(args(&[
            "maize",
            "--category",
            "Street Foods",
            "--difficulty",
            "easy",
            "cobs",
        ]))
        .unwrap();
        assert_eq!(options.query, "maize cobs");
        assert_eq!(options.category.as_deref(), Some("Street Foods"));
        assert_eq!(options.difficulty, Some(DifficultyFilter::Easy));
        assert!(!options.random);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert_eq!(parse_args(args(&["--categroy", "Drinks"])), Err(USAGE));
    }

    #[test]
    fn test_unreachable_difficulty_is_rejected() {
        assert_eq!(parse_args(args(&["--difficulty", "Hard"])), Err(USAGE));
        assert_eq!(parse_args(args(&["--difficulty"])), Err(USAGE));
    }

    #[test]
    fn test_no_arguments_is_default() {
        assert_eq!(parse_args(Vec::new()).unwrap(), Options::default());
    }
}
