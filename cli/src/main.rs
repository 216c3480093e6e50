mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use brewlog_core::{
    compute_review_stats, filter_by_brew_type, prepare_recipe_row, project_recipe,
    project_review, sort_recipes, validate_recipe, validate_review, BrewType, FormData, Recipe,
    RecipeRow, RecipeSort, ReviewRow,
};
use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "brewlog")]
#[command(about = "Validate brew recipes and summarize reviews", long_about = None)]
struct Cli {
    /// Print compact JSON (overrides BREWLOG_PRETTY)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submitted recipe form (JSON object of field -> value)
    Validate {
        /// Path to the form JSON
        file: PathBuf,
        /// Which schema to apply: espresso or drip
        #[arg(long, value_parser = parse_brew_type)]
        brew_type: BrewType,
        /// Print the row that would be written for this user instead of the
        /// validated input
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Validate a submitted review form
    Review {
        /// Path to the form JSON
        file: PathBuf,
    },
    /// Project stored recipe rows (one row or an array) into recipes
    Project {
        /// Path to the row JSON
        file: PathBuf,
        /// Order for arrays: newest, most_liked or most_reviewed
        #[arg(long, value_parser = parse_sort, default_value = "newest")]
        sort: RecipeSort,
        /// Only keep recipes of this brew type
        #[arg(long, value_parser = parse_brew_type)]
        brew_type: Option<BrewType>,
    },
    /// Compute rating statistics from an array of stored review rows
    Stats {
        /// Path to the review rows JSON
        file: PathBuf,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()?;
    init_tracing(&config.log_filter);
    let pretty = config.pretty && !cli.compact;

    match cli.command {
        Commands::Validate {
            file,
            brew_type,
            user_id,
        } => {
            let form: FormData = read_json(&file)?;
            match validate_recipe(brew_type, &form) {
                Ok(input) => match user_id {
                    Some(user_id) => print_json(&prepare_recipe_row(user_id, &input), pretty)?,
                    None => print_json(&input, pretty)?,
                },
                Err(errors) => {
                    print_json(&errors, pretty)?;
                    return Err(anyhow!(errors));
                }
            }
        }
        Commands::Review { file } => {
            let form: FormData = read_json(&file)?;
            match validate_review(&form) {
                Ok(input) => print_json(&input, pretty)?,
                Err(errors) => {
                    print_json(&errors, pretty)?;
                    return Err(anyhow!(errors));
                }
            }
        }
        Commands::Project {
            file,
            sort,
            brew_type,
        } => match read_json::<OneOrMany<RecipeRow>>(&file)? {
            OneOrMany::One(row) => print_json(&project_recipe(&row), pretty)?,
            OneOrMany::Many(rows) => {
                let mut recipes: Vec<Recipe> = rows.iter().map(project_recipe).collect();
                sort_recipes(&mut recipes, sort);
                let recipes: Vec<&Recipe> = match brew_type {
                    Some(brew_type) => filter_by_brew_type(&recipes, brew_type).collect(),
                    None => recipes.iter().collect(),
                };
                tracing::info!(count = recipes.len(), sort = sort.as_str(), "Projected recipes");
                print_json(&recipes, pretty)?;
            }
        },
        Commands::Stats { file } => {
            let rows: Vec<ReviewRow> = read_json(&file)?;
            let reviews = rows
                .into_iter()
                .map(|row| {
                    let id = row.id;
                    project_review(row).with_context(|| format!("Review {} is invalid", id))
                })
                .collect::<Result<Vec<_>>>()?;
            print_json(&compute_review_stats(&reviews), pretty)?;
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn parse_brew_type(s: &str) -> Result<BrewType, String> {
    BrewType::from_str(s).ok_or_else(|| format!("unknown brew type '{s}' (espresso or drip)"))
}

fn parse_sort(s: &str) -> Result<RecipeSort, String> {
    RecipeSort::from_str(s)
        .ok_or_else(|| format!("unknown sort '{s}' (newest, most_liked or most_reviewed)"))
}
