#![deny(warnings)]

//! Headless CLI for building, checking and inspecting the kitchen config.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kitchen_content::{default_config, resource_names};
use kitchen_core::Config;
use kitchen_runtime::UnlockState;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kitchen")]
#[command(about = "Build and inspect the kitchen game configuration")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), ")"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the tree, apply an optional overlay, and validate it
    Check {
        /// JSON object deep-merged onto the default tree
        #[arg(long)]
        overlay: Option<String>,
    },

    /// List asset files the tree references
    Resources,

    /// Print the tree or one subtree
    Dump {
        /// Dotted path, e.g. `ui.order_bar.orders.0`
        #[arg(long)]
        section: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Show order weights, selection odds and expected prices
    Orders,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { overlay } => run_check(overlay.as_deref()),
        Commands::Resources => run_resources(),
        Commands::Dump { section, format } => run_dump(section.as_deref(), format),
        Commands::Orders => run_orders(),
    }
}

fn base_config() -> Result<&'static Config> {
    default_config().map_err(|e| anyhow!("built-in config is invalid: {e}"))
}

fn run_check(overlay: Option<&str>) -> Result<()> {
    let config = match overlay {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("overlay is not valid JSON")?;
            base_config()?
                .with_overlay(value)
                .context("overlay rejected")?
        }
        None => kitchen_content::gen_config(&Default::default())?,
    };
    info!(overlay = overlay.is_some(), "config check passed");
    println!(
        "Config OK | images: {} | sounds: {} | orders: {} | cookers: {} | upgrade tracks: {}",
        config.ui.images.images.len(),
        config.ui.sounds.sounds.len(),
        config.ui.order_bar.orders.len(),
        config.ui.preparation_area.cookers.len(),
        config.ui.store.upgrades.len()
    );
    Ok(())
}

fn run_resources() -> Result<()> {
    let manifest = resource_names(base_config()?);
    for name in manifest.images.iter().chain(&manifest.sounds) {
        println!("{name}");
    }
    Ok(())
}

fn run_dump(section: Option<&str>, format: Format) -> Result<()> {
    let tree = serde_json::to_value(base_config()?)?;
    let node = match section {
        Some(path) => select(&tree, path)?,
        None => &tree,
    };
    let out = match format {
        Format::Json => serde_json::to_string_pretty(node)?,
        Format::Yaml => serde_yaml::to_string(node)?,
    };
    println!("{out}");
    Ok(())
}

/// Walk a dotted path; numeric segments index arrays.
fn select<'a>(tree: &'a Value, path: &str) -> Result<&'a Value> {
    let mut node = tree;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        node = match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| anyhow!("no `{segment}` in section `{path}`"))?;
    }
    Ok(node)
}

/// Chance of each order being drawn when only `eligible` orders can come
/// up. `None` for orders that cannot.
fn order_odds(config: &Config, eligible: &[usize]) -> Vec<Option<f64>> {
    let orders = &config.ui.order_bar.orders;
    let total: f64 = eligible
        .iter()
        .filter_map(|&i| orders.get(i))
        .map(|o| o.weight)
        .sum();
    orders
        .iter()
        .enumerate()
        .map(|(i, o)| (total > 0.0 && eligible.contains(&i)).then(|| o.weight / total))
        .collect()
}

fn pct(odds: Option<f64>) -> String {
    odds.map_or_else(|| "-".to_string(), |p| format!("{:.1}%", p * 100.0))
}

fn run_orders() -> Result<()> {
    let config = base_config()?;
    let at_start = order_odds(config, &UnlockState::new(config).eligible_orders(config));
    let mut unlocked = UnlockState::new(config);
    unlocked.unlock_all(config);
    let all_unlocked = order_odds(config, &unlocked.eligible_orders(config));
    if all_unlocked.iter().all(Option::is_none) {
        bail!("no order can ever be served");
    }
    for (i, order) in config.ui.order_bar.orders.iter().enumerate() {
        let ings: Vec<&str> = order.ings.iter().map(|ing| ing.ing.as_str()).collect();
        println!(
            "#{i} | weight: {:.2} | odds at start: {} | odds all unlocked: {} | expected price: ${:.2} | {}",
            order.weight,
            pct(at_start[i]),
            pct(all_unlocked[i]),
            order.expected_price(),
            ings.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn select_walks_objects_and_arrays() {
        let tree = serde_json::to_value(default_config().unwrap()).unwrap();
        let ing = select(&tree, "ui.order_bar.orders.0.ings.1.ing").unwrap();
        assert_eq!(*ing, "CookedPatty");
        assert!(select(&tree, "ui.nope").is_err());
        assert!(select(&tree, "ui.order_bar.orders.x").is_err());
        assert_eq!(select(&tree, "").unwrap(), &tree);
    }

    #[test]
    fn odds_only_cover_servable_orders() {
        let config = default_config().unwrap();
        let odds = order_odds(config, &UnlockState::new(config).eligible_orders(config));
        // the salad is the only order servable at the start
        assert_eq!(odds, [None, Some(1.0), None, None, None]);

        let odds = order_odds(config, &[0, 1, 2, 3, 4]);
        let sum: f64 = odds.iter().flatten().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(odds[1], Some(0.5 / 4.0));
        assert_eq!(order_odds(config, &[]), [None::<f64>; 5]);
        assert_eq!(pct(None), "-");
        assert_eq!(pct(Some(0.125)), "12.5%");
    }

    #[test]
    fn version_carries_git_sha() {
        let cmd = Cli::command();
        let version = cmd.get_version().unwrap_or_default();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.ends_with(concat!("(", env!("GIT_SHA"), ")")));
    }

    #[test]
    fn check_rejects_unknown_overlay_key() {
        let err = run_check(Some(r#"{"game": {"ordr_bar": {}}}"#)).unwrap_err();
        assert_eq!(err.to_string(), "overlay rejected");
        assert!(format!("{err:#}").contains("ordr_bar"));
    }
}
