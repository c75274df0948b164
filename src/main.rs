use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use plainrules::config::{Config, Mode};
use plainrules::engine::{PlainRulesEngine, RulesEngine};
use plainrules::facts::load_facts;
use plainrules::observability::{init_tracing, MetricsRegistry};
use plainrules::rules::shop;

fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting plainrules");

    if !config.enabled {
        warn!("Rules engine disabled, nothing to do");
        return Ok(());
    }

    let mut facts = load_facts(&config.facts_path)?;
    info!(path = %config.facts_path.display(), count = facts.len(), "Loaded facts");

    let rules = shop::rules()?;

    let metrics = Arc::new(MetricsRegistry::new());
    let mut engine = PlainRulesEngine::new();
    engine.register_rule_listener(metrics.clone());
    engine.register_rules_engine_listener(metrics.clone());

    match config.mode {
        Mode::Fire => {
            engine.fire(&rules, &mut facts)?;
            println!("{}", serde_json::to_string_pretty(&facts)?);
        }
        Mode::Check => {
            let results = engine.check(&rules, &facts)?;
            // Report in firing order rather than hash order
            let ordered: Vec<serde_json::Value> = rules
                .iter()
                .filter_map(|rule| {
                    results
                        .get(rule.name())
                        .map(|result| json!({ "rule": rule.name(), "result": result }))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&ordered)?);
        }
    }

    if config.print_metrics {
        print!("{}", metrics.to_prometheus());
    }

    Ok(())
}
