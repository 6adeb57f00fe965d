//! Command handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::Valuator;
use crate::config::Config;
use crate::error::Result;
use crate::watch::Debouncer;

use super::{output, CheckCommand, Cli, Commands, ConfigPathArg, ValueArgs, WatchArgs};

/// Dispatch a parsed command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Value(args) => value(args).await,
        Commands::Watch(args) => watch(args).await,
        Commands::Check(CheckCommand::Config(args)) => check_config(&args),
    }
}

async fn value(args: ValueArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.init_logging();

    let valuator = Valuator::from_config(&config);
    let report = valuator.appraise(&args.query, args.asking).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::render_report(&args.query, &report);
    }

    Ok(())
}

async fn watch(args: WatchArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.init_logging();

    let delay = Duration::from_millis(args.debounce_ms.unwrap_or(config.watch.debounce_ms));
    let valuator = Arc::new(Valuator::from_config(&config));
    let mut debouncer = Debouncer::new(delay);

    output::note("Watching stdin for queries, one title per line (Ctrl-C to quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let query = line.trim().to_string();
                if query.is_empty() {
                    continue;
                }

                let valuator = valuator.clone();
                debouncer.schedule(async move {
                    let report = valuator.appraise(&query, None).await;
                    output::render_report(&query, &report);
                });
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    // Let the final scheduled appraisal fire before exiting.
    debouncer.flush().await;
    Ok(())
}

fn check_config(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(&args.config)?;

    output::ok("configuration OK");
    output::key_value("search_url", &config.network.search_url);
    output::key_value("site_url", &config.network.site_url);
    output::key_value("daily limit", config.entitlement.free_daily_limit);
    output::key_value(
        "license",
        if config.entitlement.license_key.is_some() {
            "present"
        } else {
            "not set"
        },
    );

    Ok(())
}
