//! carefinder: Command-line interface for carefinder-core
//!
//! Looks up healthcare facilities (hospitals, clinics, Basic Health Units,
//! Rural Health Centers) for towns in Khyber Pakhtunkhwa through the
//! facilities backend, then filters and prints them.
//!
//! Usage examples
//! --------------
//!
//! - List the supported towns, or search them
//!   $ carefinder cities
//!   $ carefinder cities dera
//!
//! - Fetch and print facilities for one town
//!   $ carefinder facilities --city Peshawar
//!   $ carefinder facilities -c Mardan --limit 50 --ownership government --emergency
//!   $ carefinder facilities -c Swat --json
//!   $ carefinder facilities -c Swat --map
//!
//! - Interactive: type a town per line; a blank line clears the selection,
//!   `limit N` changes the limit. Only the latest selection is ever shown.
//!   $ carefinder watch
//!
//! Backend
//! -------
//!
//! The base URL comes from `--api-url`, else `CAREFINDER_API_BASE_URL`,
//! else `http://localhost:8000`. Requests time out after 25 seconds
//! (`CAREFINDER_TIMEOUT_SECS` overrides).
mod args;
mod logging;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use carefinder_core::cities::{find_city, search_cities};
use carefinder_core::driver::Selection;
use carefinder_core::prelude::*;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::init_logging(args.verbose);

    match args.command {
        Commands::Cities { query } => {
            let matches = search_cities(query.as_deref().unwrap_or(""));
            if matches.is_empty() {
                println!("No supported city matches: {}", query.unwrap_or_default());
            } else {
                for city in matches {
                    println!("{city}");
                }
            }
        }

        Commands::Facilities {
            city,
            limit,
            ownership,
            emergency,
            open24,
            json,
            map,
        } => {
            let client = build_client(args.api_url.as_deref())?;
            let city = canonical_city(&city);

            let mut session = FinderSession::with_limit(limit);
            session.set_filters(FilterState::new(
                ownership.map(Ownership::from).unwrap_or_default(),
                emergency,
                open24,
            ));

            if let Some(pending) = session.select_city(&city) {
                let done = pending.run(&client).await;
                session.complete(done);
            }

            if json {
                if let Some(message) = &session.state().error {
                    anyhow::bail!("{message}");
                }
                let records = session.filtered();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if map {
                print_map(&session.map_view());
            } else {
                print_list(&session.list_view());
            }
        }

        Commands::Watch { limit } => {
            let client = build_client(args.api_url.as_deref())?;
            watch(client, limit).await?;
        }
    }

    Ok(())
}

/// `--api-url` wins over the environment for this process.
fn build_client(api_url: Option<&str>) -> anyhow::Result<HttpFetchClient> {
    let config = match api_url {
        Some(url) => ClientConfig::from_env()?.with_base_url(url)?,
        None => ClientConfig::global()?.clone(),
    };
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "using facilities backend");
    HttpFetchClient::new(config).context("could not set up the HTTP client")
}

/// Catalog spelling when the input matches a known town; the input
/// unchanged otherwise (the backend may still know it).
fn canonical_city(input: &str) -> String {
    find_city(input)
        .map(str::to_string)
        .unwrap_or_else(|| input.trim().to_string())
}

async fn watch(client: HttpFetchClient, limit: u32) -> anyhow::Result<()> {
    let driver = LoadDriver::new(client, limit);
    let mut updates = driver.subscribe();
    let (tx, rx) = mpsc::channel(16);

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            let filtered = filter_facilities(&state.facilities, &FilterState::default());
            print_list(&ListView::build(&state, &filtered));
        }
    });
    let runner = tokio::spawn(driver.run(rx));

    println!("Type a city per line (blank clears, `limit N` changes the limit, Ctrl-D quits).");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let selection = parse_selection(&line);
        if tx.send(selection).await.is_err() {
            break;
        }
    }
    drop(tx);

    runner.await.context("load driver task failed")?;
    printer.await.context("printer task failed")?;
    Ok(())
}

fn parse_selection(line: &str) -> Selection {
    let trimmed = line.trim();
    if let Some(n) = trimmed
        .strip_prefix("limit ")
        .and_then(|rest| rest.trim().parse::<u32>().ok())
    {
        return Selection::Limit(n);
    }
    Selection::City(canonical_city(trimmed))
}

fn print_list(view: &ListView) {
    println!("{}", view.headline());
    if let ListView::Results { items, .. } = view {
        for item in items {
            let mut badges: Vec<&str> = Vec::new();
            if let Some(kind) = &item.facility_type {
                badges.push(kind);
            }
            if let Some(owner) = item.ownership {
                badges.push(owner);
            }
            println!("- {} [{}]", item.name, badges.join(", "));
            println!("    {}", item.address);
            if !item.tags.is_empty() {
                println!("    {}", item.tags.join(" | "));
            }
        }
    }
}

fn print_map(view: &MapView) {
    println!(
        "Map center: {:.4}, {:.4} (zoom {})",
        view.center.0, view.center.1, view.zoom
    );
    if view.markers.is_empty() {
        println!("No markers.");
    }
    for marker in &view.markers {
        println!(
            "- {:.5}, {:.5}  {}",
            marker.position.0,
            marker.position.1,
            marker.popup.join(" | ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("limit 50"), Selection::Limit(50));
        assert_eq!(parse_selection("  peshawar "), Selection::City("Peshawar".into()));
        assert_eq!(parse_selection(""), Selection::City(String::new()));
        assert_eq!(parse_selection("Some Village"), Selection::City("Some Village".into()));
    }

    #[test]
    fn test_api_url_override() {
        let client = build_client(Some("https://kpk.example.org/")).unwrap();
        assert_eq!(client.config().base_url, "https://kpk.example.org");
    }
}
