//! Command-line support for orderload.
//!
//! This crate provides the pieces behind the `orderload` binary:
//!
//! - Logging setup (plain or JSON, filtered by `RUST_LOG`)
//! - Fixture document inspection
//! - Run summary output
//!
//! # Design Principles
//!
//! - **Thin plumbing** - Every decision lives in the library crates.
//! - **Machine-readable output** - Reports and summaries are JSON.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use client::{ClientConfig, HttpGatewayClient};
use model::FixtureDocument;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable switching log output to JSON.
pub const LOG_JSON_ENV: &str = "ORDERLOAD_LOG_JSON";

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if env_bool(LOG_JSON_ENV, false) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

/// Builds the HTTP client used by every subcommand.
pub fn build_client(
    base_url: &str,
    token: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<HttpGatewayClient> {
    let mut config = ClientConfig::new(base_url).with_token(token);
    if let Some(secs) = timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    HttpGatewayClient::new(config).with_context(|| format!("create client for {base_url}"))
}

/// Shape of a fixture document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub restaurants: usize,
    pub menu_items: usize,
    pub min_menu_items: usize,
    pub max_menu_items: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Summarizes `document`.
pub fn inspect_fixtures(document: &FixtureDocument) -> InspectReport {
    let sizes = document.restaurants.iter().map(|r| r.menus.len());
    let prices = || {
        document
            .restaurants
            .iter()
            .flat_map(|r| r.menus.iter().map(|m| m.price))
    };
    InspectReport {
        restaurants: document.len(),
        menu_items: document.menu_item_count(),
        min_menu_items: sizes.clone().min().unwrap_or(0),
        max_menu_items: sizes.max().unwrap_or(0),
        min_price: prices().reduce(f64::min),
        max_price: prices().reduce(f64::max),
    }
}

/// Human-readable form of an [`InspectReport`].
pub fn format_inspect_report(path: &Path, report: &InspectReport) -> String {
    let mut out = format!(
        "fixtures: {}\nrestaurants: {}\nmenu items: {} ({}..={} per restaurant)",
        path.display(),
        report.restaurants,
        report.menu_items,
        report.min_menu_items,
        report.max_menu_items
    );
    if let (Some(min), Some(max)) = (report.min_price, report.max_price) {
        out.push_str(&format!("\nprice range: {min:.2}..={max:.2}"));
    }
    out
}

/// Writes `summary` as pretty JSON to `out_dir/summary.json`.
pub fn write_summary_json<T: Serialize>(out_dir: &Path, summary: &T) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;
    let path = out_dir.join("summary.json");
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
