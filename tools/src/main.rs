use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{GatewayClient, DEFAULT_BASE_URL};
use driver::{run_actors, DriverConfig, LoadConfig, TrafficDriver, DEFAULT_CUSTOMER_ID};
use model::CustomerId;
use reconcile::{DiscoveryPolicy, FixtureStore, ReconcileConfig, Reconciler, DEFAULT_FIXTURE_PATH};
use tools::{build_client, format_inspect_report, init_tracing, inspect_fixtures, write_summary_json};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "orderload",
    version,
    about = "Seed restaurant fixtures and drive order traffic against the API gateway"
)]
struct Cli {
    /// Gateway base URL.
    #[arg(long, global = true, env = "ORDERLOAD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Bearer token for the restaurant routes.
    #[arg(long, global = true, env = "ORDERLOAD_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ensure the gateway has enough restaurants and persist them as fixtures.
    Seed {
        /// Target number of usable restaurants.
        #[arg(long, default_value_t = 25)]
        count: usize,
        /// Fixture document path.
        #[arg(long, default_value = DEFAULT_FIXTURE_PATH)]
        fixtures: PathBuf,
        /// RNG seed for reproducible registrations.
        #[arg(long)]
        seed: Option<u64>,
        /// Abort if existing restaurants cannot be listed.
        #[arg(long)]
        require_discovery: bool,
    },
    /// Place generated orders against the persisted fixtures.
    Load {
        /// Number of concurrent simulated users.
        #[arg(long, default_value_t = 10)]
        users: usize,
        /// Run length in seconds.
        #[arg(long, default_value_t = 60)]
        duration_secs: u64,
        /// Optional cap on orders per user.
        #[arg(long)]
        max_requests_per_user: Option<usize>,
        /// Minimum think time between orders.
        #[arg(long, default_value_t = 1000)]
        min_wait_ms: u64,
        /// Maximum think time between orders.
        #[arg(long, default_value_t = 2000)]
        max_wait_ms: u64,
        /// Customer placing the orders.
        #[arg(long, default_value = DEFAULT_CUSTOMER_ID)]
        customer_id: String,
        /// Base RNG seed; user `i` uses `seed + i`.
        #[arg(long)]
        seed: Option<u64>,
        /// Fixture document path.
        #[arg(long, default_value = DEFAULT_FIXTURE_PATH)]
        fixtures: PathBuf,
        /// Output directory for summary.json.
        #[arg(long, default_value = "target/orderload")]
        out_dir: PathBuf,
        /// Fail if the error rate exceeds this fraction.
        #[arg(long)]
        max_error_rate: Option<f64>,
        /// Fail if p95 order latency exceeds this many milliseconds.
        #[arg(long)]
        max_p95_ms: Option<u64>,
    },
    /// Print the shape of a fixture document.
    Inspect {
        /// Fixture document path.
        #[arg(long, default_value = DEFAULT_FIXTURE_PATH)]
        fixtures: PathBuf,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Seed {
            count,
            fixtures,
            seed,
            require_discovery,
        } => {
            let client = build_client(&cli.base_url, cli.token, cli.timeout_secs)?;
            let config = ReconcileConfig {
                discovery_policy: if require_discovery {
                    DiscoveryPolicy::Required
                } else {
                    DiscoveryPolicy::BestEffort
                },
                seed,
                ..ReconcileConfig::default()
            };
            let mut reconciler = Reconciler::new(client, FixtureStore::new(fixtures), config);
            let report = reconciler
                .ensure_fixtures(count)
                .with_context(|| format!("seed {count} restaurants via {}", cli.base_url))?;
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
        Command::Load {
            users,
            duration_secs,
            max_requests_per_user,
            min_wait_ms,
            max_wait_ms,
            customer_id,
            seed,
            fixtures,
            out_dir,
            max_error_rate,
            max_p95_ms,
        } => {
            let store = FixtureStore::new(fixtures);
            let document = store
                .load()
                .with_context(|| format!("load fixtures {}", store.path().display()))?;
            let client = build_client(&cli.base_url, cli.token, cli.timeout_secs)?;
            if !client.health_check() {
                warn!(base_url = %cli.base_url, "gateway health check failed, running anyway");
            }

            let driver_config = DriverConfig {
                customer_id: CustomerId::new(customer_id).context("customer id")?,
                seed,
                ..DriverConfig::default()
            };
            let load = LoadConfig {
                users,
                duration: Duration::from_secs(duration_secs),
                max_requests_per_user,
                min_wait: Duration::from_millis(min_wait_ms),
                max_wait: Duration::from_millis(max_wait_ms),
            };
            let driver = TrafficDriver::new(document, client, driver_config);
            let summary = run_actors(&driver, &load).context("run load")?;

            let path = write_summary_json(&out_dir, &summary)?;
            info!(path = %path.display(), "summary written");
            summary.assert_budgets(max_error_rate, max_p95_ms)?;
        }
        Command::Inspect { fixtures, json } => {
            let store = FixtureStore::new(fixtures);
            let document = store
                .load()
                .with_context(|| format!("load fixtures {}", store.path().display()))?;
            let report = inspect_fixtures(&document);
            if json {
                let json = serde_json::to_string_pretty(&report).context("serialize report")?;
                println!("{json}");
            } else {
                println!("{}", format_inspect_report(store.path(), &report));
            }
        }
    }
    Ok(())
}
