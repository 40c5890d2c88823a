use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use wasa::api::{self, health, ApiClient};
use wasa::config::{self, ApiConfig, DEFAULT_HEALTHCHECK_PORT};

#[derive(Parser)]
#[command(
    name = "wasa",
    author,
    version,
    about = "WASAText API client utilities",
    long_about = r#"Resolve image paths against the configured API and probe its health.

The API base URL comes from API_URL (default http://localhost:3000) and the
request timeout from API_TIMEOUT_MS (default 15000). Both may be set in a .env
file; use `--env-file` to point at a specific one.

Examples:
  wasa resolve /images/x.png photos/y.jpg
  wasa resolve "" --fallback placeholder.png
  wasa check-config
  wasa healthcheck --port 3000
"#,
    after_help = "Use `wasa <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve image paths into absolute URLs
    #[command(long_about = "Print one absolute URL per PATH. Absolute http(s) URLs are printed unchanged, `/x` becomes `<base>/x` and `x` becomes `<base>/x`. An empty PATH prints the fallback, or an empty line when none is given.")]
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
        /// Value printed for empty paths
        #[arg(long)]
        fallback: Option<String>,
    },
    /// Show the effective API configuration
    Config {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and ensure the API is live
    #[command(long_about = "Read the API configuration and request `<base>/liveness`. Exits 0 when the API answers 200 or 204, 1 otherwise.")]
    CheckConfig,
    /// Probe http://localhost:<port>/liveness
    Healthcheck {
        /// HTTP port of the local API
        #[arg(long, default_value_t = DEFAULT_HEALTHCHECK_PORT, value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
}

fn print_config(cfg: &ApiConfig, json: bool) {
    if json {
        match serde_json::to_string_pretty(cfg) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{}: {}", yansi::Paint::red("Failed to serialize configuration"), e);
                process::exit(1);
            }
        }
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["base_url".to_string(), cfg.base_url.clone()]);
    table.add_row(vec!["timeout_ms".to_string(), cfg.timeout.as_millis().to_string()]);
    println!("\n{table}\n");
}

fn config_or_exit() -> ApiConfig {
    match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%e, "invalid configuration");
            eprintln!("{}", yansi::Paint::red(&e));
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(!cli.no_color))
        .with(EnvFilter::from_default_env())
        .init();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());

    match cli.command {
        Commands::Resolve { paths, fallback } => {
            let base_url = config::get_api_base_url();
            for path in &paths {
                let resolved = wasa::resolve_image_url(&base_url, Some(path), fallback.as_deref());
                println!("{}", resolved.unwrap_or_default());
            }
        }
        Commands::Config { json } => {
            print_config(&config_or_exit(), json);
        }
        Commands::CheckConfig => {
            let client = match ApiClient::new(config_or_exit()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}", yansi::Paint::red(&e));
                    process::exit(1);
                }
            };
            match client.liveness().await {
                Ok(status) => {
                    println!(
                        "{} {} ({})",
                        yansi::Paint::new("Configuration looks valid, API is live at").green(),
                        yansi::Paint::new(client.base_url()).cyan(),
                        status
                    );
                }
                Err(e) => {
                    tracing::error!(%e, base_url = client.base_url(), "liveness check failed");
                    eprintln!(
                        "{} {}: {}",
                        yansi::Paint::new("Configuration appears invalid, liveness failed for").red(),
                        client.base_url(),
                        e
                    );
                    process::exit(1);
                }
            }
        }
        Commands::Healthcheck { port } => {
            let cfg = match health::local_config(port) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!(%e, "invalid configuration");
                    eprintln!("{}", yansi::Paint::red(&e));
                    process::exit(1);
                }
            };
            if let Err(e) = health::probe(cfg).await {
                eprintln!("{} {}: {}", yansi::Paint::red("healthcheck failed for"), health::liveness_url(port), e);
                process::exit(1);
            }
        }
    }
}
