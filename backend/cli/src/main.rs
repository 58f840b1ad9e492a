mod api;
mod config;
mod page;
mod terminal_output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use placefinder_config::{config_dir, config_file_path, load_and_prepare, redact, ProviderKind};
use placefinder_core::{ImageAnalyzer, DEFAULT_ANALYSIS};
use placefinder_logging::init_logger;
use placefinder_markdown::format;
use placefinder_session::AnalysisController;
use placefinder_understanding::{GeminiAnalyzer, MockAnalyzer, OpenAiAnalyzer};

use api::AppState;
use config::Config;
use terminal_output::{note_error, note_info, note_success, note_warn, print_blocks, OutputFormat};

#[derive(Parser)]
#[command(name = "placefinder")]
#[command(about = "Placefinder: identify the place in a travel photo")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.placefinder/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sample analysis from the landing page
    Default {
        #[arg(long, conflicts_with = "json")]
        html: bool,
        #[arg(long)]
        json: bool,
    },
    /// Format a saved analysis text file
    Format {
        file: PathBuf,
        #[arg(long, conflicts_with = "json")]
        html: bool,
        #[arg(long)]
        json: bool,
    },
    /// Identify the location in an image
    Analyze {
        image: PathBuf,
        #[arg(long, conflicts_with = "json")]
        html: bool,
        #[arg(long)]
        json: bool,
    },
    /// Start the web page and HTTP API
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the effective configuration with secrets masked
    ShowConfig,
    /// Check whether a local server is running
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (file_config, report) = load_and_prepare(&config_path)
        .await
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
    let config = Config::from_env(file_config.clone())?;

    init_logger(config.log_dir.as_deref(), &config.log_level);
    report.log();

    match cli.command {
        Commands::Default { html, json } => {
            print_blocks(&format(DEFAULT_ANALYSIS), OutputFormat::from_flags(html, json))?;
        }
        Commands::Format { file, html, json } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            print_blocks(&format(&text), OutputFormat::from_flags(html, json))?;
        }
        Commands::Analyze { image, html, json } => {
            run_analyze(&config, image, OutputFormat::from_flags(html, json)).await?;
        }
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::ShowConfig => {
            let value = serde_json::to_value(&file_config)?;
            println!("# {}", config_path.display());
            print!("{}", serde_yaml::to_string(&redact(&value))?);
        }
        Commands::Status => {
            let url = format!("http://localhost:{}/api/health", config.port);
            match reqwest::get(&url).await {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    note_warn(&format!("Placefinder is not running on port {}", config.port));
                }
            }
        }
    }

    Ok(())
}

/// Build the analyzer selected by the config.
fn build_analyzer(config: &Config) -> Result<Arc<dyn ImageAnalyzer>> {
    let analyzer: Arc<dyn ImageAnalyzer> = match config.provider {
        ProviderKind::Gemini => {
            let mut gemini = GeminiAnalyzer::new(config.require_api_key()?).with_timeout(config.timeout);
            if let Some(model) = &config.model {
                gemini = gemini.with_model(model);
            }
            if let Some(url) = &config.base_url {
                gemini = gemini.with_base_url(url);
            }
            Arc::new(gemini)
        }
        ProviderKind::OpenAi => {
            let mut openai = OpenAiAnalyzer::new(config.require_api_key()?).with_timeout(config.timeout);
            if let Some(model) = &config.model {
                openai = openai.with_model(model);
            }
            if let Some(url) = &config.base_url {
                openai = openai.with_base_url(url);
            }
            Arc::new(openai)
        }
        ProviderKind::Mock => Arc::new(MockAnalyzer::new()),
    };
    info!(analyzer = analyzer.name(), "Analyzer ready");
    Ok(analyzer)
}

async fn run_analyze(config: &Config, image: PathBuf, output: OutputFormat) -> Result<()> {
    let controller = AnalysisController::new(build_analyzer(config)?, config.limits.clone());
    note_info(&format!("Analyzing {}", image.display()));

    match controller.upload_file(&image).await {
        Ok(state) => {
            print_blocks(&state.blocks(), output)?;
            Ok(())
        }
        Err(e) => {
            note_error(&e.user_message());
            Err(e).with_context(|| format!("Analysis of {} failed", image.display()))
        }
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        provider = %config.provider,
        "Starting Placefinder"
    );

    let controller = AnalysisController::new(build_analyzer(&config)?, config.limits.clone())
        .with_default_image(config.default_image.clone());
    if let Err(e) = controller.load_default().await {
        // The page still works; it shows the banner until the first upload.
        warn!(error = %e, "Landing image unavailable");
    }

    let app_state = Arc::new(AppState { controller });
    let app = api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    let addr = format!("{}:{}", config.bind_address, config.port);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "HTTP API listening");
    note_success(&format!("Open http://{addr}/"));

    axum::serve(listener, app).await?;

    Ok(())
}
