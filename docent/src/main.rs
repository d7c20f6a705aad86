use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docent::api::{create_router, AppState};
use docent::config::Config;
use docent::i18n::Translations;
use docent::llm::LlmProvider;
use docent::scaffold::init_project;
use docent::speech::SpeechProvider;

#[derive(Parser)]
#[command(name = "docent")]
#[command(about = "Chat with a folder of PDF and Word documents")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web UI and API (default)
    Serve(ServeArgs),
    /// Create data/, translations/, audio_responses/ and a .env template
    Init {
        /// Directory to set up
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// Address to bind, overrides DOCENT_HOST
    #[arg(long)]
    host: Option<String>,
    /// Port to bind, overrides DOCENT_PORT
    #[arg(long)]
    port: Option<u16>,
    /// Folder scanned for documents, overrides DATA_FOLDER
    #[arg(long)]
    data_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docent=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Some(Command::Init { dir }) => init(&dir),
        Some(Command::Serve(serve_args)) => serve(serve_args).await,
        None => serve(ServeArgs::default()).await,
    }
}

fn init(dir: &std::path::Path) -> anyhow::Result<()> {
    let report = init_project(dir)?;
    for path in &report.created {
        tracing::info!("Created {}", path.display());
    }
    for path in &report.skipped {
        tracing::info!("Already present: {}", path.display());
    }
    tracing::info!(
        "Add your API key to {} and put documents in {}",
        dir.join(".env").display(),
        dir.join("data").display()
    );
    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data_folder) = args.data_folder {
        config.documents.data_folder = data_folder;
    }

    let translations = Translations::load(&config.i18n.translations_dir);

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - questions will be answered with a setup hint");
    }

    tracing::info!("Initializing speech provider: {}...", config.speech.model);
    let speech = SpeechProvider::new(&config.speech);
    if !speech.is_available() {
        tracing::warn!("Speech unavailable - audio responses will be disabled");
    }

    let state = AppState::new(config.clone(), translations, llm, speech);

    let cancel_token = CancellationToken::new();

    tracing::info!(
        "Scanning documents in {}...",
        config.documents.data_folder.display()
    );
    let library = state.library.clone();
    let token = cancel_token.child_token();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = library.snapshot() => match result {
                Ok(report) => tracing::info!(
                    loaded = report.documents.len(),
                    failed = report.summary.failed_loads,
                    status = ?report.status,
                    "Initial document scan finished"
                ),
                Err(e) => tracing::error!("Initial document scan failed: {}", e),
            },
        }
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Docent starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
