//! # widgets_server
//!
//! HTTP server for section widgets. A CMS page loads a widget with
//!
//! ```html
//! <script src="https://widgets.example.com/widgets/hero"></script>
//! <div id="hero-slot"></div>
//! <script>
//!   SectionWidgets.hero.mount(document.getElementById('hero-slot'), { rating: 4.5 });
//! </script>
//! ```
//!
//! ## Usage
//!
//! ```bash
//! widgets_server --bind 0.0.0.0:5075 --public-url https://widgets.example.com
//! ```

mod error;
mod routes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use section_widgets::{WidgetCatalog, WidgetsConfig};

use crate::routes::{AppState, create_app};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "widgets_server")]
#[command(about = "Serves embeddable section widgets to CMS host pages")]
#[command(version)]
struct Args {
    /// Configuration file (default: ./widgets.toml if present)
    #[arg(short, long, env = "WIDGETS_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `bind` from the config file
    #[arg(long, env = "WIDGETS_BIND")]
    bind: Option<String>,

    /// Registry global on host pages, overrides `registry_namespace`
    #[arg(long)]
    namespace: Option<String>,

    /// Base URL embedded in bundles, overrides `public_url`
    #[arg(long, env = "WIDGETS_PUBLIC_URL")]
    public_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn resolve_config(&self) -> Result<WidgetsConfig> {
        let mut config = match &self.config {
            Some(path) => WidgetsConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WidgetsConfig::load(&std::env::current_dir()?),
        };
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.registry_namespace = namespace.clone();
        }
        if let Some(public_url) = &self.public_url {
            config.public_url = public_url.clone();
        }
        Ok(config)
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    let config = args.resolve_config()?;
    let catalog = WidgetCatalog::builtin();

    // Every bundle must be servable before we accept requests.
    for identifier in catalog.identifiers() {
        catalog
            .bundle(identifier, &config.registry_namespace, &config.public_url)
            .with_context(|| format!("building bundle for `{identifier}`"))?;
    }

    info!("Starting widgets_server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        namespace = %config.registry_namespace,
        widgets = ?catalog.identifiers().collect::<Vec<_>>(),
        "Widget catalog ready"
    );

    let app = create_app(AppState::new(
        catalog,
        &config.registry_namespace,
        &config.public_url,
    ));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
