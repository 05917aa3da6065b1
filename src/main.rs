//! Annotation service (v1)
//!
//! Loads spotting and disambiguation strategies, then serves them over HTTP
//! until stopped.
//!
//! # Architecture Overview
//!
//! ```text
//!   serve <service.toml>                 serve <model-folder> <listener-uri>
//!          │                                          │
//!          ▼                                          ▼
//!   ┌──────────────┐                         ┌──────────────┐
//!   │    config    │                         │   provider   │
//!   │ (TOML file)  │                         │ (ModelBundle)│
//!   └──────┬───────┘                         └──────┬───────┘
//!          │  StrategyFactory                       │
//!          └──────────────────┬─────────────────────┘
//!                             ▼
//!                  ┌─────────────────────┐
//!                  │   ServiceContext    │  write-once policy registries
//!                  └──────────┬──────────┘
//!                             ▼
//!   Client ──────▶  net listener ─▶ http (annotate / spot / admin)
//!                             │
//!                  ┌──────────┴──────────┐
//!                  │ lifecycle controller│  Serving until shutdown
//!                  └─────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use annotation_server::lifecycle::{spawn_signal_handler, Lifecycle, StartupError, StartupMode};
use annotation_server::observability::logging;

/// Start the annotation service.
#[derive(Parser, Debug)]
#[command(name = "serve", version)]
struct ServeArgs {
    /// Configuration file, or a model folder
    input: Option<PathBuf>,

    /// Listener URI (model folder only), e.g. http://localhost:2222/rest/
    listener_uri: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match ServeArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "annotation-server starting");

    let mode = match StartupMode::from_args(args.input, args.listener_uri) {
        Ok(mode) => mode,
        Err(e) => return fail(&e),
    };

    let lifecycle = Lifecycle::new();
    let _signals = spawn_signal_handler(lifecycle.shutdown());

    match lifecycle.run(&mode).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(error: &StartupError) -> ExitCode {
    tracing::error!(error = %error, "Startup failed");
    eprintln!("error: {}", error);
    eprintln!("{}", ServeArgs::command().render_usage());
    ExitCode::FAILURE
}
