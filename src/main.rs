//! Media Relay
//!
//! Bootstrap process for the WebRTC media relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli ──▶ Options { config_path }
//!                         │
//!                         ▼
//!   config.xml ──▶ config::loader ──▶ config::walker ──▶ config::directives
//!                                                              │
//!                                                              ▼
//!                                                       MediaEngine setters
//!                                                              │
//!                                                              ▼
//!                                                       engine.start()
//!                                                              │
//!   stdin "quit" ──┐                                           ▼
//!                  ├──▶ lifecycle::Shutdown ──────────▶ engine.stop()
//!   Ctrl-C ────────┘
//! ```

use std::process;

use media_relay::cli::{self, Invocation, UsageError, USAGE_EXIT_CODE};
use media_relay::engine::RelayEngine;
use media_relay::lifecycle::startup;
use media_relay::observability::logging::{init_logging, DEFAULT_FILTER};

#[tokio::main]
async fn main() {
    println!("{}", cli::banner());

    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Help) => {
            print!("{}", cli::usage());
            process::exit(USAGE_EXIT_CODE);
        }
        Ok(Invocation::Version) => {
            println!("{}", cli::version());
            process::exit(USAGE_EXIT_CODE);
        }
        Err(e) => {
            eprintln!("{}", e);
            if e == UsageError::MissingPath {
                print!("{}", cli::usage());
            }
            process::exit(USAGE_EXIT_CODE);
        }
    };

    let log_level = init_logging(DEFAULT_FILTER);
    let engine = RelayEngine::with_log_level(log_level);

    tracing::info!(config_path = %options.config_path.display(), "media-relay starting");

    // Exit explicitly: a pending stdin read would otherwise hold the runtime open.
    match startup::run(&options, &engine, tokio::io::stdin()).await {
        Ok(reason) => {
            tracing::info!(?reason, "Shutdown complete");
            process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            process::exit(1);
        }
    }
}
