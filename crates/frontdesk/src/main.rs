// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frontdesk - backend for an AI-employee marketing site.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use frontdesk_config::{ConfigError, FrontdeskConfig};

/// Frontdesk - chat with human handoff, lead capture, and checkout for the website.
#[derive(Parser, Debug)]
#[command(name = "frontdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (the default).
    Serve,
    /// Validate the configuration and report which services are configured.
    CheckConfig,
}

fn load(path: Option<&PathBuf>) -> Result<FrontdeskConfig, Vec<ConfigError>> {
    match path {
        Some(path) => frontdesk_config::load_and_validate_path(path),
        None => frontdesk_config::load_and_validate(),
    }
}

fn configured(value: Option<&str>) -> &'static str {
    if value.is_some_and(|v| !v.trim().is_empty()) {
        "configured"
    } else {
        "not configured"
    }
}

fn print_summary(config: &FrontdeskConfig) {
    println!("frontdesk: configuration OK");
    println!("  listen:    {}:{}", config.server.host, config.server.port);
    println!("  database:  {}", config.storage.database_path);
    println!("  site url:  {}", config.server.site_url());
    println!("  openai:    {}", configured(config.openai.api_key.as_deref()));
    println!(
        "  email:     {}",
        if config.email.enabled {
            "smtp"
        } else {
            "log only"
        }
    );
    println!("  stripe:    {}", configured(config.stripe.secret_key.as_deref()));
    println!("  composio:  {}", configured(config.composio.api_key.as_deref()));
    println!("  voice:     {}", configured(config.voice.public_key.as_deref()));
    println!("  admin:     {}", configured(config.admin.bearer_token.as_deref()));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            frontdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("frontdesk: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => print_summary(&config),
    }
}
