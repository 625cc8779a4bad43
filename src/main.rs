mod cli;

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use demark::api;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    if cli.json {
        let body = json!({ "text": text }).to_string();
        let response = api::handle("POST", &body);
        match response.body {
            Some(body) => println!("{}", serde_json::to_string_pretty(&body)?),
            None => println!("{{}}"),
        }
        return Ok(());
    }

    let result = demark::analyze_and_clean(&text);

    if cli.quiet {
        println!("{}", result.cleaned);
        return Ok(());
    }

    cli::print_summary(&result);
    Ok(())
}
