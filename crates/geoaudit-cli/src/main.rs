//! `geoaudit` command-line entry point.

mod args;

use anyhow::{Context, Result};
use args::{Cli, Command};
use clap::Parser;
use geoaudit_audit::{parser_for, AuditError, AuditRequest, Auditor, ContextBuilder};
use geoaudit_browser::{ContentExtractor, FetchError};
use geoaudit_core::{AppConfig, AuditRecord, ParseStrategy};
use geoaudit_llm::AnthropicProvider;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Log to stderr so stdout carries only command output.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,geoaudit=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config =
        AppConfig::load_with_env(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(timeout) = cli.timeout {
        config.browser.navigation_timeout_secs = timeout;
    }

    match cli.command {
        Command::Audit {
            url,
            content_file,
            no_scrape,
            strategy,
        } => {
            let strategy = strategy.unwrap_or(config.report.strategy);
            audit(&config, url, content_file.as_deref(), no_scrape, strategy).await
        }
        Command::Scrape { url, context } => scrape(&config, &url, context).await,
        Command::Parse {
            file,
            strategy,
            url,
        } => {
            let strategy = strategy.unwrap_or(config.report.strategy);
            parse(file.as_deref(), strategy, url.unwrap_or_default())
        }
    }
}

async fn audit(
    config: &AppConfig,
    url: String,
    content_file: Option<&Path>,
    no_scrape: bool,
    strategy: ParseStrategy,
) -> Result<ExitCode> {
    let provider = AnthropicProvider::from_config(&config.llm)
        .context("failed to initialise the Anthropic provider")?;
    let auditor = Auditor::new(ContentExtractor::chromium(&config.browser), Arc::new(provider))
        .with_strategy(strategy)
        .with_llm_config(&config.llm);

    let mut request = AuditRequest::new(url);
    if let Some(path) = content_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        request = request.with_content(content);
    }
    if no_scrape {
        request = request.without_scrape();
    }

    match auditor.audit(&request).await {
        Ok(record) => {
            print_json(&record)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let AuditError::Fetch(fetch) = &e {
                warn_on_timeout(fetch);
            }
            tracing::error!(url = %request.url, "audit failed: {e}");
            print_json(&AuditRecord::failed(request.url))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn scrape(config: &AppConfig, url: &str, context: bool) -> Result<ExitCode> {
    let page = ContentExtractor::chromium(&config.browser)
        .extract(url)
        .await
        .inspect_err(warn_on_timeout)
        .with_context(|| format!("failed to extract {url}"))?;

    if context {
        print!("{}", ContextBuilder::build(&page));
    } else {
        print_json(&page)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn parse(file: Option<&Path>, strategy: ParseStrategy, url: String) -> Result<ExitCode> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    print_json(&parser_for(strategy).parse(&url, &raw))?;
    Ok(ExitCode::SUCCESS)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn warn_on_timeout(err: &FetchError) {
    if let Some(hint) = timeout_hint(err) {
        tracing::warn!("{hint}");
    }
}

/// Guidance for a page that never reached DOM-ready within the bound.
fn timeout_hint(err: &FetchError) -> Option<&'static str> {
    err.is_timeout().then_some(
        "the page did not reach DOM-ready in time; raise --timeout or \
         GEOAUDIT_NAVIGATION_TIMEOUT_SECS",
    )
}
