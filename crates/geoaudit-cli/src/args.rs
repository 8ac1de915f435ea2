use clap::{Parser, Subcommand};
use geoaudit_core::ParseStrategy;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "geoaudit")]
#[command(about = "Audit web pages for search and generative engine optimization")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "GEOAUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Navigation timeout in seconds, overriding the configuration
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a page, ask the model for an audit and print the record as JSON
    Audit {
        /// Page to audit
        #[arg(value_parser = parse_page_url)]
        url: String,

        /// Use this file as page content instead of rendering the page
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Do not render the page; audit from the URL alone
        #[arg(long, conflicts_with = "content_file")]
        no_scrape: bool,

        /// Report format to request and parse (heuristic or json)
        #[arg(long)]
        strategy: Option<ParseStrategy>,
    },

    /// Render a page and print what was extracted
    Scrape {
        /// Page to render
        #[arg(value_parser = parse_page_url)]
        url: String,

        /// Print the bounded model context instead of the full page as JSON
        #[arg(long)]
        context: bool,
    },

    /// Parse a saved model response into an audit record
    Parse {
        /// Response file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Report format of the response (heuristic or json)
        #[arg(long)]
        strategy: Option<ParseStrategy>,

        /// URL recorded in the output
        #[arg(long, value_parser = parse_page_url)]
        url: Option<String>,
    },
}

/// Accept only absolute `http`/`https` URLs.
fn parse_page_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{value}': {e}"))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url.to_string()),
        "http" | "https" => Err(format!("URL '{value}' has no host")),
        other => Err(format!("unsupported scheme '{other}', expected http or https")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_args() {
        let cli = Cli::try_parse_from([
            "geoaudit",
            "--timeout",
            "30",
            "audit",
            "https://example.com",
            "--strategy",
            "json",
        ])
        .expect("valid arguments");

        assert_eq!(cli.timeout, Some(30));
        match cli.command {
            Command::Audit {
                url,
                strategy,
                no_scrape,
                content_file,
            } => {
                assert_eq!(url, "https://example.com/");
                assert_eq!(strategy, Some(ParseStrategy::Json));
                assert!(!no_scrape);
                assert!(content_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_http_urls() {
        for url in ["example.com", "ftp://example.com/file", "file:///etc/passwd"] {
            let result = Cli::try_parse_from(["geoaudit", "scrape", url]);
            assert!(result.is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn test_no_scrape_conflicts_with_content_file() {
        let result = Cli::try_parse_from([
            "geoaudit",
            "audit",
            "https://example.com",
            "--no-scrape",
            "--content-file",
            "page.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_reads_stdin_by_default() {
        let cli = Cli::try_parse_from(["geoaudit", "parse"]).expect("valid arguments");
        match cli.command {
            Command::Parse { file, url, strategy } => {
                assert!(file.is_none());
                assert!(url.is_none());
                assert!(strategy.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_page_url() {
        assert_eq!(
            parse_page_url("http://example.com/a?b=1").as_deref(),
            Ok("http://example.com/a?b=1")
        );
        assert!(parse_page_url("https://").is_err());
        assert!(parse_page_url("mailto:someone@example.com").is_err());
    }
}
