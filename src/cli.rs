//! Command-line arguments.
//!
//! Besides the usual `--scrips AAPL,GOOG`, the single-dash spelling
//! `-scrips="AAPL,GOOG"` is accepted for every long option.
use std::{ffi::OsString, path::PathBuf};

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};

use crate::{
    batch::Settings,
    config::{App, SYMBOL_PLACEHOLDER},
    util::text,
};

const LONG_OPTIONS: &[&str] = &["scrips", "strict", "url-template", "config"];

/// Fetch the last traded price and quote date of stock symbols.
#[derive(Debug, Parser)]
#[command(name = "scrappy", version, about, long_about = None)]
pub struct Args {
    /// Enter scrips comma separated. (Example: scrappy -scrips="AAPL,GOOG")
    #[arg(long, value_name = "SYMBOLS")]
    pub scrips: Option<String>,

    /// Stop the whole run at the first network error.
    #[arg(long)]
    pub strict: bool,

    /// Quote page address, `{symbol}` is replaced by each symbol.
    #[arg(long, value_name = "TEMPLATE")]
    pub url_template: Option<String>,

    /// Config file to read instead of ./app.json.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_normalized<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Args::parse_from(normalize(args))
    }

    /// Run settings, or `None` when there is nothing to fetch.
    pub fn settings(&self, app: App) -> Result<Option<Settings>> {
        let symbols = text::split_symbols(self.scrips.as_deref().unwrap_or_default());
        if symbols.is_empty() {
            return Ok(None);
        }

        let mut crawler = app.crawler;
        if let Some(template) = &self.url_template {
            if !template.contains(SYMBOL_PLACEHOLDER) {
                return Err(anyhow!(
                    "--url-template '{}' has no {} placeholder",
                    template,
                    SYMBOL_PLACEHOLDER
                ));
            }
            crawler.url_template = template.clone();
        }

        Ok(Some(Settings {
            symbols,
            crawler,
            strict: self.strict || app.system.strict,
        }))
    }

    pub fn print_help() -> std::io::Result<()> {
        Args::command().print_help()
    }
}

/// Rewrites `-scrips=...` style arguments to `--scrips=...`.
fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };

            let is_single_dash_long = s
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .map(|rest| {
                    let name = rest.split('=').next().unwrap_or(rest);
                    LONG_OPTIONS.contains(&name)
                })
                .unwrap_or(false);

            if is_single_dash_long {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        Args::parse_normalized(list.iter().map(OsString::from))
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_help_shows_no_empty_default() {
        let help = Args::command().render_help().to_string();

        assert!(help.contains("--scrips <SYMBOLS>"), "{}", help);
        assert!(!help.contains("[default: ]"), "{}", help);
        assert!(!help.contains("[default: \"\"]"), "{}", help);
    }

    #[test]
    fn test_missing_scrips_is_none() {
        assert_eq!(args(&["scrappy"]).scrips, None);
    }

    #[test]
    fn test_single_dash_scrips() {
        let parsed = args(&["scrappy", "-scrips=AAPL,GOOG"]);
        assert_eq!(parsed.scrips.as_deref(), Some("AAPL,GOOG"));
        assert!(!parsed.strict);
    }

    #[test]
    fn test_double_dash_options() {
        let parsed = args(&[
            "scrappy",
            "--scrips",
            "MSFT",
            "--strict",
            "--url-template",
            "http://localhost/{symbol}",
        ]);

        assert_eq!(parsed.scrips.as_deref(), Some("MSFT"));
        assert!(parsed.strict);
        assert_eq!(parsed.url_template.as_deref(), Some("http://localhost/{symbol}"));
    }

    #[test]
    fn test_normalize_rewrites_only_known_long_options() {
        let normalized = normalize(
            ["scrappy", "--scrips", "AAPL", "-strict", "-x", "-config=app.json"]
                .iter()
                .map(OsString::from),
        );

        assert_eq!(
            normalized,
            vec!["scrappy", "--scrips", "AAPL", "--strict", "-x", "--config=app.json"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_settings_from_symbols() {
        let settings = args(&["scrappy", "-scrips=AAPL, GOOG"])
            .settings(App::default())
            .unwrap()
            .unwrap();

        assert_eq!(settings.symbols, vec!["AAPL", "GOOG"]);
        assert!(!settings.strict);
    }

    #[test]
    fn test_settings_empty_scrips_means_usage() {
        assert!(args(&["scrappy"]).settings(App::default()).unwrap().is_none());
        assert!(args(&["scrappy", "-scrips="])
            .settings(App::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_settings_strict_from_config() {
        let mut app = App::default();
        app.system.strict = true;

        let settings = args(&["scrappy", "-scrips=AAPL"])
            .settings(app)
            .unwrap()
            .unwrap();

        assert!(settings.strict);
    }

    #[test]
    fn test_settings_url_template_override() {
        let settings = args(&["scrappy", "-scrips=AAPL", "-url-template=http://127.0.0.1/{symbol}"])
            .settings(App::default())
            .unwrap()
            .unwrap();

        assert_eq!(settings.crawler.url_for("AAPL"), "http://127.0.0.1/AAPL");
    }

    #[test]
    fn test_settings_rejects_template_without_placeholder() {
        assert!(args(&["scrappy", "-scrips=AAPL", "--url-template=http://127.0.0.1/"])
            .settings(App::default())
            .is_err());
    }
}
