use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Result};
use config::{Config as config_config, File as config_file};
use serde::{Deserialize, Serialize};

use crate::{logging, util};

const CONFIG_PATH: &str = "app.json";

/// Where `{symbol}` is substituted with the URL-encoded symbol.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";
pub const DEFAULT_URL_TEMPLATE: &str = "https://finance.google.com/finance?q=NASDAQ:{symbol}";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct App {
    pub crawler: Crawler,
    pub system: System,
}

const SCRAPPY_URL_TEMPLATE: &str = "SCRAPPY_URL_TEMPLATE";
const SCRAPPY_USER_AGENT: &str = "SCRAPPY_USER_AGENT";
const SCRAPPY_TIMEOUT_SECS: &str = "SCRAPPY_TIMEOUT_SECS";
const SCRAPPY_CONNECT_TIMEOUT_SECS: &str = "SCRAPPY_CONNECT_TIMEOUT_SECS";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Crawler {
    pub url_template: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for Crawler {
    fn default() -> Self {
        Crawler {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            user_agent: util::http::USER_AGENT.to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 8,
        }
    }
}

impl Crawler {
    /// The page address for `symbol`.
    pub fn url_for(&self, symbol: &str) -> String {
        self.url_template
            .replace(SYMBOL_PLACEHOLDER, &urlencoding::encode(symbol))
    }
}

const SCRAPPY_STRICT: &str = "SCRAPPY_STRICT";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct System {
    /// Abort the whole run on the first transport error.
    pub strict: bool,
}

impl App {
    /// Loads settings: built-in defaults, then the config file, then the
    /// environment.
    ///
    /// Without an explicit `path` a missing `app.json` is fine; an explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let app = match path {
            Some(p) if !p.exists() => {
                return Err(anyhow!("Config file {} does not exist", p.display()));
            }
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    App::default()
                }
            }
        };

        app.validate()?;
        Ok(app.override_with_env())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let app: App = config_config::builder()
            .add_source(config_file::from(path))
            .build()?
            .try_deserialize()?;

        logging::info_file_async(format!("Loaded config from {}", path.display()));

        Ok(app)
    }

    /// A template without the placeholder would fetch the same page for
    /// every symbol.
    pub fn validate(&self) -> Result<()> {
        if !self.crawler.url_template.contains(SYMBOL_PLACEHOLDER) {
            return Err(anyhow!(
                "url_template '{}' has no {} placeholder",
                self.crawler.url_template,
                SYMBOL_PLACEHOLDER
            ));
        }

        Ok(())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(self) -> Self {
        self.override_with(|key| env::var(key).ok())
    }

    fn override_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(template) = lookup(SCRAPPY_URL_TEMPLATE) {
            if template.contains(SYMBOL_PLACEHOLDER) {
                self.crawler.url_template = template;
            } else {
                logging::warn_file_async(format!(
                    "Ignoring {}='{}': no {} placeholder",
                    SCRAPPY_URL_TEMPLATE, template, SYMBOL_PLACEHOLDER
                ));
            }
        }

        if let Some(user_agent) = lookup(SCRAPPY_USER_AGENT) {
            self.crawler.user_agent = user_agent;
        }

        if let Some(secs) = lookup(SCRAPPY_TIMEOUT_SECS) {
            self.crawler.timeout_secs = parse_or(SCRAPPY_TIMEOUT_SECS, &secs, self.crawler.timeout_secs);
        }

        if let Some(secs) = lookup(SCRAPPY_CONNECT_TIMEOUT_SECS) {
            self.crawler.connect_timeout_secs = parse_or(
                SCRAPPY_CONNECT_TIMEOUT_SECS,
                &secs,
                self.crawler.connect_timeout_secs,
            );
        }

        if let Some(strict) = lookup(SCRAPPY_STRICT) {
            self.system.strict = matches!(
                strict.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        self
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, value: &str, fallback: T) -> T {
    match T::from_str(value.trim()) {
        Ok(v) => v,
        Err(_) => {
            logging::warn_file_async(format!("Ignoring {}='{}': not a number", key, value));
            fallback
        }
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
