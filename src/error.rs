use strum::Display;
use thiserror::Error;

/// The two fields pulled out of a quote page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Field {
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "quoteTime")]
    QuoteTime,
}

/// Why a single symbol produced no quote.
///
/// Every variant is recoverable at the batch level: the symbol is reported as
/// failed and the run moves on. Only [`ScrapeError::Transport`] can abort the
/// run, and only in strict mode.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{0} marker not found in page")]
    MissingField(Field),

    #[error("price '{0}' is not a number")]
    MalformedPrice(String),

    #[error("quote date '{0}' is not a YYYY-MM-DD date")]
    MalformedDate(String),
}

impl ScrapeError {
    /// The reason is the error's message followed by its source chain,
    /// e.g. `client error (Connect): tcp connect error: Connection refused`.
    pub fn transport(url: &str, why: &(dyn std::error::Error + 'static)) -> Self {
        let mut messages: Vec<String> = vec![why.to_string()];
        let mut source = why.source();

        while let Some(cause) = source {
            let message = cause.to_string();
            if !messages.iter().any(|m| m.contains(&message)) {
                messages.push(message);
            }
            source = cause.source();
        }

        ScrapeError::Transport {
            url: url.to_string(),
            reason: messages.join(": "),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ScrapeError::Transport { .. })
    }
}
