use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    crawler::google::Google,
    declare::Quote,
    error::{Field, ScrapeError},
    util::{datetime, text},
};

static PRICE_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+itemprop="price"\s+content="(?P<ltp>[^"]*)"\s*/?>"#)
        .expect("price pattern")
});

static QUOTE_TIME_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+itemprop="quoteTime"\s+content="(?P<ltd>[^"]*)"\s*/?>"#)
        .expect("quoteTime pattern")
});

/// Digits with optional thousands separators and exactly one decimal point.
static PRICE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d[\d,]*\.\d+$").expect("price text pattern"));

/// `<date>T<time>`, both parts without blanks.
static QUOTE_TIME_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+T\S+$").expect("quote time text pattern"));

impl Google {
    /// Pulls the last traded price and quote date out of a quote page.
    ///
    /// Both fields must be present and well formed; otherwise the error names
    /// the first field that is missing or unreadable. The price is looked at
    /// before the quote time.
    pub fn extract(html: &str) -> Result<Quote, ScrapeError> {
        let last_traded_price = Self::extract_price(html)?;
        let last_traded_date = Self::extract_quote_date(html)?;

        Ok(Quote {
            last_traded_date,
            last_traded_price,
        })
    }

    fn extract_price(html: &str) -> Result<rust_decimal::Decimal, ScrapeError> {
        let ltp = capture(&PRICE_META, html, "ltp").ok_or(ScrapeError::MissingField(Field::Price))?;

        if !PRICE_TEXT.is_match(ltp) {
            return Err(ScrapeError::MalformedPrice(ltp.to_string()));
        }

        text::parse_decimal(ltp, None).map_err(|_| ScrapeError::MalformedPrice(ltp.to_string()))
    }

    fn extract_quote_date(html: &str) -> Result<chrono::NaiveDate, ScrapeError> {
        let ltd = capture(&QUOTE_TIME_META, html, "ltd")
            .ok_or(ScrapeError::MissingField(Field::QuoteTime))?;

        if !QUOTE_TIME_TEXT.is_match(ltd) {
            return Err(ScrapeError::MalformedDate(ltd.to_string()));
        }

        datetime::parse_quote_date(ltd)
    }
}

fn capture<'h>(re: &Regex, html: &'h str, name: &str) -> Option<&'h str> {
    re.captures(html)
        .and_then(|caps| caps.name(name))
        .map(|m| m.as_str())
}
