use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::TimeZone;

use crate::{
    config::Crawler,
    crawler::{self, QuotePage},
    declare::QuoteRecord,
    logging,
    report::{self, Report},
};

/// Everything one run needs, built once from the config layers and the
/// command line.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Symbols in the order they were given.
    pub symbols: Vec<String>,
    pub crawler: Crawler,
    /// Abort on the first transport error instead of recording it.
    pub strict: bool,
}

/// Fetches every symbol in order, one at a time, then prints the table and the
/// summary.
///
/// Per-symbol failures end up in the table and in the returned [`Report`]. In
/// strict mode a transport error ends the run with an `Err` before anything
/// else is fetched or printed.
pub async fn run<P, W, Tz>(settings: &Settings, page: &P, out: &mut W, tz: &Tz) -> Result<Report>
where
    P: QuotePage + Sync + ?Sized,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut records: Vec<QuoteRecord> = settings
        .symbols
        .iter()
        .cloned()
        .map(QuoteRecord::new)
        .collect();

    for record in records.iter_mut() {
        report::write_progress_start(out, &record.symbol)?;
        let outcome = crawler::fetch_quote(page, &settings.crawler, &record.symbol).await;
        report::write_progress_end(out, outcome.is_ok())?;

        match &outcome {
            Ok(quote) => logging::info_file_async(format!(
                "{} {} {}",
                record.symbol, quote.last_traded_date, quote.last_traded_price
            )),
            Err(why) if settings.strict && why.is_transport() => {
                logging::error_file_async(format!("{}: {}", record.symbol, why));
                return Err(anyhow!("Aborting run at {}: {}", record.symbol, why));
            }
            Err(why) => logging::warn_file_async(format!("{}: {}", record.symbol, why)),
        }

        record.fill(outcome);
    }

    let summary = Report::from_records(&records);

    report::write_table(out, &records, tz)?;
    report::write_summary(out, &summary)?;

    logging::info_file_async(format!(
        "Run finished: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed()
    ));

    Ok(summary)
}
