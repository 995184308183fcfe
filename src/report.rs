use std::io::{self, Write};

use chrono::TimeZone;

use crate::{
    declare::{QuoteRecord, QuoteState},
    util::datetime,
};

const SYMBOL_WIDTH: usize = 10;
const FAILED: &str = "FAILED";

/// Success and failure counts of one run, with the reason of every failure in
/// input order.
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub succeeded: usize,
    pub failures: Vec<(String, String)>,
}

impl Report {
    pub fn from_records(records: &[QuoteRecord]) -> Self {
        let mut report = Report::default();

        for record in records {
            match &record.state {
                QuoteState::Filled(_) => report.succeeded += 1,
                QuoteState::Failed(why) => report
                    .failures
                    .push((record.symbol.clone(), why.to_string())),
                QuoteState::Pending => report
                    .failures
                    .push((record.symbol.clone(), "not fetched".to_string())),
            }
        }

        report
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// `<symbol>\t<date>\t<price>` for a filled record, `<symbol>\tFAILED\t<reason>`
/// otherwise. The symbol is left aligned in a 10 character column.
pub fn format_row<Tz>(record: &QuoteRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match &record.state {
        QuoteState::Filled(quote) => format!(
            "{:<width$}\t{}\t{}",
            record.symbol,
            datetime::display_in(quote.last_traded_date, tz),
            quote.last_traded_price,
            width = SYMBOL_WIDTH
        ),
        QuoteState::Failed(why) => format!(
            "{:<width$}\t{}\t{}",
            record.symbol,
            FAILED,
            why,
            width = SYMBOL_WIDTH
        ),
        QuoteState::Pending => format!(
            "{:<width$}\t{}\tnot fetched",
            record.symbol,
            FAILED,
            width = SYMBOL_WIDTH
        ),
    }
}

pub fn write_table<W, Tz>(out: &mut W, records: &[QuoteRecord], tz: &Tz) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    for record in records {
        writeln!(out, "{}", format_row(record, tz))?;
    }

    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(
        out,
        "{} succeeded, {} failed",
        report.succeeded,
        report.failed()
    )?;

    for (symbol, reason) in &report.failures {
        writeln!(out, "  {}: {}", symbol, reason)?;
    }

    Ok(())
}

/// `Fetching LTP for AAPL ...` without a line break; [`write_progress_end`]
/// finishes the line.
pub fn write_progress_start<W: Write>(out: &mut W, symbol: &str) -> io::Result<()> {
    write!(out, "Fetching LTP for {} ...", symbol)?;
    out.flush()
}

pub fn write_progress_end<W: Write>(out: &mut W, ok: bool) -> io::Result<()> {
    writeln!(out, "{}", if ok { "done" } else { "failed" })?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        declare::Quote,
        error::{Field, ScrapeError},
    };

    fn filled(symbol: &str) -> QuoteRecord {
        let mut record = QuoteRecord::new(symbol.to_string());
        record.fill(Ok(Quote {
            last_traded_date: NaiveDate::from_ymd_opt(2023, 4, 5).unwrap(),
            last_traded_price: dec!(1234.56),
        }));
        record
    }

    fn failed(symbol: &str) -> QuoteRecord {
        let mut record = QuoteRecord::new(symbol.to_string());
        record.fill(Err(ScrapeError::MissingField(Field::Price)));
        record
    }

    #[test]
    fn test_format_row_filled() {
        assert_eq!(
            format_row(&filled("AAPL"), &Utc),
            "AAPL      \t2023-04-05 00:00:00 +0000\t1234.56"
        );
    }

    #[test]
    fn test_format_row_failed() {
        assert_eq!(
            format_row(&failed("GOOG"), &Utc),
            "GOOG      \tFAILED\tprice marker not found in page"
        );
    }

    #[test]
    fn test_format_row_long_symbol_is_not_cut() {
        let row = format_row(&filled("VERYLONGSYMBOL"), &Utc);
        assert!(row.starts_with("VERYLONGSYMBOL\t"));
    }

    #[test]
    fn test_report_from_records() {
        let records = vec![
            filled("AAPL"),
            failed("GOOG"),
            QuoteRecord::new("MSFT".to_string()),
        ];
        let report = Report::from_records(&records);

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.failures[0].0, "GOOG");
        assert_eq!(report.failures[1], ("MSFT".to_string(), "not fetched".to_string()));
    }

    #[test]
    fn test_write_table_and_summary() {
        let records = vec![filled("AAPL"), failed("GOOG")];
        let mut out = Vec::new();

        write_table(&mut out, &records, &Utc).unwrap();
        write_summary(&mut out, &Report::from_records(&records)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "AAPL      \t2023-04-05 00:00:00 +0000\t1234.56\n\
             GOOG      \tFAILED\tprice marker not found in page\n\
             1 succeeded, 1 failed\n  \
             GOOG: price marker not found in page\n"
        );
    }

    #[test]
    fn test_progress() {
        let mut out = Vec::new();
        write_progress_start(&mut out, "AAPL").unwrap();
        write_progress_end(&mut out, true).unwrap();
        write_progress_start(&mut out, "GOOG").unwrap();
        write_progress_end(&mut out, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Fetching LTP for AAPL ...done\nFetching LTP for GOOG ...failed\n"
        );
    }
}
