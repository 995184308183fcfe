use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ScrapeError;

/// 最新成交價與其報價日期
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub last_traded_date: NaiveDate,
    pub last_traded_price: Decimal,
}

#[derive(Debug)]
pub enum QuoteState {
    /// Not fetched yet.
    Pending,
    Filled(Quote),
    Failed(ScrapeError),
}

/// One line of the final table. Created from the symbol list before any
/// network traffic and filled exactly once afterwards.
#[derive(Debug)]
pub struct QuoteRecord {
    /// Security code, exactly as given on the command line.
    pub symbol: String,
    pub state: QuoteState,
}

impl QuoteRecord {
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            state: QuoteState::Pending,
        }
    }

    /// Stores the outcome of the fetch. A record that already holds an
    /// outcome keeps it.
    pub fn fill(&mut self, outcome: Result<Quote, ScrapeError>) {
        if !matches!(self.state, QuoteState::Pending) {
            return;
        }

        self.state = match outcome {
            Ok(quote) => QuoteState::Filled(quote),
            Err(why) => QuoteState::Failed(why),
        };
    }
}
