pub mod batch;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod declare;
pub mod error;
pub mod logging;
pub mod report;
pub mod util;

use std::{env, io, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;

use crate::{cli::Args, config::App, crawler::HttpQuotePage};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse_normalized(env::args_os());

    let code = match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            logging::error_file_async(format!("{:?}", why));
            logging::error_console(format!("{:#}", why));
            ExitCode::FAILURE
        }
    };

    logging::flush(Duration::from_secs(2));
    code
}

async fn run(args: Args) -> Result<()> {
    let app = App::load(args.config.as_deref())?;
    let Some(settings) = args.settings(app)? else {
        Args::print_help().context("Failed to print usage")?;
        return Ok(());
    };

    logging::info_file_async(format!(
        "Fetching {} symbol(s) from {}",
        settings.symbols.len(),
        settings.crawler.url_template
    ));

    let client = util::http::build_client(&settings.crawler)?;
    let page = HttpQuotePage::new(client);
    let mut stdout = io::stdout().lock();

    batch::run(&settings, &page, &mut stdout, &Local).await?;

    Ok(())
}
