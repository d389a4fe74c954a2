#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use cmd::{anonymize, count, fields};
use human_panic::setup_panic;
use lazy_static::lazy_static;

use crate::logging::init_logging;
use crate::opts::OutputWriter;
use crate::progress_bar::RecordProgressBar;

mod cli;
mod cmd;
mod logging;
mod opts;
mod progress_bar;

lazy_static! {
    pub(crate) static ref PROGRESS_BAR: RecordProgressBar = RecordProgressBar::new();
}

fn main() -> anyhow::Result<()> {
    setup_panic!();

    let cli: Cli = Cli::parse();

    if !cli.no_progress {
        PROGRESS_BAR.show();
    }

    init_logging(cli.verbose.log_level_filter()).expect("Could not initialize logging");

    match &cli.command {
        Commands::Anonymize {
            input,
            output,
            template,
            retain,
            separator,
            keep_description,
            seed,
        } => {
            let mut anonymizer =
                anonymize::build_anonymizer(template, retain, *separator, *seed)?;

            let reader = input.as_reader()?;
            PROGRESS_BAR.set_total_bytes(reader.length()?);
            let output = OutputWriter::from_option(output)?;

            let output = anonymize::anonymize(
                reader.into_buf_read(),
                output,
                template,
                &mut anonymizer,
                *keep_description,
                Arc::new(PROGRESS_BAR.clone()),
            )?;
            output.finish().context("Could not finish writing the output")?;
        }
        Commands::Count { input } => {
            let reader = input.as_reader()?;
            PROGRESS_BAR.set_total_bytes(reader.length()?);

            count::count(reader.into_buf_read(), io::stdout(), &*PROGRESS_BAR)
                .context("Failed to count records")?;
        }
        Commands::Fields {
            input,
            template,
            limit,
        } => {
            let reader = input.as_reader()?;

            fields::fields(reader.into_buf_read(), io::stdout(), template, *limit)?;
        }
    }

    PROGRESS_BAR.finish();
    Ok(())
}
