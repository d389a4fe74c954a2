use std::io::{BufRead, BufWriter, Write};
use std::sync::Arc;

use anyhow::Context;
use fqanon::anonymizer::{Anonymizer, RetentionPolicy};
use fqanon::fastq::reader::FastqReader;
use fqanon::fastq::writer::FastqWriter;
use fqanon::pipeline::{anonymize_stream_with_params, PipelineParams};
use fqanon::progress::ProgressNotifier;
use fqanon::template::Template;
use log::warn;

/// Creates the anonymizer and checks the retained fields against the
/// template, so that no output is produced for an unusable configuration.
pub fn build_anonymizer(
    template: &Template,
    retain: &[String],
    separator: char,
    seed: Option<u64>,
) -> anyhow::Result<Anonymizer> {
    let policy = RetentionPolicy::new(retain, separator);
    let anonymizer = match seed {
        Some(seed) => {
            warn!("Using a fixed seed; anyone knowing it can recompute the tokens");
            Anonymizer::with_seed(policy, seed)
        }
        None => Anonymizer::from_entropy(policy),
    };

    anonymizer
        .check_policy(template)
        .with_context(|| format!("Cannot retain fields using template `{}`", template))?;

    Ok(anonymizer)
}

/// Anonymizes all records of `reader` and writes them to `writer`, which is
/// returned once all the data has been flushed.
pub fn anonymize<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    template: &Template,
    anonymizer: &mut Anonymizer,
    keep_description: bool,
    progress_notifier: Arc<dyn ProgressNotifier>,
) -> anyhow::Result<W> {
    let fastq_reader = FastqReader::new(reader);
    let mut fastq_writer = FastqWriter::new(BufWriter::new(writer));

    let params = PipelineParams::builder()
        .keep_description(keep_description)
        .progress_notifier(progress_notifier)
        .build();
    anonymize_stream_with_params(
        fastq_reader,
        &mut fastq_writer,
        template,
        anonymizer,
        &params,
    )
    .context("Failed to anonymize the FASTQ file")?;

    let writer = fastq_writer
        .into_inner()
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Could not flush the output")?;
    Ok(writer)
}
