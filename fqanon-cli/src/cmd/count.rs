use std::io::{BufRead, Write};

use anyhow::Context;
use fqanon::fastq::reader::FastqReader;
use fqanon::progress::ProgressNotifier;
use fqanon::stats::{count_records, RecordStats};
use log::info;

/// Counts the records of `reader` and writes `<records>\t<bases>` to
/// `writer`.
pub fn count<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    progress_notifier: &dyn ProgressNotifier,
) -> anyhow::Result<RecordStats> {
    let records = FastqReader::new(reader).into_iter().inspect(|record| {
        if let Ok(record) = record {
            progress_notifier.processed_bytes(record.size());
            progress_notifier.inc_records(1);
        }
    });
    let stats = count_records(records).context("Could not parse a record from the FASTQ file")?;

    info!("Read {}", stats);
    writeln!(writer, "{}\t{}", stats.records, stats.total_length)?;
    writer.flush()?;

    Ok(stats)
}
