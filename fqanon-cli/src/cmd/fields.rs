use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use fqanon::fastq::reader::FastqReader;
use fqanon::template::Template;
use itertools::Itertools;
use log::{info, warn};

/// Prints the identifier of the first `limit` records followed by the value
/// of every template field, one record per line.
///
/// Fails if any of the inspected identifiers does not match the template.
pub fn fields<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    template: &Template,
    limit: usize,
) -> anyhow::Result<()> {
    let mut inspected = 0;
    let mut failed = 0;

    for record in FastqReader::new(reader).into_iter().take(limit) {
        let record = record.context("Could not parse a record from the FASTQ file")?;
        let identifier = record.identifier().str();
        inspected += 1;

        match template.parse_identifier(identifier) {
            Ok(fields) => {
                let values = template
                    .field_names()
                    .map(|name| format!("{}={}", name, fields.get(name).unwrap_or_default()))
                    .join("\t");
                writeln!(writer, "{}\t{}", identifier, values)?;
            }
            Err(e) => {
                warn!("Record {} does not match the template: {}", inspected, e);
                writeln!(writer, "{}\t!{}", identifier, e)?;
                failed += 1;
            }
        }
    }
    writer.flush()?;

    if failed > 0 {
        bail!(
            "{} of {} identifiers do not match template `{}`",
            failed,
            inspected,
            template
        );
    }

    info!("All {} identifiers match template `{}`", inspected, template);
    Ok(())
}
