use std::fmt::{Display, Formatter};

use crate::fastq::reader::FastqResult;
use crate::record::FastqRecord;

/// Number of records in a FASTQ file and the sum of their sequence lengths.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RecordStats {
    pub records: u64,
    pub total_length: u64,
}

impl RecordStats {
    pub fn add(&mut self, record: &FastqRecord) {
        self.records += 1;
        self.total_length += record.len() as u64;
    }

    /// Average sequence length, or `0.0` if there are no records.
    #[must_use]
    pub fn mean_length(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }

        self.total_length as f64 / self.records as f64
    }
}

impl Display for RecordStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records, {} bases ({:.2} bases per record)",
            self.records,
            self.total_length,
            self.mean_length()
        )
    }
}

/// Reads all records from `source` and counts them.
///
/// # Examples
/// ```
/// use fqanon::fastq::reader::FastqReader;
/// use fqanon::stats::count_records;
///
/// let input = "@r1\nACGT\n+\n!!!!\n@r2\nAC\n+\n!!\n";
/// let stats = count_records(FastqReader::new(input.as_bytes())).unwrap();
/// assert_eq!(stats.records, 2);
/// assert_eq!(stats.total_length, 6);
/// ```
pub fn count_records<I>(source: I) -> FastqResult<RecordStats>
where
    I: IntoIterator<Item = FastqResult<FastqRecord>>,
{
    let mut stats = RecordStats::default();
    for record in source {
        stats.add(&record?);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use crate::_internal_test_data::{
        EMPTY_TEST_RECORD_STR, GENERATED_1K_READS_FASTQ, ILLUMINA_FASTQ,
    };
    use crate::fastq::reader::{FastqReader, FastqReaderError};
    use crate::stats::{count_records, RecordStats};

    #[test]
    fn test_count_illumina() {
        let stats = count_records(FastqReader::new(ILLUMINA_FASTQ.as_bytes())).unwrap();

        assert_eq!(
            stats,
            RecordStats {
                records: 3,
                total_length: 51 + 50 + 40
            }
        );
    }

    #[test]
    fn test_count_generated() {
        let stats = count_records(FastqReader::new(GENERATED_1K_READS_FASTQ.as_slice())).unwrap();

        assert_eq!(stats.records, 1000);
        assert_eq!(stats.total_length, 76_000);
        assert_eq!(stats.mean_length(), 76.0);
    }

    #[test]
    fn test_count_empty() {
        let stats = count_records(FastqReader::new("".as_bytes())).unwrap();
        assert_eq!(stats, RecordStats::default());
        assert_eq!(stats.mean_length(), 0.0);

        let stats = count_records(FastqReader::new(EMPTY_TEST_RECORD_STR.as_bytes())).unwrap();
        assert_eq!(stats.records, 1);
        assert_eq!(stats.total_length, 0);
    }

    #[test]
    fn test_count_error() {
        let error = count_records(FastqReader::new("@r1\nA\n+\n!!\n".as_bytes())).unwrap_err();

        assert!(matches!(
            error,
            FastqReaderError::SequenceAndQualityLengthMismatch
        ));
    }

    #[test]
    fn test_display() {
        let stats = RecordStats {
            records: 4,
            total_length: 10,
        };

        assert_eq!(stats.to_string(), "4 records, 10 bases (2.50 bases per record)");
    }
}
