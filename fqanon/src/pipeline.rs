use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use rand::RngCore;

use crate::anonymizer::{AnonymizeError, Anonymizer};
use crate::fastq::reader::{FastqReaderError, FastqResult};
use crate::fastq::writer::{FastqWriteResult, FastqWriter, FastqWriterError};
use crate::progress::{ByteNum, DummyProgressNotifier, ProgressNotifier};
use crate::record::FastqRecord;
use crate::template::Template;

/// Error aborting an anonymization run.
#[derive(Debug)]
pub enum PipelineError {
    /// The input records could not be read.
    Read(FastqReaderError),
    /// A record could not be written to the output.
    Write(FastqWriterError),
    /// The identifier of a record could not be anonymized. `record` is the
    /// 1-based index of the failing record.
    Anonymize { record: usize, error: AnonymizeError },
}

impl From<FastqReaderError> for PipelineError {
    fn from(e: FastqReaderError) -> Self {
        Self::Read(e)
    }
}

impl From<FastqWriterError> for PipelineError {
    fn from(e: FastqWriterError) -> Self {
        Self::Write(e)
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Read(e) => write!(f, "Could not read record: {}", e),
            PipelineError::Write(e) => write!(f, "Could not write record: {}", e),
            PipelineError::Anonymize { record, error } => {
                write!(f, "Could not anonymize record #{}: {}", record, error)
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Read(e) => Some(e),
            PipelineError::Write(e) => Some(e),
            PipelineError::Anonymize { error, .. } => Some(error),
        }
    }
}

/// The result of an anonymization run.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Destination of anonymized records.
pub trait RecordSink {
    fn write_record(&mut self, record: &FastqRecord) -> FastqWriteResult<()>;

    fn flush(&mut self) -> FastqWriteResult<()> {
        Ok(())
    }
}

impl<W: Write> RecordSink for FastqWriter<W> {
    fn write_record(&mut self, record: &FastqRecord) -> FastqWriteResult<()> {
        FastqWriter::write_record(self, record)
    }

    fn flush(&mut self) -> FastqWriteResult<()> {
        FastqWriter::flush(self)
    }
}

impl RecordSink for Vec<FastqRecord> {
    fn write_record(&mut self, record: &FastqRecord) -> FastqWriteResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<T: RecordSink + ?Sized> RecordSink for &mut T {
    fn write_record(&mut self, record: &FastqRecord) -> FastqWriteResult<()> {
        T::write_record(self, record)
    }

    fn flush(&mut self) -> FastqWriteResult<()> {
        T::flush(self)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineParams {
    keep_description: bool,
    progress_notifier: Arc<dyn ProgressNotifier>,
}

impl PipelineParams {
    #[must_use]
    pub fn builder() -> PipelineParamsBuilder {
        PipelineParamsBuilder::new()
    }
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct PipelineParamsBuilder {
    keep_description: bool,
    progress_notifier: Arc<dyn ProgressNotifier>,
}

impl PipelineParamsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            keep_description: false,
            progress_notifier: Arc::new(DummyProgressNotifier),
        }
    }

    /// Keep the text after the identifier on the title line. Off by default,
    /// as it often carries the original identifier or sample barcodes.
    pub fn keep_description(&mut self, keep_description: bool) -> &mut Self {
        let new = self;
        new.keep_description = keep_description;
        new
    }

    pub fn progress_notifier(&mut self, progress_notifier: Arc<dyn ProgressNotifier>) -> &mut Self {
        let new = self;
        new.progress_notifier = progress_notifier;
        new
    }

    #[must_use]
    pub fn build(&self) -> PipelineParams {
        PipelineParams {
            keep_description: self.keep_description,
            progress_notifier: self.progress_notifier.clone(),
        }
    }
}

impl Default for PipelineParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces the identifier of every record read from `source` and writes the
/// result to `sink`, in the same order.
///
/// Returns the number of records written. The first error aborts the run;
/// records preceding the failing one may have already been written.
///
/// # Examples
/// ```
/// use fqanon::anonymizer::{Anonymizer, RetentionPolicy};
/// use fqanon::fastq::reader::FastqReader;
/// use fqanon::pipeline::anonymize_stream;
/// use fqanon::record::FastqRecord;
/// use fqanon::template::Template;
///
/// let input = "@HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/2\nACGT\n+\n!!!!\n";
/// let template = Template::default();
/// let mut anonymizer = Anonymizer::with_seed(RetentionPolicy::new(["sense"], ':'), 42);
/// let mut output: Vec<FastqRecord> = Vec::new();
///
/// let count = anonymize_stream(
///     FastqReader::new(input.as_bytes()),
///     &mut output,
///     &template,
///     &mut anonymizer,
/// )
/// .unwrap();
/// assert_eq!(count, 1);
/// assert!(output[0].identifier().str().ends_with(":2"));
/// ```
pub fn anonymize_stream<I, S, R>(
    source: I,
    sink: &mut S,
    template: &Template,
    anonymizer: &mut Anonymizer<R>,
) -> PipelineResult<usize>
where
    I: IntoIterator<Item = FastqResult<FastqRecord>>,
    S: RecordSink + ?Sized,
    R: RngCore,
{
    anonymize_stream_with_params(
        source,
        sink,
        template,
        anonymizer,
        &PipelineParams::default(),
    )
}

/// [`anonymize_stream`] with custom parameters.
pub fn anonymize_stream_with_params<I, S, R>(
    source: I,
    sink: &mut S,
    template: &Template,
    anonymizer: &mut Anonymizer<R>,
    params: &PipelineParams,
) -> PipelineResult<usize>
where
    I: IntoIterator<Item = FastqResult<FastqRecord>>,
    S: RecordSink + ?Sized,
    R: RngCore,
{
    let start = Instant::now();
    let mut count = 0;
    let mut bytes = ByteNum::ZERO;

    debug!("Anonymizing records with template `{}`", template);
    for record in source {
        let record = record?;
        let size = record.size();

        let identifier = anonymizer
            .anonymize_identifier(record.identifier().str(), template)
            .map_err(|error| PipelineError::Anonymize {
                record: count + 1,
                error,
            })?;
        let record = if params.keep_description {
            record.with_identifier(identifier)
        } else {
            record
                .with_identifier(identifier)
                .with_description_discarded()
        };

        sink.write_record(&record)?;
        count += 1;
        bytes += size;
        params.progress_notifier.processed_bytes(size);
        params.progress_notifier.inc_records(1);
    }
    sink.flush()?;

    info!(
        "Anonymized {} records ({} bytes) in {:.3}s",
        count,
        bytes.get(),
        start.elapsed().as_secs_f32()
    );
    Ok(count)
}
