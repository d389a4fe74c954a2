use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::fastq::{FASTQ_QUALITY_SCORE_SEPARATOR, FASTQ_TITLE_PREFIX};
use crate::record::FastqRecord;

#[derive(Debug)]
pub enum FastqWriterError {
    IoError(std::io::Error),
}

impl From<std::io::Error> for FastqWriterError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for FastqWriterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FastqWriterError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl Error for FastqWriterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FastqWriterError::IoError(e) => Some(e),
        }
    }
}

pub type FastqWriteResult<T> = Result<T, FastqWriterError>;

#[derive(Debug, Clone)]
pub struct FastqWriterParams {
    output_title_with_separator: bool,
}

impl FastqWriterParams {
    #[must_use]
    pub fn builder() -> FastqWriterParamsBuilder {
        FastqWriterParamsBuilder::new()
    }
}

impl Default for FastqWriterParams {
    fn default() -> Self {
        FastqWriterParamsBuilder::default().build()
    }
}

#[derive(Debug, Clone)]
pub struct FastqWriterParamsBuilder {
    output_title_with_separator: bool,
}

impl FastqWriterParamsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_title_with_separator: false,
        }
    }

    /// Always repeat the title on the `+` line, even for records that did not
    /// have it repeated when read.
    pub fn output_title_with_separator(&mut self, output_title_with_separator: bool) -> &mut Self {
        let new = self;
        new.output_title_with_separator = output_title_with_separator;
        new
    }

    #[must_use]
    pub fn build(&self) -> FastqWriterParams {
        FastqWriterParams {
            output_title_with_separator: self.output_title_with_separator,
        }
    }
}

impl Default for FastqWriterParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct FastqWriter<W> {
    writer: W,
    params: FastqWriterParams,
}

impl<W: Write> FastqWriter<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_params(writer, FastqWriterParams::default())
    }

    #[must_use]
    pub fn with_params(writer: W, params: FastqWriterParams) -> Self {
        Self { writer, params }
    }

    pub fn write_record(&mut self, record: &FastqRecord) -> FastqWriteResult<()> {
        let title = record.title();

        self.output_title(&title)?;
        self.output_line(record.sequence())?;
        self.output_quality_scores_separator(&title, record.title_repeated())?;
        self.output_line(record.quality())?;

        Ok(())
    }

    fn output_title(&mut self, title: &str) -> FastqWriteResult<()> {
        writeln!(&mut self.writer, "{}{}", FASTQ_TITLE_PREFIX, title)?;

        Ok(())
    }

    fn output_line(&mut self, data: &[u8]) -> FastqWriteResult<()> {
        self.writer.write_all(data)?;
        writeln!(&mut self.writer)?;

        Ok(())
    }

    fn output_quality_scores_separator(
        &mut self,
        title: &str,
        title_repeated: bool,
    ) -> FastqWriteResult<()> {
        write!(
            &mut self.writer,
            "{}",
            FASTQ_QUALITY_SCORE_SEPARATOR as char
        )?;
        if self.params.output_title_with_separator || title_repeated {
            write!(&mut self.writer, "{}", title)?;
        }
        writeln!(&mut self.writer)?;

        Ok(())
    }

    pub fn flush(&mut self) -> FastqWriteResult<()> {
        self.writer.flush()?;

        Ok(())
    }

    /// Consumes the writer, returning the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::ErrorKind::NotFound;

    use crate::_internal_test_data::{
        EMPTY_TEST_RECORD, EMPTY_TEST_RECORD_STR, ILLUMINA_FASTQ, ILLUMINA_RECORDS,
        SIMPLE_TEST_RECORD, SIMPLE_TEST_RECORD_SEPARATOR_TITLE_STR, SIMPLE_TEST_RECORD_STR,
    };
    use crate::fastq::writer::{FastqWriter, FastqWriterError, FastqWriterParams};
    use crate::record::FastqRecord;

    #[test]
    fn should_return_empty_record() {
        let mut buf = Vec::new();
        FastqWriter::new(&mut buf)
            .write_record(&EMPTY_TEST_RECORD)
            .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), EMPTY_TEST_RECORD_STR);
    }

    #[test]
    fn should_return_simple_record() {
        let mut buf = Vec::new();
        FastqWriter::new(&mut buf)
            .write_record(&SIMPLE_TEST_RECORD)
            .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), SIMPLE_TEST_RECORD_STR);
    }

    #[test]
    fn should_output_title_with_separator() {
        let mut buf = Vec::new();
        let params = FastqWriterParams::builder()
            .output_title_with_separator(true)
            .build();
        FastqWriter::with_params(&mut buf, params)
            .write_record(&SIMPLE_TEST_RECORD)
            .unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            SIMPLE_TEST_RECORD_SEPARATOR_TITLE_STR
        );
    }

    #[test]
    fn should_repeat_new_title_if_title_was_repeated() {
        let record = FastqRecord::new("OLD", "AC", "!!")
            .with_title_repeated(true)
            .with_identifier("NEW");

        let mut buf = Vec::new();
        FastqWriter::new(&mut buf).write_record(&record).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "@NEW\nAC\n+NEW\n!!\n");
    }

    #[test]
    fn should_write_description() {
        let record = FastqRecord::new("SEQ", "A", "!").with_description("1:N:0:1");

        let mut buf = Vec::new();
        FastqWriter::new(&mut buf).write_record(&record).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "@SEQ 1:N:0:1\nA\n+\n!\n");
    }

    #[test]
    fn should_write_records_in_order() {
        let mut writer = FastqWriter::new(Vec::new());
        for record in ILLUMINA_RECORDS.iter() {
            writer.write_record(record).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), ILLUMINA_FASTQ);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", FastqWriterError::from(std::io::Error::from(NotFound))),
            "IO error: entity not found"
        )
    }

    #[test]
    fn test_error_source() {
        assert!(FastqWriterError::from(std::io::Error::from(NotFound))
            .source()
            .is_some());
    }
}
