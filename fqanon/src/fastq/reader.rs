use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io::BufRead;

use crate::fastq::consts::FASTQ_VALID_Q_SCORE_BYTES;
use crate::fastq::{FASTQ_QUALITY_SCORE_SEPARATOR, FASTQ_TITLE_PREFIX};
use crate::progress::ByteNum;
use crate::record::FastqRecord;

/// Error occurring during parsing a FASTQ file.
#[derive(Debug)]
pub enum FastqReaderError {
    /// I/O error occurred when reading the FASTQ file.
    IoError(std::io::Error),
    /// End-Of-File reached in the middle of reading the file.
    EofReached,
    /// Not a valid FASTQ file.
    InvalidFormat,
    /// The title line is not valid UTF-8.
    InvalidUtf8(std::str::Utf8Error),
    /// Invalid quality score character.
    InvalidQualityScore(char),
    /// The length of the sequence and quality scores is not equal.
    SequenceAndQualityLengthMismatch,
}

impl From<std::io::Error> for FastqReaderError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for FastqReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FastqReaderError::IoError(e) => write!(f, "IO error: {}", e),
            FastqReaderError::EofReached => write!(f, "Reached the end of file"),
            FastqReaderError::InvalidFormat => write!(f, "Invalid format"),
            FastqReaderError::InvalidUtf8(e) => write!(f, "Title is not valid UTF-8: {}", e),
            FastqReaderError::InvalidQualityScore(ch) => {
                write!(f, "Invalid quality score: `{}`", ch)
            }
            FastqReaderError::SequenceAndQualityLengthMismatch => {
                write!(f, "Sequence and quality score length mismatch")
            }
        }
    }
}

impl Error for FastqReaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FastqReaderError::IoError(e) => Some(e),
            FastqReaderError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

/// The result of a FASTQ reading operation.
pub type FastqResult<T> = Result<T, FastqReaderError>;

/// A builder for `FastqReaderParams`.
#[derive(Debug, Clone)]
pub struct FastqReaderParamsBuilder {
    delimiter: u8,
}

impl FastqReaderParamsBuilder {
    /// Returns a new instance of `FastqReaderParamsBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self { delimiter: b'\n' }
    }

    /// Sets the delimiter character to use instead of a newline.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        let new = self;
        new.delimiter = delimiter;
        new
    }

    /// Builds and returns [`FastqReaderParams`].
    pub fn build(&self) -> FastqReaderParams {
        FastqReaderParams {
            delimiter: self.delimiter,
        }
    }
}

impl Default for FastqReaderParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// FASTQ reading params.
#[derive(Debug, Clone)]
pub struct FastqReaderParams {
    delimiter: u8,
}

impl FastqReaderParams {
    /// Returns new builder for `FastqReaderParams`.
    #[must_use]
    pub fn builder() -> FastqReaderParamsBuilder {
        FastqReaderParamsBuilder::new()
    }
}

impl Default for FastqReaderParams {
    fn default() -> Self {
        FastqReaderParamsBuilder::default().build()
    }
}

/// FASTQ format reader, producing one [`FastqRecord`] at a time.
#[derive(Debug)]
pub struct FastqReader<R> {
    reader: R,
    params: FastqReaderParams,
    bytes_read: usize,
    in_record: bool,
    buffer: Vec<u8>,
}

impl<R: BufRead> FastqReader<R> {
    /// Creates new `FastqReader` instance with default parameters.
    ///
    /// # Examples
    /// ```
    /// use fqanon::fastq::reader::FastqReader;
    ///
    /// let buf = Vec::new();
    /// let _reader = FastqReader::new(buf.as_slice());
    /// ```
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_params(reader, FastqReaderParams::default())
    }

    /// Creates new `FastqReader` instance with given parameters.
    ///
    /// # Examples
    /// ```
    /// use fqanon::fastq::reader::{FastqReader, FastqReaderParams};
    ///
    /// let buf = Vec::new();
    /// let params = FastqReaderParams::builder().delimiter(b'#').build();
    /// let _reader = FastqReader::with_params(buf.as_slice(), params);
    /// ```
    #[must_use]
    pub fn with_params(reader: R, params: FastqReaderParams) -> Self {
        Self {
            reader,
            params,
            bytes_read: 0,
            in_record: false,
            buffer: Vec::with_capacity(4096),
        }
    }

    /// Reads a single FASTQ record from given reader.
    pub fn read_record(&mut self) -> FastqResult<FastqRecord> {
        self.bytes_read = 0;
        self.in_record = false;
        let (identifier, description) = self.parse_title()?;
        self.in_record = true;
        let sequence = self.parse_sequence()?;
        let title_repeated = self.parse_separator()?;
        let quality = self.parse_quality_scores()?;

        if sequence.len() != quality.len() {
            return Err(FastqReaderError::SequenceAndQualityLengthMismatch);
        }

        let mut record =
            FastqRecord::with_size(identifier, sequence, quality, ByteNum::new(self.bytes_read))
                .with_title_repeated(title_repeated);
        if let Some(description) = description {
            record = record.with_description(description);
        }
        Ok(record)
    }

    /// Reads the title line and splits it into the identifier and the
    /// optional description.
    pub fn parse_title(&mut self) -> FastqResult<(String, Option<String>)> {
        let line = loop {
            let line = Self::read_line(
                &mut self.reader,
                self.params.delimiter,
                &mut self.buffer,
                &mut self.bytes_read,
            )?;
            let line = std::str::from_utf8(line).map_err(FastqReaderError::InvalidUtf8)?;

            if !line.trim().is_empty() {
                break line;
            }
        };

        let title = line
            .strip_prefix(FASTQ_TITLE_PREFIX)
            .ok_or(FastqReaderError::InvalidFormat)?
            .trim_end();

        let result = match title.split_once(char::is_whitespace) {
            Some((identifier, description)) => (
                identifier.to_owned(),
                Some(description.trim_start().to_owned()),
            ),
            None => (title.to_owned(), None),
        };
        Ok(result)
    }

    /// Reads the sequence line.
    pub fn parse_sequence(&mut self) -> FastqResult<Vec<u8>> {
        let line = Self::read_line(
            &mut self.reader,
            self.params.delimiter,
            &mut self.buffer,
            &mut self.bytes_read,
        )?;

        Ok(line.to_vec())
    }

    /// Reads the sequence-quality separator line. Returns `true` if the line
    /// repeats the title.
    pub fn parse_separator(&mut self) -> FastqResult<bool> {
        let line = Self::read_line(
            &mut self.reader,
            self.params.delimiter,
            &mut self.buffer,
            &mut self.bytes_read,
        )?;
        if line.is_empty() || line[0] != FASTQ_QUALITY_SCORE_SEPARATOR {
            return Err(FastqReaderError::InvalidFormat);
        }

        Ok(line.len() > 1)
    }

    /// Reads the quality score line.
    pub fn parse_quality_scores(&mut self) -> FastqResult<Vec<u8>> {
        let line = Self::read_line(
            &mut self.reader,
            self.params.delimiter,
            &mut self.buffer,
            &mut self.bytes_read,
        )?;

        if let Some(&ch) = line
            .iter()
            .find(|&&ch| !FASTQ_VALID_Q_SCORE_BYTES[ch as usize])
        {
            return Err(FastqReaderError::InvalidQualityScore(ch as char));
        }

        Ok(line.to_vec())
    }

    fn read_line<'a, T: BufRead>(
        mut buf_reader: T,
        delimiter: u8,
        buffer: &'a mut Vec<u8>,
        total_bytes_read: &mut usize,
    ) -> FastqResult<&'a [u8]> {
        buffer.clear();
        let bytes_read = buf_reader.read_until(delimiter, buffer)?;
        if bytes_read == 0 {
            return Err(FastqReaderError::EofReached);
        }
        *total_bytes_read += bytes_read;

        let mut buffer = buffer.as_slice();
        while let Some(&last) = buffer.last() {
            if last != delimiter && last != b'\r' {
                break;
            }
            buffer = &buffer[..buffer.len() - 1];
        }

        Ok(buffer)
    }
}

impl<R: BufRead> IntoIterator for FastqReader<R> {
    type Item = FastqResult<FastqRecord>;
    type IntoIter = FastqReaderIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            reader: self,
            no_errors: true,
        }
    }
}

/// Iterator implementation for [`FastqReader`] which iterates over all
/// records in a file.
#[derive(Debug)]
pub struct FastqReaderIterator<R> {
    reader: FastqReader<R>,
    no_errors: bool,
}

impl<R: BufRead> Iterator for FastqReaderIterator<R> {
    type Item = FastqResult<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.no_errors {
            return None;
        }

        let result = self.reader.read_record();
        if result.is_err() {
            self.no_errors = false;
            // EOF before the title line is a regular end of the file
            if matches!(result, Err(FastqReaderError::EofReached)) && !self.reader.in_record {
                return None;
            }
        }
        Some(result)
    }
}
