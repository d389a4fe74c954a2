use std::fmt::{Display, Formatter};

use crate::progress::ByteNum;

/// Identifier (first word of the title line) of a sequencing read.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Default)]
pub struct RecordIdentifier(pub String);

impl RecordIdentifier {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns this identifier as string.
    #[inline]
    #[must_use]
    pub fn str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RecordIdentifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single FASTQ record.
///
/// The sequence and quality lines are kept as raw bytes; nothing in this crate
/// interprets them.
#[derive(Clone, Debug, Eq)]
pub struct FastqRecord {
    identifier: RecordIdentifier,
    description: Option<String>,
    sequence: Vec<u8>,
    quality: Vec<u8>,
    title_repeated: bool,
    size: ByteNum,
}

impl FastqRecord {
    /// Creates a new instance of `FastqRecord`.
    ///
    /// # Examples
    /// ```
    /// use fqanon::record::FastqRecord;
    ///
    /// let record = FastqRecord::new("SEQ_1", "ACG", "!!#");
    /// assert_eq!(record.identifier().str(), "SEQ_1");
    /// assert_eq!(record.len(), 3);
    /// ```
    ///
    /// # Panics
    /// This function panics if the sequence and quality lengths differ.
    #[must_use]
    pub fn new<T, U, V>(identifier: T, sequence: U, quality: V) -> Self
    where
        T: Into<RecordIdentifier>,
        U: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        let identifier = identifier.into();
        let sequence = sequence.into();
        let quality = quality.into();

        const FASTQ_BOILERPLATE_LEN: usize = "@\n\n+\n\n".len();
        let approximate_size =
            identifier.len() + sequence.len() + quality.len() + FASTQ_BOILERPLATE_LEN;

        Self::with_size(identifier, sequence, quality, ByteNum::new(approximate_size))
    }

    #[must_use]
    pub fn with_size<T, U, V>(identifier: T, sequence: U, quality: V, size: ByteNum) -> Self
    where
        T: Into<RecordIdentifier>,
        U: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        let sequence = sequence.into();
        let quality = quality.into();
        assert_eq!(sequence.len(), quality.len());

        Self {
            identifier: identifier.into(),
            description: None,
            sequence,
            quality,
            title_repeated: false,
            size,
        }
    }

    /// Returns the identifier of this record.
    #[must_use]
    pub fn identifier(&self) -> &RecordIdentifier {
        &self.identifier
    }

    /// Returns the part of the title line after the identifier, if any.
    ///
    /// # Examples
    /// ```
    /// use fqanon::record::FastqRecord;
    ///
    /// let record = FastqRecord::new("SEQ_1", "", "").with_description("1:N:0:ATCACG");
    /// assert_eq!(record.description(), Some("1:N:0:ATCACG"));
    /// assert_eq!(record.title(), "SEQ_1 1:N:0:ATCACG");
    /// ```
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the full title line (without the leading `@`).
    #[must_use]
    pub fn title(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {}", self.identifier, description),
            None => self.identifier.to_string(),
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[must_use]
    pub fn quality(&self) -> &[u8] {
        &self.quality
    }

    /// Whether the `+` line of this record repeats the title.
    #[must_use]
    pub fn title_repeated(&self) -> bool {
        self.title_repeated
    }

    /// Returns a new record, identical to `self`, but with given identifier.
    #[must_use]
    pub fn with_identifier<T>(self, identifier: T) -> Self
    where
        T: Into<RecordIdentifier>,
    {
        Self {
            identifier: identifier.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_description<T>(self, description: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Returns a new record, identical to `self`, but without the description.
    #[must_use]
    pub fn with_description_discarded(self) -> Self {
        Self {
            description: None,
            ..self
        }
    }

    #[must_use]
    pub fn with_title_repeated(self, title_repeated: bool) -> Self {
        Self {
            title_repeated,
            ..self
        }
    }

    /// Returns the length of the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Approximate size of the record in the file it was read from.
    #[must_use]
    pub fn size(&self) -> ByteNum {
        self.size
    }

    /// Returns `true` if the record has an empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl PartialEq for FastqRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.description == other.description
            && self.sequence == other.sequence
            && self.quality == other.quality
    }
}
