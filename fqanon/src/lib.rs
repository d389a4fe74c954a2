//! Template-driven anonymization of read identifiers in FASTQ files.
//!
//! A [`template::Template`] describes how named fields are laid out inside an
//! identifier. Identifiers are split into fields with it, and an
//! [`anonymizer::Anonymizer`] replaces each identifier with a pseudonymous
//! token followed by the fields the [`anonymizer::RetentionPolicy`] keeps.
//! [`pipeline::anonymize_stream`] applies this to a whole file, one record at
//! a time.

pub mod anonymizer;
pub mod fastq;
pub mod identifier;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod stats;
pub mod template;

#[doc(hidden)]
pub mod _internal_test_data;
