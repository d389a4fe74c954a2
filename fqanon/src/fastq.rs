//! FASTQ record source and sink.

mod consts;
pub mod reader;
pub mod writer;

pub(crate) const FASTQ_TITLE_PREFIX: char = '@';
pub(crate) const FASTQ_QUALITY_SCORE_SEPARATOR: u8 = b'+';
