use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::fastq::reader::FastqReader;
use crate::fastq::writer::FastqWriter;
use crate::record::FastqRecord;

pub const SIMPLE_IDENTIFIER: &str = "HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/1";

pub const SIMPLE_IDENTIFIER_FIELDS: [(&str, &str); 8] = [
    ("instrument", "HWI-D00119"),
    ("run number", "50"),
    ("flowcell ID", "H7AP8ADXX"),
    ("lane", "1"),
    ("tile", "1101"),
    ("x-pos", "1318"),
    ("y-pos", "44446"),
    ("sense", "1"),
];

pub const EMPTY_TEST_RECORD_STR: &str = "@seq

+

";

lazy_static! {
    pub static ref EMPTY_TEST_RECORD: FastqRecord = FastqRecord::new("seq", "", "");
}

pub const SIMPLE_TEST_RECORD_STR: &str = "@SEQ_ID
GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTT
+
!''*((((***+))%%%++)(%%%%).1***-+*''))**55CCF>>>>>>CCCCCCC65
";

pub const SIMPLE_TEST_RECORD_SEPARATOR_TITLE_STR: &str = "@SEQ_ID
GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTT
+SEQ_ID
!''*((((***+))%%%++)(%%%%).1***-+*''))**55CCF>>>>>>CCCCCCC65
";

lazy_static! {
    pub static ref SIMPLE_TEST_RECORD: FastqRecord = FastqRecord::new(
        "SEQ_ID",
        "GATTTGGGGTTCAAAGCAGTATCGATCAAATAGTAAATCCATTTGTTCAACTCACAGTTT",
        "!''*((((***+))%%%++)(%%%%).1***-+*''))**55CCF>>>>>>CCCCCCC65",
    );
}

/// Reads matching the default template, in both orientations, one of them
/// carrying a description.
pub const ILLUMINA_FASTQ: &str = "@HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/1
NTGCTCACTGCAAGCTCCGCCTCCCGGGTTCACGCCATTCTCCTGCCTCAG
+
#1=DDFFFHHHHHJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJ
@HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/2
CCTTCGGCCAGCCAGCGCGGGGAGGGCGGCCGGTGCAGAGCCCGAGGCCA
+
@@@DDDDDHHHHHIIIIIIGIIIIIIIIIIIIIIIIIIIIIIIIIIIIII
@HWI-D00119:50:H7AP8ADXX:1:1101:1496:44499/1 extra description
GGGTTGCAGAGGCCAGAAGGCAAACCCTGGCTGGAGCAGG
+
CCCFFFFFHHHHHJJJJJJJJJJJJJJJJJJJJJJJJJJJ
";

lazy_static! {
    pub static ref ILLUMINA_RECORDS: Vec<FastqRecord> = vec![
        FastqRecord::new(
            "HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/1",
            "NTGCTCACTGCAAGCTCCGCCTCCCGGGTTCACGCCATTCTCCTGCCTCAG",
            "#1=DDFFFHHHHHJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJJ",
        ),
        FastqRecord::new(
            "HWI-D00119:50:H7AP8ADXX:1:1101:1318:44446/2",
            "CCTTCGGCCAGCCAGCGCGGGGAGGGCGGCCGGTGCAGAGCCCGAGGCCA",
            "@@@DDDDDHHHHHIIIIIIGIIIIIIIIIIIIIIIIIIIIIIIIIIIIII",
        ),
        FastqRecord::new(
            "HWI-D00119:50:H7AP8ADXX:1:1101:1496:44499/1",
            "GGGTTGCAGAGGCCAGAAGGCAAACCCTGGCTGGAGCAGG",
            "CCCFFFFFHHHHHJJJJJJJJJJJJJJJJJJJJJJJJJJJ",
        )
        .with_description("extra description"),
    ];
}

lazy_static! {
    pub static ref GENERATED_1K_READS: Vec<FastqRecord> = generate_illumina_records(1000, 76);
    pub static ref GENERATED_1K_READS_FASTQ: Vec<u8> = records_to_fastq(&GENERATED_1K_READS);
}

/// Generates records with random Illumina-like identifiers matching the
/// default template.
#[must_use]
pub fn generate_illumina_records(num: usize, length: usize) -> Vec<FastqRecord> {
    const ACIDS: &[u8] = b"ACGTN";

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1337);
    let mut records = Vec::with_capacity(num);

    for i in 0..num {
        let identifier = format!(
            "HWI-D{:05}:{}:H7AP8ADXX:{}:{}:{}:{}/{}",
            rng.gen_range(0..100_000),
            rng.gen_range(1..200),
            rng.gen_range(1..=8),
            rng.gen_range(1101..=2316),
            rng.gen_range(0..20_000),
            rng.gen_range(0..200_000),
            i % 2 + 1
        );
        let sequence: Vec<u8> = (0..length)
            .map(|_| *ACIDS.choose(&mut rng).unwrap())
            .collect();
        let quality: Vec<u8> = (0..length).map(|_| rng.gen_range(b'!'..=b'J')).collect();

        records.push(FastqRecord::new(identifier, sequence, quality));
    }

    records
}

#[must_use]
pub fn records_to_fastq(records: &[FastqRecord]) -> Vec<u8> {
    let mut writer = FastqWriter::new(Vec::new());
    for record in records {
        writer.write_record(record).unwrap();
    }

    writer.into_inner()
}

#[must_use]
pub fn fastq_to_records(data: &[u8]) -> Vec<FastqRecord> {
    let parser = FastqReader::new(data);
    let result: Result<Vec<_>, _> = parser.into_iter().collect();
    result.unwrap()
}
