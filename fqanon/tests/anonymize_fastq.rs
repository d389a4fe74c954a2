use fqanon::_internal_test_data::{
    fastq_to_records, GENERATED_1K_READS, GENERATED_1K_READS_FASTQ,
};
use fqanon::anonymizer::{Anonymizer, RetentionPolicy};
use fqanon::fastq::reader::FastqReader;
use fqanon::fastq::writer::FastqWriter;
use fqanon::pipeline::anonymize_stream;
use fqanon::stats::count_records;
use fqanon::template::Template;

fn anonymize_generated(seed: u64, retained: &[&str]) -> Vec<u8> {
    let template = Template::default();
    let mut anonymizer = Anonymizer::with_seed(RetentionPolicy::new(retained.iter().copied(), ':'), seed);
    let mut writer = FastqWriter::new(Vec::new());

    let count = anonymize_stream(
        FastqReader::new(GENERATED_1K_READS_FASTQ.as_slice()),
        &mut writer,
        &template,
        &mut anonymizer,
    )
    .unwrap();
    assert_eq!(count, GENERATED_1K_READS.len());

    writer.into_inner()
}

#[test_log::test]
fn test_anonymize_1k_reads() {
    let output = anonymize_generated(1337, &["sense"]);
    let records = fastq_to_records(&output);

    assert_eq!(records.len(), GENERATED_1K_READS.len());
    for (index, (input, output)) in GENERATED_1K_READS.iter().zip(&records).enumerate() {
        assert_eq!(input.sequence(), output.sequence());
        assert_eq!(input.quality(), output.quality());

        let expected_sense = format!(":{}", index % 2 + 1);
        assert!(
            output.identifier().str().ends_with(&expected_sense),
            "record #{}: {}",
            index,
            output.identifier()
        );
        assert!(!output.identifier().str().contains("H7AP8ADXX"));
    }
}

#[test]
fn test_anonymize_preserves_stats() {
    let output = anonymize_generated(1, &[]);

    assert_eq!(
        count_records(FastqReader::new(output.as_slice())).unwrap(),
        count_records(FastqReader::new(GENERATED_1K_READS_FASTQ.as_slice())).unwrap()
    );
}

#[test]
fn test_anonymize_deterministic_with_seed() {
    assert_eq!(
        anonymize_generated(42, &["lane", "sense"]),
        anonymize_generated(42, &["lane", "sense"])
    );
    assert_ne!(
        anonymize_generated(42, &["lane", "sense"]),
        anonymize_generated(43, &["lane", "sense"])
    );
}

#[test]
fn test_generated_identifiers_round_trip() {
    let template = Template::default();

    for record in GENERATED_1K_READS.iter() {
        let identifier = record.identifier().str();
        let fields = template.parse_identifier(identifier).unwrap();

        assert_eq!(fields.len(), template.len());
        assert_eq!(fields.get("flowcell ID"), Some("H7AP8ADXX"));
        assert_eq!(fields.reconstruct(&template).as_deref(), Some(identifier));
    }
}
