use criterion::{criterion_group, criterion_main, Criterion};
use fqanon::_internal_test_data::{GENERATED_1K_READS, GENERATED_1K_READS_FASTQ};
use fqanon::fastq::reader::FastqReader;
use fqanon::fastq::writer::FastqWriter;

fn read_1k_reads(c: &mut Criterion) {
    c.bench_function("Read 1k reads from FASTQ", |b| {
        b.iter(|| {
            let reader = FastqReader::new(GENERATED_1K_READS_FASTQ.as_slice());
            let result: Result<Vec<_>, _> = reader.into_iter().collect();
            assert_eq!(result.unwrap().len(), 1000);
        })
    });
}

fn write_1k_reads(c: &mut Criterion) {
    c.bench_function("Write 1k reads to FASTQ", |b| {
        b.iter(|| {
            let mut writer = FastqWriter::new(Vec::new());
            for record in GENERATED_1K_READS.iter() {
                writer.write_record(record).unwrap();
            }
            assert_eq!(writer.into_inner().len(), GENERATED_1K_READS_FASTQ.len());
        })
    });
}

criterion_group!(benches, read_1k_reads, write_1k_reads);
criterion_main!(benches);
