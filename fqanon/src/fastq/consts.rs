const FASTQ_QUALITY_SCORE_BYTE_START: u8 = b'!';
const FASTQ_QUALITY_SCORE_BYTE_END: u8 = b'~';

pub(super) const FASTQ_VALID_Q_SCORE_BYTES: [bool; 256] = {
    let mut valid = [false; 256];

    let mut byte = FASTQ_QUALITY_SCORE_BYTE_START;
    while byte <= FASTQ_QUALITY_SCORE_BYTE_END {
        valid[byte as usize] = true;
        byte += 1;
    }

    valid
};
