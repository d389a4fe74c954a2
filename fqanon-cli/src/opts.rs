use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use atty::Stream;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use fqanon::template::Template;
use log::{debug, info, warn};

/// Returns whether the file name looks like a gzip-compressed file, i.e. any
/// of its dot-separated components after the first one is `gz` or `gzip`.
///
/// `reads.gz.fastq` is treated as compressed, while `gz.fastq` is not.
#[must_use]
pub fn is_gzip_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .split('.')
                .skip(1)
                .any(|component| component == "gz" || component == "gzip")
        })
        .unwrap_or(false)
}

fn is_std_stream(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

pub fn template(template: &str) -> Result<Template, String> {
    template.parse().map_err(|e| format!("{}", e))
}

pub fn input_stream(path: &str) -> Result<InputStream, String> {
    let result = InputStream {
        path: PathBuf::from(path),
    };

    Ok(result)
}

#[derive(Debug, Clone)]
pub struct InputStream {
    path: PathBuf,
}

impl Display for InputStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Default for InputStream {
    fn default() -> Self {
        Self {
            path: PathBuf::from("-"),
        }
    }
}

impl InputStream {
    pub fn as_reader(&self) -> anyhow::Result<InputReader> {
        InputReader::from_path(&self.path)
    }
}

#[derive(Debug)]
pub enum InputReader {
    Stdin(io::Stdin),
    File(File),
    GzFile(File),
}

impl InputReader {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        if is_std_stream(path) {
            info!("Input file: standard input");
            if atty::is(Stream::Stdin) {
                warn!("Reading FASTQ records from the terminal; press Ctrl-D to finish");
            }
            return Ok(Self::Stdin(io::stdin()));
        }

        info!("Input file: {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Could not open input file {}", path.display()))?;

        let val = if is_gzip_path(path) {
            debug!("Treating {} as gzip-compressed", path.display());
            Self::GzFile(file)
        } else {
            Self::File(file)
        };
        Ok(val)
    }

    /// Number of bytes the FASTQ reader is going to consume, if known
    /// upfront.
    ///
    /// Compressed files report `None`, since only their compressed size is
    /// known.
    pub fn length(&self) -> anyhow::Result<Option<u64>> {
        let val = match self {
            InputReader::Stdin(_) | InputReader::GzFile(_) => None,
            InputReader::File(file) => Some(file.metadata()?.len()),
        };
        Ok(val)
    }

    #[must_use]
    pub fn into_buf_read(self) -> Box<dyn BufRead + Send> {
        match self {
            InputReader::Stdin(stdin) => Box::new(BufReader::new(stdin)),
            InputReader::File(file) => Box::new(BufReader::new(file)),
            InputReader::GzFile(file) => {
                Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(file))))
            }
        }
    }
}

#[derive(Debug)]
pub enum OutputWriter {
    Stdout(io::Stdout),
    File(File),
    GzFile(GzEncoder<File>),
}

impl OutputWriter {
    pub fn from_option(output: &Option<PathBuf>) -> anyhow::Result<Self> {
        match output {
            Some(path) => Self::from_path(path),
            None => Self::from_path(Path::new("-")),
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        if is_std_stream(path) {
            info!("Output file: standard output");
            return Ok(Self::Stdout(io::stdout()));
        }

        info!("Output file: {}", path.display());
        let file = File::create(path)
            .with_context(|| format!("Could not create output file {}", path.display()))?;

        let writer = if is_gzip_path(path) {
            debug!("Compressing {} with gzip", path.display());
            Self::GzFile(GzEncoder::new(file, Compression::default()))
        } else {
            Self::File(file)
        };
        Ok(writer)
    }

    /// Flushes the stream, writing the gzip trailer if the output is
    /// compressed.
    pub fn finish(self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(mut stdout) => stdout.flush(),
            OutputWriter::File(mut file) => file.flush(),
            OutputWriter::GzFile(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputWriter::Stdout(stdout) => stdout.write(buf),
            OutputWriter::File(file) => file.write(buf),
            OutputWriter::GzFile(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(stdout) => stdout.flush(),
            OutputWriter::File(file) => file.flush(),
            OutputWriter::GzFile(encoder) => encoder.flush(),
        }
    }
}
