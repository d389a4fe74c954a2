use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use fqanon::anonymizer::DEFAULT_SEPARATOR;
use fqanon::template::{Template, DEFAULT_TEMPLATE};

use crate::opts::{input_stream, template, InputStream};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Don't display a progress bar/spinner
    #[clap(long, global = true, value_parser)]
    pub no_progress: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the read identifiers of a FASTQ file with random tokens
    Anonymize {
        /// Input FASTQ file to read; `-` is the standard input. Files with a
        /// `gz` or `gzip` extension are decompressed
        #[clap(default_value_t, value_parser = input_stream)]
        input: InputStream,

        /// Output FASTQ file path; `-` is the standard output. Files with a
        /// `gz` or `gzip` extension are compressed
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,

        /// Layout of the read identifiers, with field names in angle brackets
        #[clap(short, long, default_value = DEFAULT_TEMPLATE, value_parser = template)]
        template: Template,

        /// Names of template fields to keep in the anonymized identifiers, in
        /// the order they should appear
        #[clap(short, long, value_parser, value_name = "FIELD", value_delimiter = ',')]
        retain: Vec<String>,

        /// Character placed between the token and each retained field
        #[clap(long, default_value_t = DEFAULT_SEPARATOR, value_parser)]
        separator: char,

        /// Keep the text following the identifier on the title lines
        #[clap(long, value_parser)]
        keep_description: bool,

        /// Seed the random generator, making the output reproducible. Anyone
        /// knowing the seed can recompute the tokens
        #[clap(long, value_parser)]
        seed: Option<u64>,
    },

    /// Print the number of records and bases in a FASTQ file
    Count {
        /// Input FASTQ file to read; `-` is the standard input
        #[clap(default_value_t, value_parser = input_stream)]
        input: InputStream,
    },

    /// Show how the read identifiers are split into template fields
    Fields {
        /// Input FASTQ file to read; `-` is the standard input
        #[clap(default_value_t, value_parser = input_stream)]
        input: InputStream,

        /// Layout of the read identifiers, with field names in angle brackets
        #[clap(short, long, default_value = DEFAULT_TEMPLATE, value_parser = template)]
        template: Template,

        /// Number of records to inspect
        #[clap(short = 'n', long, default_value_t = 10, value_parser)]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use crate::cli::{Cli, Commands};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_anonymize_defaults() {
        let cli = Cli::try_parse_from(["fqanon", "anonymize"]).unwrap();

        match cli.command {
            Commands::Anonymize {
                input,
                output,
                template,
                retain,
                separator,
                keep_description,
                seed,
            } => {
                assert_eq!(input.to_string(), "-");
                assert!(output.is_none());
                assert_eq!(template.len(), 8);
                assert!(retain.is_empty());
                assert_eq!(separator, ':');
                assert!(!keep_description);
                assert!(seed.is_none());
            }
            _ => panic!("Expected the anonymize command"),
        }
    }

    #[test]
    fn should_parse_retained_fields() {
        let cli = Cli::try_parse_from([
            "fqanon",
            "anonymize",
            "reads.fastq.gz",
            "--retain",
            "sense,lane",
            "--retain",
            "tile",
            "--separator",
            "_",
        ])
        .unwrap();

        match cli.command {
            Commands::Anonymize {
                input,
                retain,
                separator,
                ..
            } => {
                assert_eq!(input.to_string(), "reads.fastq.gz");
                assert_eq!(retain, vec!["sense", "lane", "tile"]);
                assert_eq!(separator, '_');
            }
            _ => panic!("Expected the anonymize command"),
        }
    }

    #[test]
    fn should_reject_malformed_template() {
        let result = Cli::try_parse_from(["fqanon", "fields", "--template", "<a<b>>"]);

        assert!(result.is_err());
    }
}
