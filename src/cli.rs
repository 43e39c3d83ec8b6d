use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "scour",
    about = "Incremental full-text indexing for the files on your disk"
)]
pub struct Cli {
    /// Override the XDG data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract text from files or directories and add it to the index
    Index(IndexArgs),
    /// Search the index
    Query(QueryArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Index --

#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Files or directories to index
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Skip files larger than this many bytes
    #[arg(long, default_value_t = 1_000_000)]
    pub max_size: u64,

    /// Add a custom extension-to-content-type mapping (EXT=TYPE)
    #[arg(long = "mime", value_name = "EXT=TYPE")]
    pub mime_mappings: Vec<String>,

    /// Density to use when rasterizing PDFs for OCR
    #[arg(long, default_value_t = 300)]
    pub pdf_density: u32,

    /// Location of the tesseract language data
    #[arg(long)]
    pub tessdata: Option<PathBuf>,
}

// -- Query --

#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Search terms (joined with spaces)
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Skip this many results
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "scour",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_query_defaults() {
        let cli = Cli::parse_from(["scour", "query", "hello", "world"]);
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.terms, vec!["hello", "world"]);
                assert_eq!(args.count, 10);
                assert_eq!(args.offset, 0);
                assert!(!args.json);
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn parse_index_with_mappings() {
        let cli = Cli::parse_from([
            "scour",
            "index",
            "--mime",
            ".org=text/x-org",
            "--max-size",
            "2000000",
            "/home/user/notes",
        ]);
        match cli.command {
            Command::Index(args) => {
                assert_eq!(args.paths.len(), 1);
                assert_eq!(args.max_size, 2_000_000);
                assert_eq!(args.mime_mappings, vec![".org=text/x-org"]);
                assert_eq!(args.pdf_density, 300);
            }
            _ => panic!("expected index command"),
        }
    }

    #[test]
    fn index_requires_paths() {
        assert!(Cli::try_parse_from(["scour", "index"]).is_err());
    }
}
