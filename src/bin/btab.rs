//! `btab` — the command-line face of the bintable codec.
//!
//! Thin shell over the library: each subcommand is one stateless transform.
//! Argument handling stays here; no codec logic lives in this file.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bintable::{BintableConfig, Codec};

#[derive(Parser)]
#[command(name = "btab", version, about = "Column-split binary table codec")]
struct Cli {
    /// Path to a JSON config file (codec, block size). Flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read CSV on stdin, write a container to FILE (or stdout).
    Encode {
        /// Output file; stdout when omitted.
        out: Option<PathBuf>,
    },
    /// Split a container into per-column artifact files, listing their
    /// names on stdout, one per line, in ascending column order.
    Split {
        /// Container file.
        container: PathBuf,
        /// Artifact name prefix.
        #[arg(short = 'l', long, default_value = "col")]
        prefix: String,
        /// Directory to write artifacts into.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Decode a whole container back to CSV on stdout.
    Cat {
        /// Container file.
        container: PathBuf,
    },
    /// Decompress one split artifact and print its values, one per line.
    Col {
        /// Artifact file (as produced by `split`).
        artifact: PathBuf,
        /// Codec the artifact was compressed with.
        #[arg(long, value_parser = parse_codec, default_value = "lz4")]
        codec: Codec,
    },
}

fn parse_codec(s: &str) -> Result<Codec, String> {
    match s {
        "raw" => Ok(Codec::Raw),
        "lz4" => Ok(Codec::Lz4),
        "zstd" => Ok(Codec::Zstd { level: 3 }),
        other => Err(format!("unknown codec '{other}' (raw, lz4, zstd)")),
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<BintableConfig, bintable::BintableError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(BintableConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), bintable::BintableError> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Encode { out } => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            let container = bintable::encode_csv(&text, &config)?;
            match out {
                Some(path) => std::fs::write(path, container)?,
                None => std::io::stdout().write_all(&container)?,
            }
        }
        Commands::Split {
            container,
            prefix,
            dir,
        } => {
            let bytes = std::fs::read(container)?;
            let names = bintable::split_container(&bytes, &prefix, &dir)?;
            let mut stdout = std::io::stdout().lock();
            for name in names {
                writeln!(stdout, "{name}")?;
            }
        }
        Commands::Cat { container } => {
            let bytes = std::fs::read(container)?;
            print!("{}", bintable::decode_csv(&bytes)?);
        }
        Commands::Col { artifact, codec } => {
            let payload = std::fs::read(artifact)?;
            let value_stream = bintable::decompress_column(&payload, codec)?;
            let text = bintable::rehydrate_column(&value_stream)?;
            let mut stdout = std::io::stdout().lock();
            if text.is_empty() {
                writeln!(stdout)?;
            } else {
                for line in text.split('\n') {
                    writeln!(stdout, "{line}")?;
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("btab: {e}");
            ExitCode::FAILURE
        }
    }
}
