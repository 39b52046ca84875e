//! Krunch CLI - multi-algorithm compression tool
//!
//! Compresses and decompresses single files with RLE, Huffman, or LZW.

use clap::{Parser, ValueEnum};
use krunch_core::fsio;
use krunch_core::traits::FileCodec;
use krunch_huffman::HuffmanCodec;
use krunch_lzw::LzwCodec;
use krunch_rle::RleCodec;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "krunch")]
#[command(version, about = "Multi-algorithm compression tool")]
#[command(long_about = "
Krunch compresses and decompresses single files with one of three classic
codecs: run-length encoding, static Huffman coding, or LZW.

Examples:
  krunch --algo rle --mode compress --input sample.txt --output sample.rle
  krunch --algo rle --mode decompress --input sample.rle --output restored.txt
  krunch --algo huffman --mode compress --input sample.txt --output sample.huf
  krunch --algo lzw --mode compress --input sample.txt --output sample.lzw
")]
struct Cli {
    /// Compression algorithm
    #[arg(long, value_enum)]
    algo: Algorithm,

    /// Operation mode
    #[arg(long, value_enum)]
    mode: Mode,

    /// Input file path
    #[arg(long)]
    input: PathBuf,

    /// Output file path
    #[arg(long)]
    output: PathBuf,
}

/// Selectable compression algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Run-length encoding
    Rle,
    /// Static Huffman coding
    Huffman,
    /// LZW with variable-width codes
    Lzw,
}

impl Algorithm {
    fn codec(self) -> &'static dyn FileCodec {
        match self {
            Algorithm::Rle => &RleCodec,
            Algorithm::Huffman => &HuffmanCodec,
            Algorithm::Lzw => &LzwCodec,
        }
    }
}

/// Operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compress the input file
    Compress,
    /// Decompress the input file
    Decompress,
}

fn main() {
    let cli = Cli::parse();

    if cli.input == cli.output {
        eprintln!("Error: input and output files cannot be the same");
        std::process::exit(1);
    }

    let codec = cli.algo.codec();

    println!("Krunch - {}", codec.name());
    println!("Input: {}", cli.input.display());
    println!("Output: {}", cli.output.display());
    println!("---");

    let result = match cli.mode {
        Mode::Compress => codec.compress(&cli.input, &cli.output),
        Mode::Decompress => {
            if !codec.is_valid(&cli.input) {
                eprintln!(
                    "Warning: input does not look like a valid .{} file",
                    codec.extension()
                );
            }
            codec.decompress(&cli.input, &cli.output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match cli.mode {
        Mode::Compress => {
            println!(
                "Compression completed: {} -> {}",
                cli.input.display(),
                cli.output.display()
            );
            println!("Original size: {} bytes", fsio::file_size(&cli.input));
            println!("Compressed size: {} bytes", fsio::file_size(&cli.output));
        }
        Mode::Decompress => {
            println!(
                "Decompression completed: {} -> {}",
                cli.input.display(),
                cli.output.display()
            );
            println!("Compressed size: {} bytes", fsio::file_size(&cli.input));
            println!("Decompressed size: {} bytes", fsio::file_size(&cli.output));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_codec_mapping() {
        assert_eq!(Algorithm::Rle.codec().extension(), "rle");
        assert_eq!(Algorithm::Huffman.codec().extension(), "huf");
        assert_eq!(Algorithm::Lzw.codec().extension(), "lzw");
    }

    #[test]
    fn test_all_flags_parse() {
        let cli = Cli::parse_from([
            "krunch", "--algo", "lzw", "--mode", "compress", "--input", "a.txt", "--output",
            "a.lzw",
        ]);
        assert_eq!(cli.algo, Algorithm::Lzw);
        assert_eq!(cli.mode, Mode::Compress);
        assert_eq!(cli.input, PathBuf::from("a.txt"));
        assert_eq!(cli.output, PathBuf::from("a.lzw"));
    }
}
