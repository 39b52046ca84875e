//! # Krunch-Huffman: static Huffman coding
//!
//! Two passes over the input: a frequency count, then an encode against the
//! code table derived from the tree. The compressed container stores the
//! pre-order serialized tree ahead of the payload so the decompressor can
//! rebuild the exact tree without access to the frequencies:
//!
//! ```text
//! u32 original_size | u32 tree_bits | tree bytes | u32 payload_bits | payload
//! ```
//!
//! All `u32` fields are little-endian regardless of host; both bit segments
//! are packed MSB-first and independently zero-padded to a byte boundary.
//! Two degenerate variants avoid storing a tree at all: an empty input
//! compresses to the 4-byte size field alone, and an input holding a single
//! distinct byte compresses to the size field plus that raw byte.
//!
//! ## Example
//!
//! ```
//! let compressed = krunch_huffman::compress(b"abracadabra").unwrap();
//! let restored = krunch_huffman::decompress(&compressed).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod tree;

pub use tree::{Code, CodeTable, HuffmanTree, TreeNode};

use krunch_core::bitstream::{BitReader, BitWriter};
use krunch_core::error::{KrunchError, Result};
use krunch_core::fsio;
use krunch_core::traits::FileCodec;
use std::fs;
use std::io;
use std::path::Path;

/// Count occurrences of each byte value in one pass.
pub fn frequency_table(input: &[u8]) -> [u64; 256] {
    let mut freqs = [0u64; 256];
    for &byte in input {
        freqs[byte as usize] += 1;
    }
    freqs
}

/// Append one code word, splitting codes wider than the 32-bit write window.
fn write_code(writer: &mut BitWriter, code: Code) -> Result<()> {
    if code.len > 32 {
        writer.write_bits((code.bits >> 32) as u32, code.len - 32)?;
        writer.write_bits(code.bits as u32, 32)?;
    } else {
        writer.write_bits(code.bits as u32, code.len)?;
    }
    Ok(())
}

fn size_field(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        KrunchError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{what} exceeds the format's 32-bit field"),
        ))
    })
}

/// Compress `input` into the Huffman container format.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let original_size = size_field(input.len() as u64, "input size")?;

    let mut output = Vec::with_capacity(16 + input.len() / 2);
    output.extend_from_slice(&original_size.to_le_bytes());
    if input.is_empty() {
        return Ok(output);
    }

    let freqs = frequency_table(input);
    if freqs.iter().filter(|&&f| f > 0).count() == 1 {
        // Single distinct byte: no tree, just the raw symbol.
        output.push(input[0]);
        return Ok(output);
    }

    let tree = HuffmanTree::from_frequencies(&freqs)?;
    let table = tree.code_table();

    let mut tree_writer = BitWriter::new();
    tree.serialize(&mut tree_writer)?;
    let tree_bits = size_field(tree_writer.bits_written(), "tree bit count")?;
    output.extend_from_slice(&tree_bits.to_le_bytes());
    output.extend_from_slice(&tree_writer.into_vec());

    let mut payload_writer = BitWriter::with_capacity(input.len());
    for &byte in input {
        let code = table
            .get(byte)
            .expect("every input byte has an entry in the code table");
        write_code(&mut payload_writer, code)?;
    }
    let payload_bits = size_field(payload_writer.bits_written(), "payload bit count")?;
    output.extend_from_slice(&payload_bits.to_le_bytes());
    output.extend_from_slice(&payload_writer.into_vec());

    Ok(output)
}

fn read_u32_le(data: &[u8]) -> u32 {
    u32::from_le_bytes([data[0], data[1], data[2], data[3]])
}

/// Decompress a Huffman container back into the original bytes.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 4 {
        return Err(KrunchError::truncated_header("missing original size field"));
    }
    let original_size = read_u32_le(data) as usize;
    if original_size == 0 {
        return Ok(Vec::new());
    }

    let rest = &data[4..];
    if rest.len() == 1 {
        // Single-symbol variant: only the raw byte follows the size field.
        return Ok(vec![rest[0]; original_size]);
    }
    if rest.len() < 4 {
        return Err(KrunchError::truncated_header(
            "missing tree bit-count field",
        ));
    }

    let tree_bits = u64::from(read_u32_le(rest));
    let tree_len = tree_bits.div_ceil(8) as usize;
    let rest = &rest[4..];
    if rest.len() < tree_len {
        return Err(KrunchError::truncated_tree(tree_bits, rest.len() as u64 * 8));
    }
    let mut tree_reader = BitReader::new(&rest[..tree_len]);
    let tree = HuffmanTree::deserialize(&mut tree_reader, tree_bits)?;

    let rest = &rest[tree_len..];
    if rest.len() < 4 {
        return Err(KrunchError::truncated_header(
            "missing payload bit-count field",
        ));
    }
    let payload_bits = u64::from(read_u32_le(rest));
    let payload = &rest[4..];
    if (payload.len() as u64) * 8 < payload_bits {
        return Err(KrunchError::corrupt_payload(
            "payload shorter than its declared bit count",
        ));
    }

    let mut reader = BitReader::new(payload);
    let mut output = Vec::with_capacity(original_size);
    for _ in 0..original_size {
        let byte = tree.decode_symbol(&mut reader).map_err(|_| {
            KrunchError::corrupt_payload("payload exhausted before the declared output size")
        })?;
        if reader.bits_read() > payload_bits {
            return Err(KrunchError::corrupt_payload(
                "payload exhausted before the declared output size",
            ));
        }
        output.push(byte);
    }
    // Surplus bits past this point are zero-padding; drop them.

    Ok(output)
}

/// The Huffman codec as a whole-file operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanCodec;

impl FileCodec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "Huffman Coding"
    }

    fn extension(&self) -> &'static str {
        "huf"
    }

    fn compress(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        fs::write(output, compress(&data)?)?;
        Ok(())
    }

    fn decompress(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        fs::write(output, decompress(&data)?)?;
        Ok(())
    }

    fn is_valid(&self, path: &Path) -> bool {
        // Structural check only: the size field must fit. Deeper validation
        // is the decoder's job.
        fsio::file_exists(path) && fsio::file_size(path) >= 4
    }
}
