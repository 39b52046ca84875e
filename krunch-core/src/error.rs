//! Error types for Krunch operations.
//!
//! The taxonomy distinguishes container-format violations (bad data on disk)
//! from bit-stream preconditions (bugs or severed streams) and plain I/O
//! failures. Codec crates construct these through the helper constructors so
//! the messages stay uniform across algorithms.

use std::io;
use thiserror::Error;

/// A decoded file violates its container contract.
#[derive(Debug, Error)]
pub enum FormatError {
    /// RLE input whose size is not a multiple of two.
    #[error("truncated run: compressed size {size} is not a multiple of two")]
    TruncatedRun {
        /// Size of the offending file in bytes.
        size: u64,
    },

    /// A fixed header field is missing or cut short.
    #[error("truncated header: {message}")]
    TruncatedHeader {
        /// Description of the missing field.
        message: String,
    },

    /// The serialized Huffman tree is shorter than its declared bit count.
    #[error("truncated tree: need {needed} bits, have {available}")]
    TruncatedTree {
        /// Bits the tree declared.
        needed: u64,
        /// Bits actually present.
        available: u64,
    },

    /// The payload cannot produce the declared output.
    #[error("corrupt payload: {message}")]
    CorruptPayload {
        /// Description of the inconsistency.
        message: String,
    },

    /// An LZW code outside the dictionary and not the self-reference case.
    #[error("invalid code {code} at bit position {position}")]
    InvalidCode {
        /// The offending code word.
        code: u16,
        /// Bit position at which it was read.
        position: u64,
    },

    /// An LZW stream ended before a stop code was observed.
    ///
    /// Recoverable: the decoder delivers the bytes produced so far before
    /// reporting this.
    #[error("stream ended without a stop code after {decoded} decoded bytes")]
    MissingStop {
        /// Bytes decoded before the stream ran dry.
        decoded: u64,
    },
}

/// A bit-stream precondition was violated.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// `write_bits` was asked for more bits than a code word can hold.
    #[error("bit field too wide: {width} bits (maximum is 32)")]
    BitFieldTooWide {
        /// The requested width.
        width: u8,
    },

    /// `read_bits` was asked for more bits than the stream still holds.
    #[error("unexpected end of stream at bit position {position}")]
    UnexpectedEndOfStream {
        /// Bit position at which the shortfall was detected.
        position: u64,
    },
}

/// The main error type for Krunch operations.
#[derive(Debug, Error)]
pub enum KrunchError {
    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container-format violation.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Bit-stream precondition violation.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// A Huffman tree was requested for an empty frequency table.
    ///
    /// Distinct from compressing an empty file, which succeeds with a zero
    /// original-size header.
    #[error("input produced no symbol frequencies")]
    EmptyInput,
}

/// Result type alias for Krunch operations.
pub type Result<T> = std::result::Result<T, KrunchError>;

impl KrunchError {
    /// Create a truncated-run error.
    pub fn truncated_run(size: u64) -> Self {
        FormatError::TruncatedRun { size }.into()
    }

    /// Create a truncated-header error.
    pub fn truncated_header(message: impl Into<String>) -> Self {
        FormatError::TruncatedHeader {
            message: message.into(),
        }
        .into()
    }

    /// Create a truncated-tree error.
    pub fn truncated_tree(needed: u64, available: u64) -> Self {
        FormatError::TruncatedTree { needed, available }.into()
    }

    /// Create a corrupt-payload error.
    pub fn corrupt_payload(message: impl Into<String>) -> Self {
        FormatError::CorruptPayload {
            message: message.into(),
        }
        .into()
    }

    /// Create an invalid-code error.
    pub fn invalid_code(code: u16, position: u64) -> Self {
        FormatError::InvalidCode { code, position }.into()
    }

    /// Create a missing-stop error.
    pub fn missing_stop(decoded: u64) -> Self {
        FormatError::MissingStop { decoded }.into()
    }
}
