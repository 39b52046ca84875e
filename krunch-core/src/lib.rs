//! # Krunch Core
//!
//! Core components for the Krunch compression toolkit.
//!
//! This crate provides the building blocks shared by the three codec crates:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-width code words
//! - [`error`]: the error taxonomy
//! - [`traits`]: the whole-file codec contract
//! - [`fsio`]: filesystem existence and size probes
//!
//! ## Architecture
//!
//! The workspace is layered leaves-first:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Frontends: krunch-cli, krunch-ffi              │
//! ├────────────────────────────────────────────────┤
//! │ Codecs: krunch-rle, krunch-huffman, krunch-lzw │
//! ├────────────────────────────────────────────────┤
//! │ This crate: BitReader/BitWriter, errors,       │
//! │             FileCodec, fs probes               │
//! └────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod fsio;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter, MAX_BIT_WIDTH};
pub use error::{EncodingError, FormatError, KrunchError, Result};
pub use traits::FileCodec;
