//! # Krunch-FFI: C-ABI metrics facade
//!
//! Wraps each whole-file codec operation with wall-clock timers and
//! file-size probes, filling a fixed-layout [`KrunchMetrics`] record for
//! foreign callers (the desktop frontend consumes the library exclusively
//! through this boundary).
//!
//! Error detail travels two ways: the display string of the failure is
//! copied into the record's `error_message` field and into a thread-local
//! last-error slot readable through [`krunch_last_error`]. Panics never
//! cross the boundary; they are caught and reported like any other failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

use krunch_core::fsio;
use krunch_core::traits::FileCodec;
use krunch_huffman::HuffmanCodec;
use krunch_lzw::LzwCodec;
use krunch_rle::RleCodec;
use std::cell::RefCell;
use std::ffi::{CStr, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

/// Capacity of the error-message buffers, terminator included.
pub const ERROR_MESSAGE_LEN: usize = 256;

/// Algorithm selector: Run-Length Encoding.
pub const ALGORITHM_RLE: c_int = 0;
/// Algorithm selector: Huffman coding.
pub const ALGORITHM_HUFFMAN: c_int = 1;
/// Algorithm selector: LZW.
pub const ALGORITHM_LZW: c_int = 2;

/// Fixed-layout record filled by the compress/decompress wrappers.
#[repr(C)]
pub struct KrunchMetrics {
    /// Uncompressed size in bytes.
    pub original_size_bytes: u64,
    /// Compressed size in bytes.
    pub compressed_size_bytes: u64,
    /// `(compressed / original) * 100`.
    pub compression_ratio: f64,
    /// Wall-clock compression time in milliseconds.
    pub compression_time_ms: f64,
    /// Wall-clock decompression time in milliseconds.
    pub decompression_time_ms: f64,
    /// Megabytes per second; 0 for zero-time operations.
    pub compression_speed_mbps: f64,
    /// Megabytes per second; 0 for zero-time operations.
    pub decompression_speed_mbps: f64,
    /// 1 on success, 0 on failure.
    pub success: i32,
    /// NUL-terminated failure description; empty on success.
    pub error_message: [c_char; ERROR_MESSAGE_LEN],
}

impl KrunchMetrics {
    fn zeroed() -> Self {
        Self {
            original_size_bytes: 0,
            compressed_size_bytes: 0,
            compression_ratio: 0.0,
            compression_time_ms: 0.0,
            decompression_time_ms: 0.0,
            compression_speed_mbps: 0.0,
            decompression_speed_mbps: 0.0,
            success: 0,
            error_message: [0; ERROR_MESSAGE_LEN],
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<[c_char; ERROR_MESSAGE_LEN]> =
        const { RefCell::new([0; ERROR_MESSAGE_LEN]) };
}

/// Copy `message` into a fixed C buffer, truncating and NUL-terminating.
fn copy_message(buffer: &mut [c_char; ERROR_MESSAGE_LEN], message: &str) {
    let bytes = message.as_bytes();
    let len = bytes.len().min(ERROR_MESSAGE_LEN - 1);
    for (dst, &src) in buffer.iter_mut().zip(&bytes[..len]) {
        *dst = src as c_char;
    }
    buffer[len] = 0;
}

fn set_last_error(message: &str) {
    LAST_ERROR.with(|slot| copy_message(&mut slot.borrow_mut(), message));
}

/// Record a failure in both the metrics record and the last-error slot.
fn fail(metrics: &mut KrunchMetrics, message: &str) -> c_int {
    metrics.success = 0;
    copy_message(&mut metrics.error_message, message);
    set_last_error(message);
    0
}

fn speed_mbps(bytes: u64, time_ms: f64) -> f64 {
    if time_ms <= 0.0 {
        return 0.0;
    }
    let megabytes = bytes as f64 / (1024.0 * 1024.0);
    megabytes / (time_ms / 1000.0)
}

fn codec_for(algorithm: c_int) -> Option<&'static dyn FileCodec> {
    match algorithm {
        ALGORITHM_RLE => Some(&RleCodec),
        ALGORITHM_HUFFMAN => Some(&HuffmanCodec),
        ALGORITHM_LZW => Some(&LzwCodec),
        _ => None,
    }
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn path_from(ptr: *const c_char) -> Option<&'static Path> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .ok()
        .map(Path::new)
}

/// Compress `input_path` into `output_path` and fill `metrics`.
///
/// Returns 1 on success, 0 on failure.
///
/// # Safety
///
/// `input_path` and `output_path` must be NUL-terminated UTF-8 strings and
/// `metrics` must point to writable memory of the record's size.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn krunch_compress_file(
    algorithm: c_int,
    input_path: *const c_char,
    output_path: *const c_char,
    metrics: *mut KrunchMetrics,
) -> c_int {
    if metrics.is_null() {
        set_last_error("invalid parameters");
        return 0;
    }
    let metrics = unsafe { &mut *metrics };
    *metrics = KrunchMetrics::zeroed();

    let (Some(input), Some(output)) =
        (unsafe { path_from(input_path) }, unsafe { path_from(output_path) })
    else {
        return fail(metrics, "invalid parameters");
    };
    let Some(codec) = codec_for(algorithm) else {
        return fail(metrics, "invalid algorithm");
    };

    metrics.original_size_bytes = fsio::file_size(input);
    if metrics.original_size_bytes == 0 && !fsio::file_exists(input) {
        return fail(metrics, "input file does not exist");
    }

    let start = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| codec.compress(input, output)));
    metrics.compression_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(Ok(())) => {
            metrics.compressed_size_bytes = fsio::file_size(output);
            if metrics.original_size_bytes > 0 {
                metrics.compression_ratio = metrics.compressed_size_bytes as f64
                    / metrics.original_size_bytes as f64
                    * 100.0;
            }
            metrics.compression_speed_mbps =
                speed_mbps(metrics.original_size_bytes, metrics.compression_time_ms);
            metrics.success = 1;
            1
        }
        Ok(Err(err)) => fail(metrics, &err.to_string()),
        Err(_) => fail(metrics, "unexpected panic during compression"),
    }
}

/// Decompress `input_path` into `output_path` and fill `metrics`.
///
/// Returns 1 on success, 0 on failure.
///
/// # Safety
///
/// Same contract as [`krunch_compress_file`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn krunch_decompress_file(
    algorithm: c_int,
    input_path: *const c_char,
    output_path: *const c_char,
    metrics: *mut KrunchMetrics,
) -> c_int {
    if metrics.is_null() {
        set_last_error("invalid parameters");
        return 0;
    }
    let metrics = unsafe { &mut *metrics };
    *metrics = KrunchMetrics::zeroed();

    let (Some(input), Some(output)) =
        (unsafe { path_from(input_path) }, unsafe { path_from(output_path) })
    else {
        return fail(metrics, "invalid parameters");
    };
    let Some(codec) = codec_for(algorithm) else {
        return fail(metrics, "invalid algorithm");
    };

    metrics.compressed_size_bytes = fsio::file_size(input);
    if metrics.compressed_size_bytes == 0 && !fsio::file_exists(input) {
        return fail(metrics, "input file does not exist");
    }

    let start = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| codec.decompress(input, output)));
    metrics.decompression_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(Ok(())) => {
            metrics.original_size_bytes = fsio::file_size(output);
            if metrics.original_size_bytes > 0 {
                metrics.compression_ratio = metrics.compressed_size_bytes as f64
                    / metrics.original_size_bytes as f64
                    * 100.0;
            }
            metrics.decompression_speed_mbps =
                speed_mbps(metrics.original_size_bytes, metrics.decompression_time_ms);
            metrics.success = 1;
            1
        }
        Ok(Err(err)) => fail(metrics, &err.to_string()),
        Err(_) => fail(metrics, "unexpected panic during decompression"),
    }
}

/// Write the size of `path` into `size`.
///
/// Returns 1 when the file exists, 0 otherwise.
///
/// # Safety
///
/// `path` must be a NUL-terminated string; `size` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn krunch_file_size(path: *const c_char, size: *mut u64) -> c_int {
    if size.is_null() {
        set_last_error("invalid parameters");
        return 0;
    }
    let Some(path) = (unsafe { path_from(path) }) else {
        set_last_error("invalid parameters");
        return 0;
    };
    let file_size = fsio::file_size(path);
    unsafe { *size = file_size };
    i32::from(file_size > 0 || fsio::file_exists(path))
}

/// Static display name for an algorithm selector.
#[unsafe(no_mangle)]
pub extern "C" fn krunch_algorithm_name(algorithm: c_int) -> *const c_char {
    let name: &'static [u8] = match algorithm {
        ALGORITHM_RLE => b"Run-Length Encoding\0",
        ALGORITHM_HUFFMAN => b"Huffman Coding\0",
        ALGORITHM_LZW => b"LZW\0",
        _ => b"Unknown\0",
    };
    name.as_ptr() as *const c_char
}

/// Pointer to this thread's last error message.
///
/// The buffer lives for the thread's lifetime and is overwritten by the next
/// failing call on the same thread.
#[unsafe(no_mangle)]
pub extern "C" fn krunch_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}
