//! LZW encoder (compression).

use crate::dictionary::CompressDictionary;
use crate::{CLEAR_CODE, INITIAL_CODE_WIDTH, MAX_CODE_WIDTH, STOP_CODE};
use krunch_core::bitstream::BitWriter;
use krunch_core::error::Result;

/// Encode `input` as a stream of variable-width code words.
///
/// The stream starts at 9-bit codes and widens whenever `next_code` exceeds
/// `1 << width`, up to 15 bits. When the dictionary fills (code 32 768 would
/// be next), a CLEAR code is emitted at the current width and everything
/// resets. The stream always ends with a STOP code at the then-current
/// width; an empty input produces just the STOP code.
pub(crate) fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(input.len());
    let mut dict = CompressDictionary::new();
    let mut width = INITIAL_CODE_WIDTH;
    // Code for the phrase matched so far; None only at stream start and
    // right after a reset, where the next byte's singleton always matches.
    let mut prefix: Option<u16> = None;

    for &byte in input {
        let current = match prefix {
            Some(code) => code,
            None => {
                prefix = Some(u16::from(byte));
                continue;
            }
        };

        if let Some(extended) = dict.find(current, byte) {
            prefix = Some(extended);
            continue;
        }

        writer.write_bits(u32::from(current), width)?;
        dict.insert(current, byte);
        if u32::from(dict.next_code()) > (1u32 << width) && width < MAX_CODE_WIDTH {
            width += 1;
        }
        if dict.is_full() {
            writer.write_bits(u32::from(CLEAR_CODE), width)?;
            dict.reset();
            width = INITIAL_CODE_WIDTH;
        }
        prefix = Some(u16::from(byte));
    }

    if let Some(code) = prefix {
        writer.write_bits(u32::from(code), width)?;
    }
    writer.write_bits(u32::from(STOP_CODE), width)?;

    Ok(writer.into_vec())
}
