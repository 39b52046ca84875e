//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary as it reads, but it always
//! trails by exactly one entry: the entry the encoder creates when emitting
//! code *n* can only be completed once the decoder has seen code *n + 1*
//! (its first byte is needed). Keeping the code widths synchronized
//! therefore requires growing one code earlier than the encoder's own
//! `next_code > 1 << width` condition. The one place the lag closes is the
//! encoder's final data code, which carries no insertion; a STOP code that
//! lands exactly on a width boundary is consequently still written at the
//! old width, and the decoder recognizes that case from the bit residue
//! before committing to a wider read.

use crate::dictionary::DecompressDictionary;
use crate::{CLEAR_CODE, INITIAL_CODE_WIDTH, MAX_CODE_WIDTH, STOP_CODE};
use krunch_core::bitstream::BitReader;
use krunch_core::error::{KrunchError, Result};

/// Read the next code word, resolving the boundary-STOP ambiguity.
///
/// `grew` is true when the previous step widened the codes. A data code at
/// the old width is impossible there, and a trailing STOP leaves fewer than
/// 8 bits of padding behind it, so the two hypotheses never overlap.
fn next_code(reader: &mut BitReader<'_>, width: u8, grew: bool, decoded: usize) -> Result<u16> {
    if grew {
        let old = width - 1;
        let remaining = reader.remaining_bits();
        if remaining >= u64::from(old)
            && remaining - u64::from(old) < 8
            && reader.peek_bits(old)? == u32::from(STOP_CODE)
        {
            reader.read_bits(old)?;
            return Ok(STOP_CODE);
        }
    }

    if reader.remaining_bits() < u64::from(width) {
        return Err(KrunchError::missing_stop(decoded as u64));
    }
    Ok(reader.read_bits(width)? as u16)
}

/// Decode `input` into `output`.
///
/// On [`FormatError::MissingStop`] the bytes decoded before the stream ran
/// dry are already in `output`; callers that want the salvaged prefix keep
/// it, callers that want strictness drop it.
///
/// [`FormatError::MissingStop`]: krunch_core::error::FormatError::MissingStop
pub(crate) fn decode_into(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    let mut reader = BitReader::new(input);
    let mut dict = DecompressDictionary::new();
    let mut width = INITIAL_CODE_WIDTH;
    let mut prev: Option<Vec<u8>> = None;
    let mut grew = false;

    loop {
        let code = next_code(&mut reader, width, grew, output.len())?;
        grew = false;

        if code == STOP_CODE {
            return Ok(());
        }
        if code == CLEAR_CODE {
            dict.reset();
            width = INITIAL_CODE_WIDTH;
            prev = None;
            continue;
        }

        let position = reader.bits_read();
        let string: Vec<u8> = if code < dict.next_code() {
            dict.get(code)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| KrunchError::invalid_code(code, position))?
        } else if code == dict.next_code() {
            // Self-reference: the encoder used the entry it had just
            // created, so the phrase is the previous one extended by its
            // own first byte.
            match &prev {
                Some(p) => {
                    let mut string = Vec::with_capacity(p.len() + 1);
                    string.extend_from_slice(p);
                    string.push(p[0]);
                    string
                }
                None => return Err(KrunchError::invalid_code(code, position)),
            }
        } else {
            return Err(KrunchError::invalid_code(code, position));
        };

        output.extend_from_slice(&string);

        if let Some(p) = prev.take() {
            if !dict.is_full() {
                let mut entry = Vec::with_capacity(p.len() + 1);
                entry.extend_from_slice(&p);
                entry.push(string[0]);
                dict.push(entry);
                // One code earlier than the encoder's condition: the
                // dictionary here trails the encoder's by one entry.
                if u32::from(dict.next_code()) + 1 > (1u32 << width) && width < MAX_CODE_WIDTH {
                    width += 1;
                    grew = true;
                }
            }
        }
        prev = Some(string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use krunch_core::FormatError;
    use krunch_core::bitstream::BitWriter;

    #[test]
    fn test_stop_only_stream() {
        let mut output = Vec::new();
        decode_into(&encode(b"").unwrap(), &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_self_reference_case() {
        // "ABABABA" makes the encoder reference entry 260 in the step after
        // creating it; the decoder must synthesize "ABA" from "AB" + 'A'.
        let compressed = encode(b"ABABABA").unwrap();
        // Codes: 'A', 'B', 258, 260, STOP: five 9-bit words.
        assert_eq!(compressed.len(), 6);

        let mut output = Vec::new();
        decode_into(&compressed, &mut output).unwrap();
        assert_eq!(output, b"ABABABA");
    }

    #[test]
    fn test_first_code_cannot_self_reference() {
        // Code 258 before any phrase exists has no prediction to extend.
        let mut writer = BitWriter::new();
        writer.write_bits(258, 9).unwrap();
        writer.write_bits(u32::from(STOP_CODE), 9).unwrap();

        let mut output = Vec::new();
        let err = decode_into(&writer.into_vec(), &mut output).unwrap_err();
        assert!(matches!(
            err,
            KrunchError::Format(FormatError::InvalidCode { code: 258, .. })
        ));
    }

    #[test]
    fn test_code_beyond_next_rejected() {
        let mut writer = BitWriter::new();
        writer.write_bits(u32::from(b'A'), 9).unwrap();
        writer.write_bits(300, 9).unwrap();
        writer.write_bits(u32::from(STOP_CODE), 9).unwrap();

        let mut output = Vec::new();
        let err = decode_into(&writer.into_vec(), &mut output).unwrap_err();
        assert!(matches!(
            err,
            KrunchError::Format(FormatError::InvalidCode { code: 300, .. })
        ));
        // The valid prefix was still delivered.
        assert_eq!(output, b"A");
    }

    #[test]
    fn test_truncated_stream_reports_missing_stop() {
        // Two data codes and no STOP: the 6 padding bits left after them
        // cannot hold another code.
        let mut writer = BitWriter::new();
        writer.write_bits(u32::from(b'A'), 9).unwrap();
        writer.write_bits(u32::from(b'B'), 9).unwrap();

        let mut output = Vec::new();
        let err = decode_into(&writer.into_vec(), &mut output).unwrap_err();
        assert!(matches!(
            err,
            KrunchError::Format(FormatError::MissingStop { decoded: 2 })
        ));
        // The decoded prefix survives.
        assert_eq!(output, b"AB");
    }

    #[test]
    fn test_stop_at_width_boundary() {
        // 255 bytes with no repeated pair produce exactly 255 data codes.
        // Processing the last one pushes the decoder's dictionary to 512
        // entries, but the encoder never inserts for its flush code, so the
        // trailing STOP is written at 9 bits, not 10.
        let original: Vec<u8> = (0u8..=254).collect();
        let compressed = encode(&original).unwrap();
        // 256 nine-bit codes: no padding at all.
        assert_eq!(compressed.len(), 288);

        let mut output = Vec::new();
        decode_into(&compressed, &mut output).unwrap();
        assert_eq!(output, original);
    }

    #[test]
    fn test_width_growth_past_nine_bits() {
        // Pseudo-random bytes rarely repeat pairs, so 2 KiB yields far more
        // than the 254 insertions needed to cross into 10-bit codes.
        let mut seed = 0x9E37_79B9_7F4A_7C15u64;
        let original: Vec<u8> = (0..2048)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect();
        let compressed = encode(&original).unwrap();

        let mut output = Vec::new();
        decode_into(&compressed, &mut output).unwrap();
        assert_eq!(output, original);
    }
}
