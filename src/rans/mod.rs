//! Asymmetric-numeral-system entropy coder over the fixed CDF of `cdf`.
//!
//! Ground truth: `library/encode/ans.cpp` / `library/decode/ans.cpp`.
//! The encoder processes symbols in reverse and queues bits before
//! flushing them in input order, since rANS renormalization only
//! inverts cleanly that way; the queue itself is a plain `Vec` rather
//! than the source's fixed-capacity array.

pub mod cdf;

use crate::bit_io::{BitReader, BitWriter};
use crate::constants::{ANS_B_LEN, ANS_B_MASK, ANS_INITIAL_STATE, ANS_L, ANS_M_LEN, ANS_STATE_LEN};
use crate::error::CodecError;
use cdf::{find_by_cumulative, find_entry, symbol_code};

struct QueuedBits {
    value: u32,
    length: u32,
}

/// Encodes a sequence of `u16` symbols into a bit-packed rANS stream.
pub struct AnsEncoder {
    queue: Vec<QueuedBits>,
}

impl Default for AnsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsEncoder {
    pub fn new() -> Self {
        AnsEncoder { queue: Vec::new() }
    }

    /// Encodes `input` (read in reverse, per the construction) and writes
    /// the resulting bits, most-recently-queued first, to `writer`.
    pub fn encode(&mut self, input: &[u16], writer: &mut BitWriter) -> Result<(), CodecError> {
        self.queue.clear();
        let mut state: u32 = ANS_INITIAL_STATE;

        for &value in input.iter().rev() {
            let (code, root, suffix_length) = symbol_code(value);
            let _ = code;
            let entry = find_entry(root, suffix_length);
            let frequency = entry.frequency as u32;

            loop {
                let would_wrap = (state / frequency) > (1u32 << (ANS_STATE_LEN - ANS_M_LEN)) - 1;
                let fits = !would_wrap
                    && ((state / frequency) << ANS_M_LEN) + (state % frequency) + entry.cumulative as u32
                        <= ANS_L * (1u32 << ANS_B_LEN) - 1;

                if fits {
                    break;
                }

                let bits = state & ANS_B_MASK;
                state >>= ANS_B_LEN;
                self.queue.push(QueuedBits { value: bits, length: ANS_B_LEN });
            }

            state = ((state / frequency) << ANS_M_LEN) + (state % frequency) + entry.cumulative as u32;

            if entry.suffix_length != 0 {
                let suffix = value - entry.root;
                self.queue.push(QueuedBits { value: suffix as u32, length: entry.suffix_length as u32 });
            }
        }

        while state != 0 {
            let bits = state & ANS_B_MASK;
            state >>= ANS_B_LEN;
            self.queue.push(QueuedBits { value: bits, length: ANS_B_LEN });
        }

        for queued in self.queue.iter().rev() {
            writer.write(queued.value, queued.length);
        }

        Ok(())
    }
}

/// Decodes `output_length` symbols from an rANS stream read through
/// `reader`.
pub fn decode(reader: &mut BitReader, output_length: usize) -> Result<Vec<u16>, CodecError> {
    let mut state: u32 = 0;
    let mut output = Vec::with_capacity(output_length);

    for _ in 0..output_length {
        while state < ANS_L {
            let word = reader.read(ANS_B_LEN)?;
            state = (state << ANS_B_LEN) | word;
        }

        let modulo = state & ((1u32 << ANS_M_LEN) - 1);
        let entry = find_by_cumulative(modulo);

        let suffix = if entry.suffix_length != 0 {
            reader.read(entry.suffix_length as u32)?
        } else {
            0
        };
        output.push(entry.root + suffix as u16);

        let frequency = entry.frequency as u32;
        state = frequency * (state >> ANS_M_LEN) + modulo - entry.cumulative as u32;
    }

    while state < ANS_L {
        let word = reader.read(ANS_B_LEN)?;
        state = (state << ANS_B_LEN) | word;
    }

    if state != ANS_INITIAL_STATE {
        return Err(CodecError::Error);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(symbols: &[u16]) {
        let mut writer = BitWriter::new();
        let mut encoder = AnsEncoder::new();
        encoder.encode(symbols, &mut writer).unwrap();
        let words = writer.finish();

        let mut reader = BitReader::new(&words);
        let decoded = decode(&mut reader, symbols.len()).unwrap();
        assert_eq!(decoded, symbols);
    }

    #[test]
    fn roundtrip_small_values() {
        roundtrip(&[0, 1, 2, 3, 0, 0, 246, 100]);
    }

    #[test]
    fn roundtrip_escape_values() {
        roundtrip(&[300, 1000, 40000, 65000, 8192]);
    }

    #[test]
    fn roundtrip_single_symbol() {
        roundtrip(&[0]);
        roundtrip(&[65535]);
    }

    #[test]
    fn roundtrip_mixed_long_sequence() {
        let mut symbols = Vec::new();
        let mut state: u32 = 12345;
        for _ in 0..2000 {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            // Heavily skew towards zero, like real zigzag-coded coefficients.
            let v = if state % 5 == 0 { (state >> 16) as u16 } else { (state % 7) as u16 };
            symbols.push(v);
        }
        roundtrip(&symbols);
    }

    #[test]
    fn bad_stream_fails_final_state_check() {
        let mut writer = BitWriter::new();
        let mut encoder = AnsEncoder::new();
        encoder.encode(&[1, 2, 3], &mut writer).unwrap();
        let mut words = writer.finish();
        if let Some(first) = words.first_mut() {
            *first ^= 0xFFFF_FFFF;
        }
        let mut reader = BitReader::new(&words);
        assert!(decode(&mut reader, 3).is_err());
    }
}
