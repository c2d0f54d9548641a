//! Run-length plus zig-zag block framing for quantized coefficients,
//! with the literal values entropy-coded through the rANS coder rather
//! than written as raw 16-bit fields.
//!
//! Ground truth: `library/encode/compression-kagari.hpp` and
//! `library/decode/compression-kagari.hpp` (the block-tuple revision,
//! not the older Elias-gamma coder in `library/kagari.c`) for the
//! `(rle_len, literal_len, literals)` block scan and tuple framing.
//! Coefficients are buffered into fixed-size blocks; each block is
//! scanned once for runs of a repeated value. Unlike that source, which
//! writes every literal as a raw 16-bit field, every `(rle_len,
//! literal_len)` pair is still framed through `BitWriter` as before but
//! the literal values themselves are collected across the whole call
//! and handed to `rans::AnsEncoder` in one pass after the framing, per
//! this container's entropy-coding contract. See `DESIGN.md`.

use crate::bit_io::{BitReader, BitWriter};
use crate::constants::{BLOCK_LENGTH, RLE_TRIGGER};
use crate::error::CodecError;
use crate::rans::{self, AnsEncoder};

fn zigzag_encode(value: i16) -> u16 {
    ((value as i32 * 2) ^ (value as i32 >> 15)) as u16
}

fn zigzag_decode(value: u16) -> i16 {
    ((value >> 1) as i16) ^ -((value & 1) as i16)
}

/// Compresses every sample of `values` into `writer`, one `BLOCK_LENGTH`
/// chunk at a time: first every block's run/literal-length framing,
/// then a single rANS-coded payload carrying every literal value in
/// order.
pub fn compress(values: &[i16], writer: &mut BitWriter) -> Result<(), CodecError> {
    let mut literals: Vec<i16> = Vec::new();
    for block in values.chunks(BLOCK_LENGTH) {
        compress_block(block, writer, &mut literals)?;
    }

    let symbols: Vec<u16> = literals.iter().map(|&v| zigzag_encode(v)).collect();
    AnsEncoder::new().encode(&symbols, writer)?;
    Ok(())
}

fn compress_block(block: &[i16], writer: &mut BitWriter, literals: &mut Vec<i16>) -> Result<(), CodecError> {
    let len = block.len();
    let mut i = 0usize;
    let mut rle_length: u32 = 0;
    let mut rle_value: i16 = 0;

    while i < len {
        if block[i] == rle_value {
            rle_length += 1;
            i += 1;
            continue;
        }

        let mut literal_length: u32 = 0;
        {
            let mut repetitions: u32 = 0;
            let mut u = i + 1;
            while u < len && repetitions < RLE_TRIGGER as u32 {
                literal_length += 1;
                if block[u] == block[u - 1] {
                    repetitions += 1;
                } else {
                    repetitions = 0;
                }
                u += 1;
            }
            if repetitions == RLE_TRIGGER as u32 {
                literal_length -= RLE_TRIGGER as u32;
            }
        }

        emit(rle_length, literal_length + 1, &block[i..i + literal_length as usize + 1], writer, literals)?;

        rle_value = block[i + literal_length as usize];
        rle_length = 0;
        i += literal_length as usize + 1;
    }

    if rle_length != 0 {
        emit(rle_length - 1, 1, &[rle_value], writer, literals)?;
    }

    Ok(())
}

fn emit(
    rle_length: u32,
    literal_length: u32,
    literal_values: &[i16],
    writer: &mut BitWriter,
    literals: &mut Vec<i16>,
) -> Result<(), CodecError> {
    if rle_length > 0xFFFF || literal_length > 0xFFFF {
        return Err(CodecError::Error);
    }

    writer.write(rle_length, 16);
    writer.write(literal_length - 1, 16);
    literals.extend_from_slice(literal_values);

    Ok(())
}

/// One block's run/literal-length tuples, read before any literal value
/// is known (those live in the rANS payload that follows every block's
/// framing).
struct Tuple {
    rle_length: usize,
    literal_length: usize,
}

/// Decompresses `output_length` samples from `reader`: first every
/// block's framing tuples, then the single rANS payload they all draw
/// literal values from, in order.
pub fn decompress(reader: &mut BitReader, output_length: usize) -> Result<Vec<i16>, CodecError> {
    let mut blocks: Vec<Vec<Tuple>> = Vec::new();
    let mut remaining = output_length;
    let mut total_literals = 0usize;

    while remaining != 0 {
        let block_length = remaining.min(BLOCK_LENGTH);
        blocks.push(read_block_framing(reader, block_length, &mut total_literals)?);
        remaining -= block_length;
    }

    let symbols = rans::decode(reader, total_literals)?;
    let mut literals = symbols.into_iter().map(zigzag_decode);

    let mut output = Vec::with_capacity(output_length);
    for tuples in blocks {
        let mut rle_value: i16 = 0;
        for tuple in tuples {
            for _ in 0..tuple.rle_length {
                output.push(rle_value);
            }
            for _ in 0..tuple.literal_length {
                rle_value = literals.next().ok_or(CodecError::TruncatedTileData)?;
                output.push(rle_value);
            }
        }
    }

    Ok(output)
}

fn read_block_framing(reader: &mut BitReader, block_length: usize, total_literals: &mut usize) -> Result<Vec<Tuple>, CodecError> {
    let mut tuples = Vec::new();
    let mut produced = 0usize;

    while produced < block_length {
        let rle_length = reader.read(16)? as usize;
        let literal_length = reader.read(16)? as usize + 1;

        if produced + rle_length + literal_length > block_length {
            return Err(CodecError::TruncatedTileData);
        }

        produced += rle_length + literal_length;
        *total_literals += literal_length;
        tuples.push(Tuple { rle_length, literal_length });
    }

    Ok(tuples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(values: &[i16]) {
        let mut writer = BitWriter::new();
        compress(values, &mut writer).unwrap();
        let words = writer.finish();

        let mut reader = BitReader::new(&words);
        let decoded = decompress(&mut reader, values.len()).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn zigzag_roundtrips() {
        for v in [-5i16, -1, 0, 1, 5, i16::MIN, i16::MAX] {
            assert_eq!(zigzag_decode(zigzag_encode(v)), v);
        }
    }

    #[test]
    fn roundtrip_all_zero_block() {
        roundtrip(&vec![0i16; 100]);
    }

    #[test]
    fn roundtrip_mixed_runs_and_literals() {
        let mut values = vec![0i16; 10];
        values.extend_from_slice(&[1, 2, 3, -4, 5]);
        values.extend(std::iter::repeat(7i16).take(20));
        values.extend_from_slice(&[-1, -2]);
        roundtrip(&values);
    }

    #[test]
    fn roundtrip_spans_multiple_blocks() {
        let mut values = Vec::new();
        let mut state: i32 = 7;
        for i in 0..(BLOCK_LENGTH * 3 + 17) {
            state = (state * 1103515245 + 12345) & 0x7fffffff;
            values.push(if i % 11 == 0 { 0 } else { (state % 257 - 128) as i16 });
        }
        roundtrip(&values);
    }

    #[test]
    fn roundtrip_no_trailing_rle() {
        // Block that ends exactly on a literal, matching the "always end
        // on a literal" remainder rule.
        roundtrip(&[5, 5, 5, 5, 5, 1]);
    }

    #[test]
    fn roundtrip_trailing_rle_only() {
        roundtrip(&[0, 0, 0, 0, 0]);
    }

    #[test]
    fn literal_values_are_entropy_coded_not_framed_raw() {
        // A block of maximally varied literals used to cost 16 raw bits
        // each; the rANS stage should beat that for skewed data even
        // though this one is closer to uniform, so just check the
        // framing fields plus rANS payload round-trip exactly.
        let values: Vec<i16> = (0..64).map(|i| ((i * 37) % 23) as i16 - 11).collect();
        roundtrip(&values);
    }
}
