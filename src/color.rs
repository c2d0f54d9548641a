//! Pixel-to-coefficient color transform: deinterleave, optional
//! alpha-discard, and the reversible YCoCg / subtract-green matrices.
//!
//! Ground truth: `library/encode/format.cpp`'s `sFormatToInternal` and
//! `library/decode/format.cpp`'s `sFormatToRgb`. Both sides only operate
//! on the depth-8/16-bit-coefficient instantiation here; see
//! `Settings::validate` for the depth cutoff.

use crate::error::CodecError;
use crate::settings::Color;

/// Deinterleaves an 8-bit-per-channel raster into `channels` planar
/// buffers of 16-bit coefficients, applying alpha-discard and the color
/// transform in place.
///
/// `output` must hold `width * height * channels` coefficients; plane
/// `ch` occupies `output[ch * width * height .. (ch + 1) * width * height]`.
pub fn to_internal(
    color: Color,
    discard: bool,
    width: usize,
    height: usize,
    channels: usize,
    input_stride: usize,
    input: &[u8],
    output: &mut [i16],
) -> Result<(), CodecError> {
    if output.len() != width * height * channels {
        return Err(CodecError::InvalidInput);
    }

    let plane_offset = width * height;
    let row_stride = input_stride * channels;

    for row in 0..height {
        let in_row = &input[row * row_stride..];
        for col in 0..width {
            for ch in 0..channels {
                output[plane_offset * ch + row * width + col] = in_row[col * channels + ch] as i16;
            }
        }
    }

    if discard && channels >= 2 {
        let alpha_channel = if channels == 2 { 1 } else { 3 };
        if channels > alpha_channel {
            for i in 0..plane_offset {
                if output[plane_offset * alpha_channel + i] == 0 {
                    for ch in 0..alpha_channel {
                        output[plane_offset * ch + i] = 0;
                    }
                }
            }
        }
    }

    if channels >= 3 {
        match color {
            Color::YCoCg => {
                for i in 0..plane_offset {
                    let r = output[i];
                    let g = output[plane_offset + i];
                    let b = output[plane_offset * 2 + i];

                    let temp = b.wrapping_add((r.wrapping_sub(b)) / 2);

                    output[plane_offset + i] = r.wrapping_sub(b);
                    output[plane_offset * 2 + i] = g.wrapping_sub(temp);
                    output[i] = temp.wrapping_add((g.wrapping_sub(temp)) / 2);
                }
            }
            Color::SubtractG => {
                for i in 0..plane_offset {
                    let r = output[i];
                    let g = output[plane_offset + i];
                    let b = output[plane_offset * 2 + i];

                    output[i] = g;
                    output[plane_offset + i] = r.wrapping_sub(g);
                    output[plane_offset * 2 + i] = b.wrapping_sub(g);
                }
            }
            Color::None => {}
        }
    }

    Ok(())
}

/// Inverts the color transform and interleaves `channels` planar
/// buffers back into an 8-bit raster at `(output_stride)` bytes per row,
/// saturating each component to `[0, 2^depth - 1]`.
pub fn to_raster(
    color: Color,
    width: usize,
    height: usize,
    channels: usize,
    depth: u32,
    output_stride: usize,
    input: &[i16],
    output: &mut [u8],
) -> Result<(), CodecError> {
    if input.len() != width * height * channels {
        return Err(CodecError::InvalidInput);
    }

    let plane_offset = width * height;
    let row_stride = output_stride * channels;
    let max_value = ((1u32 << depth) - 1) as i16;
    let saturate = |v: i16| -> u8 { v.clamp(0, max_value) as u8 };

    if channels >= 3 {
        for row in 0..height {
            let out_row = &mut output[row * row_stride..];
            for col in 0..width {
                let i = row * width + col;
                let (r, g, b) = match color {
                    Color::YCoCg => {
                        let y = input[i];
                        let u = input[plane_offset + i];
                        let v = input[plane_offset * 2 + i];

                        let temp = y.wrapping_sub(v / 2);
                        let g = v.wrapping_add(temp);
                        let b = temp.wrapping_sub(u / 2);
                        let r = b.wrapping_add(u);
                        (r, g, b)
                    }
                    Color::SubtractG => {
                        let y = input[i];
                        let u = input[plane_offset + i];
                        let v = input[plane_offset * 2 + i];
                        (u.wrapping_add(y), y, v.wrapping_add(y))
                    }
                    Color::None => (input[i], input[plane_offset + i], input[plane_offset * 2 + i]),
                };

                out_row[col * channels] = saturate(r);
                out_row[col * channels + 1] = saturate(g);
                out_row[col * channels + 2] = saturate(b);
            }
        }
    }

    if channels != 3 {
        let from_channel = if channels > 3 { 3 } else { 0 };
        for row in 0..height {
            let out_row = &mut output[row * row_stride..];
            for col in 0..width {
                for ch in from_channel..channels {
                    out_row[col * channels + ch] = saturate(input[plane_offset * ch + row * width + col]);
                }
            }
        }
    }

    Ok(())
}
