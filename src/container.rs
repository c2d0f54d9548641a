//! Image and tile header serialization, plus the property/settings
//! validation both the encoder and decoder run before touching a tile.
//!
//! Ground truth: `library/encode/heads.cpp`'s `ImageHeadWrite`/
//! `TileHeadWrite` and `library/decode/heads.cpp`'s `DecodeHead`/
//! `TileHeadRead`. Fields are always little-endian regardless of host
//! byte order, same as the source's `EndiannessReverse` calls.

use crate::constants::{
    IMAGE_HEAD_MAGIC, IMAGE_HEAD_SIZE, MAXIMUM_CHANNELS, MAXIMUM_DEPTH, MAXIMUM_HEIGHT, MAXIMUM_WIDTH,
    MINIMUM_CHANNELS, MINIMUM_DEPTH, MINIMUM_HEIGHT, MINIMUM_WIDTH, TILE_HEAD_MAGIC, TILE_HEAD_SIZE,
};
use crate::error::CodecError;
use crate::settings::{Color, Compression, Settings, Wavelet, Wrap};

fn tiles_dimension_log2(tiles_dimension: u32) -> u32 {
    let mut td = 0;
    while (1u32 << td) < tiles_dimension {
        td += 1;
    }
    td
}

/// Checks `width`/`height`/`channels`/`depth` against the container's
/// hard limits, independent of any particular `Settings`.
pub fn validate_properties(width: u32, height: u32, channels: u32, depth: u32) -> Result<(), CodecError> {
    if !(MINIMUM_WIDTH..=MAXIMUM_WIDTH).contains(&width) || !(MINIMUM_HEIGHT..=MAXIMUM_HEIGHT).contains(&height) {
        return Err(CodecError::InvalidDimensions);
    }
    if !(MINIMUM_CHANNELS..=MAXIMUM_CHANNELS).contains(&channels) {
        return Err(CodecError::InvalidChannelsNo);
    }
    if !(MINIMUM_DEPTH..=MAXIMUM_DEPTH).contains(&depth) {
        return Err(CodecError::InvalidDepth);
    }
    Ok(())
}

/// Writes the 16-byte image head into `out[0..16]`.
pub fn write_image_head(settings: &Settings, width: u32, height: u32, channels: u32, depth: u32, out: &mut [u8]) {
    debug_assert!(out.len() >= IMAGE_HEAD_SIZE);

    let td = tiles_dimension_log2(settings.tiles_dimension);

    let a = ((width - 1) & 0x01FF_FFFF) << 7 | ((depth - 1) & 0xF) << 2 | (u32::from(settings.color) & 0x3);
    let b = ((height - 1) & 0x01FF_FFFF) << 7 | (td & 0x1F) << 2 | (u32::from(settings.wavelet) & 0x3);
    let c = ((channels - 1) & 0x01FF_FFFF) << 7
        | (u32::from(settings.wrap) & 0x3) << 5
        | (u32::from(settings.compression) & 0x3) << 3;

    out[0..4].copy_from_slice(&IMAGE_HEAD_MAGIC.to_le_bytes());
    out[4..8].copy_from_slice(&a.to_le_bytes());
    out[8..12].copy_from_slice(&b.to_le_bytes());
    out[12..16].copy_from_slice(&c.to_le_bytes());
}

/// Parses and validates a 16-byte image head, returning the image
/// properties and the settings recoverable from the container.
pub fn read_image_head(input: &[u8]) -> Result<(u32, u32, u32, u32, Settings), CodecError> {
    if input.len() < IMAGE_HEAD_SIZE {
        return Err(CodecError::TruncatedImageHead);
    }

    let magic = u32::from_le_bytes(input[0..4].try_into().unwrap());
    let a = u32::from_le_bytes(input[4..8].try_into().unwrap());
    let b = u32::from_le_bytes(input[8..12].try_into().unwrap());
    let c = u32::from_le_bytes(input[12..16].try_into().unwrap());

    if magic != IMAGE_HEAD_MAGIC {
        return Err(CodecError::NotAnAkoFile);
    }

    let width = ((a >> 7) & 0x01FF_FFFF) + 1;
    let height = ((b >> 7) & 0x01FF_FFFF) + 1;
    let depth = ((a >> 2) & 0xF) + 1;
    let channels = ((c >> 7) & 0x01FF_FFFF) + 1;
    let td = (b >> 2) & 0x1F;

    let mut settings = Settings {
        color: Color::from_tag(a & 0x3)?,
        wavelet: Wavelet::from_tag(b & 0x3)?,
        wrap: Wrap::from_tag((c >> 5) & 0x3)?,
        compression: Compression::from_tag((c >> 3) & 0x3)?,
        tiles_dimension: 0,
        ..Settings::default()
    };
    if td != 0 {
        settings.tiles_dimension = 1 << td;
    }

    validate_properties(width, height, channels, depth)?;

    Ok((width, height, channels, depth, settings))
}

/// Writes a 16-byte tile head into `out[0..16]`.
pub fn write_tile_head(no: u32, compression: Compression, compressed_size: u32, out: &mut [u8]) {
    debug_assert!(out.len() >= TILE_HEAD_SIZE);

    let tags = (u32::from(compression) & 0x3) << 30;

    out[0..4].copy_from_slice(&TILE_HEAD_MAGIC.to_le_bytes());
    out[4..8].copy_from_slice(&no.to_le_bytes());
    out[8..12].copy_from_slice(&compressed_size.to_le_bytes());
    out[12..16].copy_from_slice(&tags.to_le_bytes());
}

/// Parsed tile head: index, payload size, and the per-tile compression
/// tag (the only bits this revision's tags word carries).
#[derive(Debug, PartialEq)]
pub struct TileHead {
    pub no: u32,
    pub compressed_size: u32,
    pub compression: Compression,
}

pub fn read_tile_head(input: &[u8]) -> Result<TileHead, CodecError> {
    if input.len() < TILE_HEAD_SIZE {
        return Err(CodecError::TruncatedTileHead);
    }

    let magic = u32::from_le_bytes(input[0..4].try_into().unwrap());
    let no = u32::from_le_bytes(input[4..8].try_into().unwrap());
    let compressed_size = u32::from_le_bytes(input[8..12].try_into().unwrap());
    let tags = u32::from_le_bytes(input[12..16].try_into().unwrap());

    if magic != TILE_HEAD_MAGIC || compressed_size == 0 {
        return Err(CodecError::InvalidTileHead);
    }

    let compression = Compression::from_tag((tags >> 30) & 0x3)?;

    Ok(TileHead { no, compressed_size, compression })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_head_roundtrips() {
        let settings = Settings::default().with_tiles_dimension(64);
        let mut buf = vec![0u8; IMAGE_HEAD_SIZE];
        write_image_head(&settings, 1920, 1080, 4, 8, &mut buf);

        assert_eq!(&buf[0..4], &IMAGE_HEAD_MAGIC.to_le_bytes());

        let (width, height, channels, depth, parsed) = read_image_head(&buf).unwrap();
        assert_eq!((width, height, channels, depth), (1920, 1080, 4, 8));
        assert_eq!(parsed.color, settings.color);
        assert_eq!(parsed.wavelet, settings.wavelet);
        assert_eq!(parsed.wrap, settings.wrap);
        assert_eq!(parsed.compression, settings.compression);
        assert_eq!(parsed.tiles_dimension, 64);
    }

    #[test]
    fn image_head_without_tiling_round_trips_zero() {
        let settings = Settings::default();
        let mut buf = vec![0u8; IMAGE_HEAD_SIZE];
        write_image_head(&settings, 1, 1, 1, 1, &mut buf);

        let (width, height, channels, depth, parsed) = read_image_head(&buf).unwrap();
        assert_eq!((width, height, channels, depth), (1, 1, 1, 1));
        assert_eq!(parsed.tiles_dimension, 0);
    }

    #[test]
    fn image_head_carries_non_default_compression_tag() {
        // The source's ImageHeadWrite never ORs the compression tag into
        // word C; decode still expects to read it there, so the forward
        // port writes it to match what DecodeHead actually parses.
        let settings = Settings::default().with_compression(Compression::None);
        let mut buf = vec![0u8; IMAGE_HEAD_SIZE];
        write_image_head(&settings, 4, 4, 3, 8, &mut buf);

        let (_, _, _, _, parsed) = read_image_head(&buf).unwrap();
        assert_eq!(parsed.compression, Compression::None);
    }

    #[test]
    fn rejects_bad_magic() {
        let buf = vec![0u8; IMAGE_HEAD_SIZE];
        assert_eq!(read_image_head(&buf), Err(CodecError::NotAnAkoFile));
    }

    #[test]
    fn rejects_truncated_image_head() {
        let buf = vec![0u8; 8];
        assert_eq!(read_image_head(&buf), Err(CodecError::TruncatedImageHead));
    }

    #[test]
    fn tile_head_roundtrips() {
        let mut buf = vec![0u8; TILE_HEAD_SIZE];
        write_tile_head(3, Compression::Kagari, 512, &mut buf);

        let parsed = read_tile_head(&buf).unwrap();
        assert_eq!(parsed.no, 3);
        assert_eq!(parsed.compressed_size, 512);
        assert_eq!(parsed.compression, Compression::Kagari);
    }

    #[test]
    fn tile_head_rejects_zero_size() {
        let mut buf = vec![0u8; TILE_HEAD_SIZE];
        write_tile_head(0, Compression::None, 0, &mut buf);
        assert_eq!(read_tile_head(&buf), Err(CodecError::InvalidTileHead));
    }

    #[test]
    fn validate_properties_rejects_out_of_range_dimensions() {
        assert_eq!(validate_properties(0, 1, 1, 8), Err(CodecError::InvalidDimensions));
        assert_eq!(validate_properties(1, 1, 0, 8), Err(CodecError::InvalidChannelsNo));
        assert_eq!(validate_properties(1, 1, 1, 0), Err(CodecError::InvalidDepth));
        assert_eq!(validate_properties(1, 1, 1, 17), Err(CodecError::InvalidDepth));
    }
}
