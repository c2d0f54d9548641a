//! Codec configuration: the recoverable settings serialized into the
//! container header, and the encoder-only knobs that never make it to
//! the wire.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::CodecError;

/// Color transform applied before the wavelet lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Color {
    YCoCg = 0,
    SubtractG = 1,
    None = 2,
}

/// Wavelet kernel used by the lift driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Wavelet {
    Dd137 = 0,
    Cdf53 = 1,
    Haar = 2,
    None = 3,
}

/// Edge-extension policy used by the wavelet kernels at tile borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Wrap {
    Clamp = 0,
    Mirror = 1,
    Repeat = 2,
    Zero = 3,
}

/// Entropy compression applied to quantized coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Compression {
    Kagari = 0,
    Manbavaran = 1,
    None = 2,
}

impl Color {
    pub fn from_tag(tag: u32) -> Result<Self, CodecError> {
        Self::try_from(tag).map_err(|_| CodecError::InvalidColor)
    }
}

impl Wavelet {
    pub fn from_tag(tag: u32) -> Result<Self, CodecError> {
        Self::try_from(tag).map_err(|_| CodecError::InvalidWavelet)
    }

    /// Whether the lift driver actually has an implementation for this tag.
    pub fn is_implemented(self) -> bool {
        matches!(self, Wavelet::Cdf53 | Wavelet::Haar | Wavelet::None)
    }
}

impl Wrap {
    pub fn from_tag(tag: u32) -> Result<Self, CodecError> {
        Self::try_from(tag).map_err(|_| CodecError::InvalidWrap)
    }
}

impl Compression {
    pub fn from_tag(tag: u32) -> Result<Self, CodecError> {
        Self::try_from(tag).map_err(|_| CodecError::InvalidCompression)
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, Compression::Kagari | Compression::None)
    }
}

/// Encoder/decoder settings. The fields above the `---` line are
/// recoverable from a decoded container; the ones below are encoder-only
/// tuning knobs and are never serialized into the bitstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub color: Color,
    pub wavelet: Wavelet,
    pub wrap: Wrap,
    pub compression: Compression,
    pub tiles_dimension: u32,

    // --- encoder-only, not recoverable from the bitstream ---
    pub quantization: f64,
    pub gate: f64,
    pub chroma_loss: f64,
    pub discard: bool,
    pub ratio: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            color: Color::YCoCg,
            wavelet: Wavelet::Cdf53,
            wrap: Wrap::Clamp,
            compression: Compression::Kagari,
            tiles_dimension: 0,
            quantization: 64.0,
            gate: 0.0,
            chroma_loss: 1.0,
            discard: false,
            ratio: 0.0,
        }
    }
}

impl Settings {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_wavelet(mut self, wavelet: Wavelet) -> Self {
        self.wavelet = wavelet;
        self
    }

    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_tiles_dimension(mut self, tiles_dimension: u32) -> Self {
        self.tiles_dimension = tiles_dimension;
        self
    }

    pub fn with_quantization(mut self, quantization: f64) -> Self {
        self.quantization = quantization;
        self
    }

    pub fn with_gate(mut self, gate: f64) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if !self.wavelet.is_implemented() {
            return Err(CodecError::NotImplemented);
        }
        if !self.compression.is_implemented() {
            return Err(CodecError::NotImplemented);
        }
        if self.tiles_dimension != 0 {
            if self.tiles_dimension < crate::constants::MINIMUM_TILES_DIMENSION
                || self.tiles_dimension > crate::constants::MAXIMUM_TILES_DIMENSION
                || !self.tiles_dimension.is_power_of_two()
            {
                return Err(CodecError::InvalidTilesDimension);
            }
        }
        if self.quantization < 1.0 || !self.quantization.is_finite() {
            return Err(CodecError::InvalidSettings);
        }
        if self.gate < 0.0 || self.chroma_loss < 0.0 || self.ratio < 0.0 {
            return Err(CodecError::InvalidSettings);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        for tag in 0..3u32 {
            assert_eq!(u32::from(Color::from_tag(tag).unwrap()), tag);
        }
        for tag in 0..4u32 {
            assert_eq!(u32::from(Wavelet::from_tag(tag).unwrap()), tag);
            assert_eq!(u32::from(Wrap::from_tag(tag).unwrap()), tag);
            assert_eq!(u32::from(Compression::from_tag(tag).unwrap()), tag);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(Color::from_tag(3), Err(CodecError::InvalidColor));
        assert_eq!(Wavelet::from_tag(4), Err(CodecError::InvalidWavelet));
    }

    #[test]
    fn default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn non_power_of_two_tile_rejected() {
        let s = Settings::default().with_tiles_dimension(48);
        assert_eq!(s.validate(), Err(CodecError::InvalidTilesDimension));
    }

    #[test]
    fn unimplemented_wavelet_rejected_at_validation() {
        let s = Settings::default().with_wavelet(Wavelet::Dd137);
        assert_eq!(s.validate(), Err(CodecError::NotImplemented));
    }
}
