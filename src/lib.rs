/*!
# tessera-codec

`tessera-codec` is a pure Rust library for a lossy still-image codec built
around a 2D wavelet lift, rANS/Kagari entropy coding and a self-describing
tiled container.

## Pipeline

- **Color** (`color`): deinterleave, optional alpha-discard, reversible
  YCoCg / subtract-green transform.
- **Wavelet lift** (`dwt`, `lift`): per-tile, per-channel multi-level 2D
  lift with CDF 5/3 or Haar kernels.
- **Quantization** (`quantize`): per-subband deadzone quantizer with
  bisection rate control toward a target compressed size.
- **Entropy coding** (`kagari`, `rans`): `kagari` frames quantized
  coefficients into run-length/literal-length blocks, then `rans`, an
  asymmetric-numeral-system coder over a fixed CDF table, entropy-codes
  every literal value in a single pass; or raw passthrough.
- **Container** (`container`, `tile`): little-endian, bit-packed image and
  tile headers framing the compressed payload.

## Status

CDF 5/3 and Haar wavelets, all three color transforms, and the Kagari and
raw compression backends are implemented for 8-bit-or-narrower depth.
`Wavelet::Dd137` and `Compression::Manbavaran` are recognized container
tags with no implementation yet and report
[`CodecError::NotImplemented`][error::CodecError::NotImplemented].
*/

pub mod bit_io;
pub mod color;
pub mod constants;
pub mod container;
pub mod dwt;
pub mod error;
pub mod geometry;
pub mod kagari;
pub mod lift;
pub mod quantize;
pub mod rans;
pub mod report;
pub mod settings;
pub mod tile;

pub use error::CodecError;
pub use report::{LogReporter, NullReporter, Reporter};
pub use settings::{Color, Compression, Settings, Wavelet, Wrap};
pub use tile::{decode, decode_with_reporter, encode, encode_with_reporter, DecodedImage};
