//! Advisory event callbacks for instrumenting an encode or decode pass.
//!
//! Ground truth: the C API's function-pointer callback struct, redesigned
//! per spec.md's capability-trait guidance (§9) the way a Rust embedder
//! would actually consume it. A `Reporter` never influences byte output;
//! it is purely an observation hook, matching the original's own
//! guarantee that callbacks are best-effort notifications.

/// Tile/phase boundary notifications an encoder or decoder emits while it
/// runs. The default no-op implementation means callers that don't care
/// pay nothing.
pub trait Reporter {
    /// A free-form progress message, analogous to the original's generic
    /// event callback.
    fn generic_event(&mut self, _message: &str) {}

    /// Color transform applied to a tile, before the wavelet lift.
    fn format_event(&mut self, _tile_no: u32, _color: crate::settings::Color) {}

    /// One tile finished its forward or inverse lift.
    fn lifting_event(&mut self, _tile_no: u32, _levels: u32) {}

    /// One tile finished quantization and entropy coding, with the final
    /// compressed size in bytes.
    fn compression_event(&mut self, _tile_no: u32, _compressed_size: usize) {}

    /// A coefficient histogram was built for a tile (rate control or
    /// diagnostic tooling), given as `(value, count)` pairs.
    fn histogram_event(&mut self, _tile_no: u32, _histogram: &[(i16, u32)]) {}
}

/// The reporter used when a caller doesn't supply one: observes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// A reporter that appends every event to an in-memory log, for tests and
/// for the CLI's `--verbose` flag.
#[derive(Debug, Default)]
pub struct LogReporter {
    pub lines: Vec<String>,
}

impl Reporter for LogReporter {
    fn generic_event(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn format_event(&mut self, tile_no: u32, color: crate::settings::Color) {
        self.lines.push(format!("tile {tile_no}: color transform {color:?}"));
    }

    fn lifting_event(&mut self, tile_no: u32, levels: u32) {
        self.lines.push(format!("tile {tile_no}: lifted {levels} level(s)"));
    }

    fn compression_event(&mut self, tile_no: u32, compressed_size: usize) {
        self.lines.push(format!("tile {tile_no}: compressed to {compressed_size} bytes"));
    }

    fn histogram_event(&mut self, tile_no: u32, histogram: &[(i16, u32)]) {
        self.lines.push(format!("tile {tile_no}: histogram with {} distinct values", histogram.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Color;

    #[test]
    fn null_reporter_accepts_every_event_without_panicking() {
        let mut r = NullReporter;
        r.generic_event("hello");
        r.format_event(0, Color::YCoCg);
        r.lifting_event(0, 3);
        r.compression_event(0, 128);
        r.histogram_event(0, &[(0, 10)]);
    }

    #[test]
    fn log_reporter_records_every_event() {
        let mut r = LogReporter::default();
        r.generic_event("starting encode");
        r.format_event(2, Color::SubtractG);
        r.lifting_event(2, 4);
        r.compression_event(2, 512);
        r.histogram_event(2, &[(0, 900), (1, 50)]);

        assert_eq!(r.lines.len(), 5);
        assert!(r.lines[0].contains("starting encode"));
        assert!(r.lines[1].contains("SubtractG"));
        assert!(r.lines[3].contains("512"));
    }
}
