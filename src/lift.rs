//! Multi-level 2D lift/unlift driver.
//!
//! The per-row/per-column math is ported from `library/encode/wavelet-*.cpp`
//! and `library/decode/wavelet-*.cpp`, but the buffer layout here is this
//! crate's own: each lift level's three detail quadrants are split out
//! into their own contiguous `Vec<i16>` (rather than addressed in place
//! through raw pointer arithmetic into one shared arena, as the C++ does),
//! and the level list is walked outer-to-inner on the way down and
//! inner-to-outer on the way back up. `library/decode/lifting.cpp`'s
//! `sUnlift` is what fixes the channel/quadrant read order this mirrors:
//! lowpasses for every channel first, then each level's highpasses for
//! every channel, innermost level first.

use crate::dwt::cdf53::Cdf53;
use crate::dwt::haar::Haar;
use crate::dwt::Kernel;
use crate::geometry::{half, half_plus_one, lifts_no};
use crate::settings::Wavelet;

/// CDF 5/3's inverse kernel indexes `highpass[col + 1]` up to
/// `col == highpass_len - 2`; below this highpass width it silently
/// underflows, so anything smaller falls back to Haar.
const CDF53_MINIMUM_HIGHPASS: u32 = 2;

fn kernel_for(wavelet: Wavelet, highpass_len: u32) -> Box<dyn Kernel> {
    match wavelet {
        Wavelet::Cdf53 if highpass_len >= CDF53_MINIMUM_HIGHPASS => Box::new(Cdf53),
        _ => Box::new(Haar),
    }
}

/// One level's three detail quadrants, plus the dimensions needed to
/// address them. `lp_w`/`lp_h` here are the dimensions of the level
/// *above* this one (the A quadrant driving this split).
#[derive(Debug, Clone)]
pub struct LevelDetail {
    pub lp_w: u32,
    pub lp_h: u32,
    pub hp_w: u32,
    pub hp_h: u32,
    /// Vertical detail, `lp_w * hp_h`.
    pub c: Vec<i16>,
    /// Horizontal detail, `hp_w * lp_h`.
    pub b: Vec<i16>,
    /// Diagonal detail, `hp_w * hp_h`.
    pub d: Vec<i16>,
}

/// The full coefficient tree for one color plane: the innermost lowpass
/// plus every level's details, outer level first.
#[derive(Debug, Clone)]
pub struct LiftedPlane {
    pub lowpass: Vec<i16>,
    pub lowpass_w: u32,
    pub lowpass_h: u32,
    pub levels: Vec<LevelDetail>,
}

/// Forward lift of one `width x height` plane of samples.
pub fn lift(wavelet: Wavelet, width: u32, height: u32, plane: &[i16]) -> LiftedPlane {
    let total_levels = lifts_no(width, height);
    let mut current = plane.to_vec();
    let mut current_w = width;
    let mut current_h = height;
    let mut levels = Vec::with_capacity(total_levels as usize);

    for _ in 0..total_levels {
        let lp_w = half_plus_one(current_w);
        let hp_w = half(current_w);
        let lp_h = half_plus_one(current_h);
        let hp_h = half(current_h);

        let h_kernel = kernel_for(wavelet, hp_w);
        let v_kernel = kernel_for(wavelet, hp_h);

        let mut h_buf = vec![0i16; (current_w * current_h) as usize];
        h_kernel.h_forward(current_w as usize, current_h as usize, current_w as usize, current_w as usize, &current, &mut h_buf);

        let mut v_buf = vec![0i16; (current_w * current_h) as usize];
        v_kernel.v_forward(current_w as usize, current_h as usize, current_w as usize, current_w as usize, &h_buf, &mut v_buf);

        let (a, b, c, d) = split_quadrants(&v_buf, current_w, lp_w, lp_h, hp_w, hp_h);

        levels.push(LevelDetail { lp_w, lp_h, hp_w, hp_h, c, b, d });
        current = a;
        current_w = lp_w;
        current_h = lp_h;
    }

    LiftedPlane { lowpass: current, lowpass_w: current_w, lowpass_h: current_h, levels }
}

fn split_quadrants(v_buf: &[i16], stride: u32, lp_w: u32, lp_h: u32, hp_w: u32, hp_h: u32) -> (Vec<i16>, Vec<i16>, Vec<i16>, Vec<i16>) {
    let (stride, lp_w, lp_h, hp_w, hp_h) = (stride as usize, lp_w as usize, lp_h as usize, hp_w as usize, hp_h as usize);
    let mut a = vec![0i16; lp_w * lp_h];
    let mut b = vec![0i16; hp_w * lp_h];
    let mut c = vec![0i16; lp_w * hp_h];
    let mut d = vec![0i16; hp_w * hp_h];

    for row in 0..lp_h {
        a[row * lp_w..row * lp_w + lp_w].copy_from_slice(&v_buf[row * stride..row * stride + lp_w]);
        b[row * hp_w..row * hp_w + hp_w].copy_from_slice(&v_buf[row * stride + lp_w..row * stride + lp_w + hp_w]);
    }
    for row in 0..hp_h {
        let src = lp_h + row;
        c[row * lp_w..row * lp_w + lp_w].copy_from_slice(&v_buf[src * stride..src * stride + lp_w]);
        d[row * hp_w..row * hp_w + hp_w].copy_from_slice(&v_buf[src * stride + lp_w..src * stride + lp_w + hp_w]);
    }
    (a, b, c, d)
}

/// Inverse lift, reconstructing the original `width x height` plane.
pub fn unlift(wavelet: Wavelet, plane: &LiftedPlane) -> Vec<i16> {
    let mut current = plane.lowpass.clone();
    let mut current_w = plane.lowpass_w;
    let mut current_h = plane.lowpass_h;

    for level in plane.levels.iter().rev() {
        let LevelDetail { lp_w, lp_h, hp_w, hp_h, c, b, d } = level;
        let (lp_w, lp_h, hp_w, hp_h) = (*lp_w, *lp_h, *hp_w, *hp_h);

        let h_kernel = kernel_for(wavelet, hp_w);
        let v_kernel = kernel_for(wavelet, hp_h);

        let mut c = c.clone();
        let mut d = d.clone();

        let mut aux = vec![0i16; (lp_w * lp_h) as usize];
        v_kernel.v_inverse(lp_w as usize, lp_h as usize, hp_h as usize, &current, &mut c, &mut aux);

        let mut b_evens = vec![0i16; (hp_w * lp_h) as usize];
        v_kernel.v_inverse(hp_w as usize, lp_h as usize, hp_h as usize, b, &mut d, &mut b_evens);

        let full_w = lp_w + hp_w;
        let full_h = lp_h + hp_h;
        let mut out = vec![0i16; (full_w * full_h) as usize];

        h_kernel.h_inverse(lp_h as usize, lp_w as usize, hp_w as usize, (full_w * 2) as usize, &aux, &b_evens, &mut out);
        h_kernel.h_inverse(hp_h as usize, lp_w as usize, hp_w as usize, (full_w * 2) as usize, &c, &d, &mut out[full_w as usize..]);

        current = out;
        current_w = full_w;
        current_h = full_h;
    }

    debug_assert_eq!(current.len(), (current_w * current_h) as usize);
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(wavelet: Wavelet, width: u32, height: u32) {
        let plane: Vec<i16> = (0..(width * height)).map(|i| ((i * 37) % 511) as i16 - 255).collect();
        let lifted = lift(wavelet, width, height, &plane);
        let reconstructed = unlift(wavelet, &lifted);
        assert_eq!(reconstructed, plane, "{wavelet:?} {width}x{height} did not round-trip");
    }

    #[test]
    fn haar_roundtrip_various_sizes() {
        for &(w, h) in &[(1u32, 1u32), (2, 2), (3, 3), (8, 8), (23, 17), (1, 50), (50, 1)] {
            roundtrip(Wavelet::Haar, w, h);
        }
    }

    #[test]
    fn cdf53_roundtrip_various_sizes() {
        for &(w, h) in &[(4u32, 4u32), (8, 8), (16, 12), (23, 17), (200, 200), (3, 3), (1, 1)] {
            roundtrip(Wavelet::Cdf53, w, h);
        }
    }

    #[test]
    fn lifts_no_matches_level_count() {
        let plane: Vec<i16> = vec![0; 23 * 17];
        let lifted = lift(Wavelet::Cdf53, 23, 17, &plane);
        assert_eq!(lifted.levels.len() as u32, lifts_no(23, 17));
    }

    #[test]
    fn one_by_one_image_has_no_levels() {
        let plane: Vec<i16> = vec![42];
        let lifted = lift(Wavelet::Haar, 1, 1, &plane);
        assert!(lifted.levels.is_empty());
        assert_eq!(lifted.lowpass, vec![42]);
    }
}
