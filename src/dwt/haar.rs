//! Haar kernel: the simplest lift, used as a fallback for subbands too
//! small for CDF 5/3's three-tap support.
//!
//! Ground truth: `library/encode/wavelet-haar.cpp` /
//! `library/decode/wavelet-haar.cpp`.

use super::Kernel;

pub struct Haar;

fn half(n: usize) -> usize {
    n / 2
}

fn half_plus_one(n: usize) -> usize {
    n.div_ceil(2)
}

impl Kernel for Haar {
    fn h_forward(&self, width: usize, height: usize, input_stride: usize, output_stride: usize, input: &[i16], output: &mut [i16]) {
        let half = half(width);
        let rule = half_plus_one(width);

        for row in 0..height {
            let in_row = &input[row * input_stride..];
            let out_row = &mut output[row * output_stride..];

            for col in 0..half.saturating_sub(1) {
                let even = in_row[col * 2];
                let odd = in_row[col * 2 + 1];
                let hp = even.wrapping_sub(odd);
                out_row[col] = even;
                out_row[col + rule] = hp;
            }

            if rule == half {
                let col = half - 1;
                let even = in_row[col * 2];
                let odd = in_row[col * 2 + 1];
                let hp = even.wrapping_sub(odd);
                out_row[col] = even;
                out_row[col + rule] = hp;
            } else {
                for col in half.saturating_sub(1)..rule {
                    let even = in_row[col * 2];
                    let odd = if col != rule - 1 { in_row[col * 2 + 1] } else { even };
                    let hp = even.wrapping_sub(odd);
                    out_row[col] = even;
                    if col != rule - 1 {
                        out_row[col + rule] = hp;
                    }
                }
            }
        }
    }

    fn v_forward(&self, width: usize, height: usize, input_stride: usize, output_stride: usize, input: &[i16], output: &mut [i16]) {
        let half = half(height);
        let rule = half_plus_one(height);

        let mut emit_row = |row: usize, even_row: usize, odd_row: Option<usize>| {
            for col in 0..width {
                let even = input[even_row * input_stride + col];
                let odd = odd_row.map(|r| input[r * input_stride + col]).unwrap_or(even);
                let hp = even.wrapping_sub(odd);
                output[row * output_stride + col] = even;
                if odd_row.is_some() {
                    output[(row + rule) * output_stride + col] = hp;
                }
            }
        };

        for row in 0..half.saturating_sub(1) {
            emit_row(row, row * 2, Some(row * 2 + 1));
        }

        if rule == half {
            let row = half - 1;
            emit_row(row, row * 2, Some(row * 2 + 1));
        } else {
            for row in half.saturating_sub(1)..rule {
                let odd_row = if row != rule - 1 { Some(row * 2 + 1) } else { None };
                emit_row(row, row * 2, odd_row);
            }
        }
    }

    fn h_inverse(&self, height: usize, lp_w: usize, hp_w: usize, out_stride: usize, lowpass: &[i16], highpass: &[i16], output: &mut [i16]) {
        for row in 0..height {
            let lp_row = &lowpass[row * lp_w..];
            let hp_row = &highpass[row * hp_w..];
            let out_row = &mut output[row * out_stride..];

            for col in 0..hp_w {
                let lp = lp_row[col];
                let hp = hp_row[col];
                let even = lp;
                let odd = lp.wrapping_sub(hp);
                out_row[col * 2] = even;
                out_row[col * 2 + 1] = odd;
            }

            if lp_w != hp_w {
                let col = hp_w;
                out_row[col * 2] = lp_row[col];
            }
        }
    }

    fn v_inverse(&self, width: usize, lp_h: usize, hp_h: usize, lowpass: &[i16], highpass: &mut [i16], out_lowpass: &mut [i16]) {
        for row in 0..hp_h {
            for col in 0..width {
                let lp = lowpass[row * width + col];
                let hp = highpass[row * width + col];
                let even = lp;
                let odd = lp.wrapping_sub(hp);
                out_lowpass[row * width + col] = even;
                highpass[row * width + col] = odd;
            }
        }

        if lp_h != hp_h {
            let row = hp_h;
            for col in 0..width {
                out_lowpass[row * width + col] = lowpass[row * width + col];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mirrors the quadrant-splitting the lift driver does, so this
    /// exercises the same addressing the full driver relies on.
    fn forward_inverse_roundtrip(width: usize, height: usize, data: &[i16]) {
        let lp_w = half_plus_one(width);
        let hp_w = half(width);
        let lp_h = half_plus_one(height);
        let hp_h = half(height);

        let kernel = Haar;

        let mut hf = vec![0i16; width * height];
        kernel.h_forward(width, height, width, width, data, &mut hf);

        let mut vf = vec![0i16; width * height];
        kernel.v_forward(width, height, width, width, &hf, &mut vf);

        let mut a = vec![0i16; lp_w * lp_h];
        let mut b = vec![0i16; hp_w * lp_h];
        let mut c = vec![0i16; lp_w * hp_h];
        let mut d = vec![0i16; hp_w * hp_h];

        for row in 0..lp_h {
            a[row * lp_w..row * lp_w + lp_w].copy_from_slice(&vf[row * width..row * width + lp_w]);
            b[row * hp_w..row * hp_w + hp_w].copy_from_slice(&vf[row * width + lp_w..row * width + lp_w + hp_w]);
        }
        for row in 0..hp_h {
            let src = lp_h + row;
            c[row * lp_w..row * lp_w + lp_w].copy_from_slice(&vf[src * width..src * width + lp_w]);
            d[row * hp_w..row * hp_w + hp_w].copy_from_slice(&vf[src * width + lp_w..src * width + lp_w + hp_w]);
        }

        let mut aux = vec![0i16; lp_w * lp_h];
        kernel.v_inverse(lp_w, lp_h, hp_h, &a, &mut c, &mut aux);

        let mut b_evens = vec![0i16; hp_w * lp_h];
        kernel.v_inverse(hp_w, lp_h, hp_h, &b, &mut d, &mut b_evens);

        let mut out = vec![0i16; width * height];
        kernel.h_inverse(lp_h, lp_w, hp_w, width * 2, &aux, &b_evens, &mut out);
        kernel.h_inverse(hp_h, lp_w, hp_w, width * 2, &c, &d, &mut out[width..]);

        assert_eq!(out, data);
    }

    #[test]
    fn roundtrip_even_dims() {
        let data: Vec<i16> = (0..64).map(|i| (i * 3 - 30) as i16).collect();
        forward_inverse_roundtrip(8, 8, &data);
    }

    #[test]
    fn roundtrip_odd_dims() {
        let data: Vec<i16> = (0..(7 * 5)).map(|i| (i - 17) as i16).collect();
        forward_inverse_roundtrip(7, 5, &data);
    }

    #[test]
    fn roundtrip_single_row() {
        let data: Vec<i16> = vec![10, -5, 3, 7, -1];
        forward_inverse_roundtrip(5, 1, &data);
    }
}
