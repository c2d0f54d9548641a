//! CDF 5/3 kernel: the three-tap lift used whenever a subband is large
//! enough to support it (see `dwt::select` for the size cutoff).
//!
//! Ground truth: `library/encode/wavelet-cdf53.cpp` /
//! `library/decode/wavelet-cdf53.cpp`.

use super::Kernel;

pub struct Cdf53;

fn half(n: usize) -> usize {
    n / 2
}

fn half_plus_one(n: usize) -> usize {
    n.div_ceil(2)
}

fn hp_step(odd: i16, even: i16, even_p1: i16) -> i16 {
    odd.wrapping_sub(even.wrapping_add(even_p1) / 2)
}

fn lp_step(even: i16, hp_l1: i16, hp: i16) -> i16 {
    even.wrapping_add(hp_l1.wrapping_add(hp) / 4)
}

fn even_step(lp: i16, hp_l1: i16, hp: i16) -> i16 {
    lp.wrapping_sub(hp_l1.wrapping_add(hp) / 4)
}

fn odd_step(hp: i16, even: i16, even_p1: i16) -> i16 {
    hp.wrapping_add(even.wrapping_add(even_p1) / 2)
}

impl Kernel for Cdf53 {
    fn h_forward(&self, width: usize, height: usize, input_stride: usize, output_stride: usize, input: &[i16], output: &mut [i16]) {
        let half = half(width);
        let rule = half_plus_one(width);

        for row in 0..height {
            let in_row = &input[row * input_stride..];
            let out_row = &mut output[row * output_stride..];
            let mut hp_l1 = 0i16;

            for col in 0..half.saturating_sub(1) {
                let even = in_row[col * 2];
                let odd = in_row[col * 2 + 1];
                let even_p1 = in_row[col * 2 + 2];
                let hp = hp_step(odd, even, even_p1);
                let lp = lp_step(even, hp_l1, hp);
                out_row[col] = lp;
                out_row[col + rule] = hp;
                hp_l1 = hp;
            }

            if rule == half {
                let col = half - 1;
                let even = in_row[col * 2];
                let odd = in_row[col * 2 + 1];
                let even_p1 = even;
                let hp = hp_step(odd, even, even_p1);
                let lp = lp_step(even, hp_l1, hp);
                out_row[col] = lp;
                out_row[col + rule] = hp;
            } else {
                for col in half.saturating_sub(1)..rule {
                    let even = in_row[col * 2];
                    let at_edge = col >= rule - 1;
                    let odd = if !at_edge { in_row[col * 2 + 1] } else { even };
                    let even_p1 = if !at_edge { in_row[col * 2 + 2] } else { even };
                    let hp = if !at_edge { hp_step(odd, even, even_p1) } else { 0 };
                    let lp = lp_step(even, hp_l1, hp);
                    out_row[col] = lp;
                    if !at_edge {
                        out_row[col + rule] = hp;
                    }
                    hp_l1 = hp;
                }
            }
        }
    }

    fn v_forward(&self, width: usize, height: usize, input_stride: usize, output_stride: usize, input: &[i16], output: &mut [i16]) {
        let half = half(height);
        let rule = half_plus_one(height);

        let at = |buf: &[i16], row: usize, col: usize| buf[row * input_stride + col];

        let mut row_hp_l1: Vec<i16> = vec![0i16; width];

        for row in 0..half.saturating_sub(1) {
            let even_row = row * 2;
            let odd_row = row * 2 + 1;
            let even_p1_row = row * 2 + 2;
            for col in 0..width {
                let even = at(input, even_row, col);
                let odd = at(input, odd_row, col);
                let even_p1 = at(input, even_p1_row, col);
                let hp = hp_step(odd, even, even_p1);
                let lp = lp_step(even, row_hp_l1[col], hp);
                output[row * output_stride + col] = lp;
                output[(row + rule) * output_stride + col] = hp;
                row_hp_l1[col] = hp;
            }
        }

        if rule == half {
            let row = half - 1;
            let even_row = row * 2;
            let odd_row = row * 2 + 1;
            for col in 0..width {
                let even = at(input, even_row, col);
                let odd = at(input, odd_row, col);
                let even_p1 = even;
                let hp = hp_step(odd, even, even_p1);
                let lp = lp_step(even, row_hp_l1[col], hp);
                output[row * output_stride + col] = lp;
                output[(row + rule) * output_stride + col] = hp;
            }
        } else {
            for row in half.saturating_sub(1)..rule {
                let at_edge = row >= rule - 1;
                let even_row = row * 2;
                for col in 0..width {
                    let even = at(input, even_row, col);
                    let odd = if !at_edge { at(input, row * 2 + 1, col) } else { even };
                    let even_p1 = if !at_edge { at(input, row * 2 + 2, col) } else { even };
                    let hp = if !at_edge { hp_step(odd, even, even_p1) } else { 0 };
                    let lp = lp_step(even, row_hp_l1[col], hp);
                    output[row * output_stride + col] = lp;
                    if !at_edge {
                        output[(row + rule) * output_stride + col] = hp;
                    }
                    row_hp_l1[col] = hp;
                }
            }
        }
    }

    fn h_inverse(&self, height: usize, lp_w: usize, hp_w: usize, out_stride: usize, lowpass: &[i16], highpass: &[i16], output: &mut [i16]) {
        for row in 0..height {
            let lp_row = &lowpass[row * lp_w..row * lp_w + lp_w];
            let hp_row = &highpass[row * hp_w..row * hp_w + hp_w];
            let out_row = &mut output[row * out_stride..];
            let mut hp_l1 = 0i16;

            for col in 0..hp_w.saturating_sub(2) {
                let lp = lp_row[col];
                let lp_p1 = lp_row[col + 1];
                let hp = hp_row[col];
                let hp_p1 = hp_row[col + 1];

                let even = even_step(lp, hp_l1, hp);
                let even_p1 = even_step(lp_p1, hp, hp_p1);
                let odd = odd_step(hp, even, even_p1);

                out_row[col * 2] = even;
                out_row[col * 2 + 1] = odd;
                hp_l1 = hp;
            }

            if lp_w == hp_w {
                for col in hp_w.saturating_sub(2)..hp_w {
                    let lp = lp_row[col];
                    let hp = hp_row[col];
                    let even = even_step(lp, hp_l1, hp);
                    let even_p1 = if col != hp_w - 1 {
                        even_step(lp_row[col + 1], hp, hp_row[col + 1])
                    } else {
                        even
                    };
                    let odd = odd_step(hp, even, even_p1);
                    out_row[col * 2] = even;
                    out_row[col * 2 + 1] = odd;
                    hp_l1 = hp;
                }
            } else {
                for col in hp_w.saturating_sub(2)..hp_w {
                    let lp = lp_row[col];
                    let hp = hp_row[col];
                    let lp_p1 = lp_row[col + 1];
                    let hp_p1 = if col < hp_w - 1 { hp_row[col + 1] } else { 0 };

                    let even = even_step(lp, hp_l1, hp);
                    let even_p1 = even_step(lp_p1, hp, hp_p1);
                    let odd = odd_step(hp, even, even_p1);

                    out_row[col * 2] = even;
                    out_row[col * 2 + 1] = odd;
                    hp_l1 = hp;
                }

                let col = hp_w;
                let lp = lp_row[col];
                let even = even_step(lp, hp_l1, 0);
                out_row[col * 2] = even;
            }
        }
    }

    fn v_inverse(&self, width: usize, lp_h: usize, hp_h: usize, lowpass: &[i16], highpass: &mut [i16], out_lowpass: &mut [i16]) {
        // Evens.
        {
            let mut hp_l1 = vec![0i16; width];
            for row in 0..hp_h {
                for col in 0..width {
                    let even = even_step(lowpass[row * width + col], hp_l1[col], highpass[row * width + col]);
                    out_lowpass[row * width + col] = even;
                }
                hp_l1.copy_from_slice(&highpass[row * width..row * width + width]);
            }
            if lp_h != hp_h {
                let row = hp_h;
                for col in 0..width {
                    let even = even_step(lowpass[row * width + col], hp_l1[col], 0);
                    out_lowpass[row * width + col] = even;
                }
            }
        }

        // Odds.
        {
            for row in 0..hp_h.saturating_sub(1) {
                for col in 0..width {
                    let even = out_lowpass[row * width + col];
                    let even_p1 = out_lowpass[(row + 1) * width + col];
                    let hp = highpass[row * width + col];
                    highpass[row * width + col] = odd_step(hp, even, even_p1);
                }
            }
            if hp_h > 0 {
                let row = hp_h - 1;
                for col in 0..width {
                    let even = out_lowpass[row * width + col];
                    let even_p1 = if lp_h == hp_h { even } else { out_lowpass[(row + 1) * width + col] };
                    let hp = highpass[row * width + col];
                    highpass[row * width + col] = odd_step(hp, even, even_p1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_inverse_roundtrip(width: usize, height: usize, data: &[i16]) {
        let lp_w = half_plus_one(width);
        let hp_w = half(width);
        let lp_h = half_plus_one(height);
        let hp_h = half(height);

        let kernel = Cdf53;

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
        let data: Vec<i16> = (0..(16 * 8)).map(|i| ((i * 7) % 200 - 100) as i16).collect();
        forward_inverse_roundtrip(16, 8, &data);
    }

    #[test]
    fn roundtrip_odd_dims() {
        let data: Vec<i16> = (0..(9 * 7)).map(|i| ((i * 13) % 150 - 75) as i16).collect();
        forward_inverse_roundtrip(9, 7, &data);
    }

    #[test]
    fn roundtrip_needs_two_wide_highpass() {
        // width=4 -> hp_w=2, the smallest size Cdf53 tolerates without
        // underflowing the inverse kernel's "hp_w - 2" bound.
        let data: Vec<i16> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        forward_inverse_roundtrip(4, 2, &data);
    }
}
