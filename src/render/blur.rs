use crate::foundation::error::{TypestampError, TypestampResult};

/// Largest sigma accepted; keeps kernels bounded for huge shadow settings.
const MAX_SIGMA: f64 = 256.0;

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> TypestampResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(TypestampError::render("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(TypestampError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding error into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

/// Gaussian blur of a premultiplied RGBA8 buffer. Pixels outside the buffer count as transparent,
/// so content fades out at the edges instead of smearing.
pub(crate) fn blur_in_place(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    sigma: f64,
    tmp: &mut Vec<u8>,
) -> TypestampResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Ok(());
    }
    if pixels.len() != (width as usize) * (height as usize) * 4 {
        return Err(TypestampError::render("blur buffer does not match its dimensions"));
    }
    let sigma = sigma.min(MAX_SIGMA);
    let radius = ((sigma * 3.0).ceil() as u32).min(width.max(height));
    let kernel = gaussian_kernel_q16(radius, sigma as f32)?;
    if kernel.len() == 1 {
        return Ok(());
    }

    tmp.clear();
    tmp.resize(pixels.len(), 0);
    horizontal_blur_q16(pixels, tmp, width, height, &kernel);
    vertical_blur_q16(tmp, pixels, width, height, &kernel);
    Ok(())
}

fn horizontal_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    for y in 0..i64::from(height) {
        let row = (y * w) as usize * 4;
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = x + ki as i64 - radius;
                if sx < 0 || sx >= w {
                    continue;
                }
                let idx = row + sx as usize * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = row + x as usize * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = y + ki as i64 - radius;
                if sy < 0 || sy >= h {
                    continue;
                }
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
