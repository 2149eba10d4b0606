use crate::foundation::core::Rgba8;
use crate::foundation::math::mul_div255_u16;

/// Normal (source-over) blend of straight-alpha pixels: `src` is layered on top of `dst`.
///
/// The destination keeps `dst.a * (1 - src.a)` of its coverage and colors are averaged by
/// coverage, so compositing a pixel over an identical opaque pixel reproduces it exactly.
#[inline]
pub fn normal_over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 {
        return src;
    }

    let sa = u32::from(src.a);
    let y = u32::from(mul_div255_u16(u16::from(dst.a), 255 - u16::from(src.a)));
    let total = y + sa;
    if total == 0 {
        return Rgba8::TRANSPARENT;
    }

    let mix = |d: u8, s: u8| -> u8 {
        let v = (u32::from(d) * y + u32::from(s) * sa + total / 2) / total;
        v.min(255) as u8
    };

    Rgba8 {
        r: mix(dst.r, src.r),
        g: mix(dst.g, src.g),
        b: mix(dst.b, src.b),
        a: total.min(255) as u8,
    }
}

/// Scale the alpha channel by `factor` in `[0, 1]`, truncating toward zero.
#[inline]
pub fn scale_alpha(px: Rgba8, factor: f64) -> Rgba8 {
    let factor = if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        1.0
    };
    px.with_alpha((f64::from(px.a) * factor) as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
