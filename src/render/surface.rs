use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::{TrailError, TrailResult};

/// Row-major grid of straight-alpha RGBA8 pixels with bounds `[0, width) x [0, height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

/// Destination rows a renderer is allowed to write.
///
/// Rows are always full-width and indexed by absolute `x`; [`PixelTarget::writable`] reports the
/// rectangle covered by this target, which may be a horizontal band of a larger surface.
pub trait PixelTarget {
    /// Rectangle whose pixels are reachable through [`PixelTarget::row_mut`].
    fn writable(&self) -> PixelRect;

    /// Mutable access to absolute row `y`, or `None` outside [`PixelTarget::writable`].
    fn row_mut(&mut self, y: i32) -> Option<&mut [Rgba8]>;
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> TrailResult<Self> {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// Surface where every pixel is `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> TrailResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![px; len],
        })
    }

    /// Wrap existing row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> TrailResult<Self> {
        let len = checked_len(width, height)?;
        if pixels.len() != len {
            return Err(TrailError::validation(format!(
                "surface expects {len} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Valid coordinates of this surface.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite pixel `(x, y)`. Out-of-bounds writes are rejected.
    pub fn set(&mut self, x: i32, y: i32, px: Rgba8) -> TrailResult<()> {
        let i = self.index(x, y).ok_or_else(|| {
            TrailError::validation(format!(
                "pixel ({x}, {y}) outside {}x{} surface",
                self.width, self.height
            ))
        })?;
        self.pixels[i] = px;
        Ok(())
    }

    /// Row `y`, or `None` outside bounds.
    pub fn row(&self, y: i32) -> Option<&[Rgba8]> {
        let y = usize::try_from(y).ok()?;
        if y >= self.height as usize {
            return None;
        }
        let w = self.width as usize;
        Some(&self.pixels[y * w..(y + 1) * w])
    }

    /// Copy `rect` from `src` into the same coordinates of `self`.
    pub fn copy_region_from(&mut self, src: &Surface, rect: PixelRect) -> TrailResult<()> {
        if !self.bounds().contains_rect(rect) || !src.bounds().contains_rect(rect) {
            return Err(TrailError::validation(format!(
                "copy region {rect:?} exceeds surface bounds"
            )));
        }
        if rect.is_empty() {
            return Ok(());
        }
        let (l, r) = (rect.left as usize, rect.right as usize);
        for y in rect.top..rect.bottom {
            let from = src.row(y).ok_or_else(|| {
                TrailError::evaluation("internal error: source row missing during copy")
            })?;
            let to = self.row_mut(y).ok_or_else(|| {
                TrailError::evaluation("internal error: destination row missing during copy")
            })?;
            to[l..r].copy_from_slice(&from[l..r]);
        }
        Ok(())
    }

    /// Nearest-pixel lookup: both coordinates are truncated toward zero.
    ///
    /// Out-of-bounds or non-finite coordinates yield transparent black.
    #[inline]
    pub fn sample_nearest(&self, x: f32, y: f32) -> Rgba8 {
        if !self.bounds().contains_f32(x, y) {
            return Rgba8::TRANSPARENT;
        }
        self.get(x as i32, y as i32).unwrap_or(Rgba8::TRANSPARENT)
    }

    /// Bilinear sample at a fractional coordinate.
    ///
    /// Pixel centers sit on integer coordinates, so integer inputs reproduce the stored pixel.
    /// Weights use 8 fractional bits; the right/bottom neighbors are clamped to the last
    /// column/row. Color is interpolated weighted by alpha so transparent neighbors do not bleed
    /// their color. Out-of-bounds or non-finite coordinates yield transparent black.
    pub fn sample_bilinear(&self, x: f32, y: f32) -> Rgba8 {
        if !self.bounds().contains_f32(x, y) {
            return Rgba8::TRANSPARENT;
        }

        let fx = x.floor();
        let fy = y.floor();
        let x0 = fx as usize;
        let y0 = fy as usize;
        let x1 = (x0 + 1).min(self.width as usize - 1);
        let y1 = (y0 + 1).min(self.height as usize - 1);
        let u = (((x - fx) * 256.0) as u64).min(255);
        let v = (((y - fy) * 256.0) as u64).min(255);

        let w = self.width as usize;
        let taps = [
            (self.pixels[y0 * w + x0], (256 - u) * (256 - v)),
            (self.pixels[y0 * w + x1], u * (256 - v)),
            (self.pixels[y1 * w + x0], (256 - u) * v),
            (self.pixels[y1 * w + x1], u * v),
        ];

        let mut acc_a = 0u64;
        let mut acc = [0u64; 3];
        for (px, weight) in taps {
            let aw = u64::from(px.a) * weight;
            acc_a += aw;
            acc[0] += u64::from(px.r) * aw;
            acc[1] += u64::from(px.g) * aw;
            acc[2] += u64::from(px.b) * aw;
        }
        if acc_a == 0 {
            return Rgba8::TRANSPARENT;
        }

        let half = acc_a / 2;
        Rgba8 {
            r: ((acc[0] + half) / acc_a).min(255) as u8,
            g: ((acc[1] + half) / acc_a).min(255) as u8,
            b: ((acc[2] + half) / acc_a).min(255) as u8,
            a: ((acc_a + 32768) >> 16).min(255) as u8,
        }
    }

    /// Split into disjoint full-width bands of at most `band_rows` rows, top to bottom.
    ///
    /// Each band can be handed to a different worker; `band_rows == 0` is treated as 1.
    pub fn split_rows_mut(&mut self, band_rows: u32) -> Vec<RowBandMut<'_>> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }
        let band_rows = band_rows.max(1);
        let width = self.width;
        let chunk = width as usize * band_rows as usize;
        self.pixels
            .chunks_mut(chunk)
            .enumerate()
            .map(|(i, pixels)| RowBandMut {
                width,
                top: (i as u64 * u64::from(band_rows)) as i32,
                pixels,
            })
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl PixelTarget for Surface {
    fn writable(&self) -> PixelRect {
        self.bounds()
    }

    fn row_mut(&mut self, y: i32) -> Option<&mut [Rgba8]> {
        let y = usize::try_from(y).ok()?;
        if y >= self.height as usize {
            return None;
        }
        let w = self.width as usize;
        Some(&mut self.pixels[y * w..(y + 1) * w])
    }
}

/// Mutable horizontal band of a [`Surface`], produced by [`Surface::split_rows_mut`].
#[derive(Debug)]
pub struct RowBandMut<'a> {
    width: u32,
    top: i32,
    pixels: &'a mut [Rgba8],
}

impl RowBandMut<'_> {
    /// Rows covered by this band, in surface coordinates.
    pub fn rect(&self) -> PixelRect {
        let rows = self.pixels.len() / self.width.max(1) as usize;
        PixelRect {
            left: 0,
            top: self.top,
            right: self.width as i32,
            bottom: self.top + rows as i32,
        }
    }
}

impl PixelTarget for RowBandMut<'_> {
    fn writable(&self) -> PixelRect {
        self.rect()
    }

    fn row_mut(&mut self, y: i32) -> Option<&mut [Rgba8]> {
        if !self.rect().contains(0, y) {
            return None;
        }
        let w = self.width as usize;
        let local = (y - self.top) as usize;
        Some(&mut self.pixels[local * w..(local + 1) * w])
    }
}

fn checked_len(width: u32, height: u32) -> TrailResult<usize> {
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(TrailError::validation(format!(
            "surface dimensions {width}x{height} exceed i32 coordinate range"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| TrailError::validation("surface size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
