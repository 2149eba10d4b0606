use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{TrailError, TrailResult};
use crate::render::surface::Surface;

/// Convert a decoded straight-alpha RGBA image into a [`Surface`].
pub fn surface_from_rgba_image(img: &image::RgbaImage) -> TrailResult<Surface> {
    let pixels = img.pixels().map(|p| Rgba8::from_array(p.0)).collect();
    Surface::from_pixels(img.width(), img.height(), pixels)
}

/// Convert a [`Surface`] into an RGBA image.
pub fn surface_to_rgba_image(surface: &Surface) -> TrailResult<image::RgbaImage> {
    let raw: Vec<u8> = surface
        .pixels()
        .iter()
        .flat_map(|p| p.to_array())
        .collect();
    image::RgbaImage::from_raw(surface.width(), surface.height(), raw)
        .ok_or_else(|| TrailError::evaluation("surface byte length does not match its size"))
}

/// Decode a PNG file into a [`Surface`].
pub fn load_surface(path: &Path) -> TrailResult<Surface> {
    let file = std::fs::File::open(path)
        .map_err(|e| TrailError::io(format!("open '{}': {e}", path.display())))?;
    let img = image::load(std::io::BufReader::new(file), image::ImageFormat::Png)
        .map_err(|e| TrailError::io(format!("decode '{}': {e}", path.display())))?
        .to_rgba8();
    surface_from_rgba_image(&img)
}

/// Encode a [`Surface`] to `path` as PNG.
pub fn save_surface(surface: &Surface, path: &Path) -> TrailResult<()> {
    surface_to_rgba_image(surface)?
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| TrailError::io(format!("encode '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../tests/unit/io.rs"]
mod tests;
