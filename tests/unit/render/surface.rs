use super::*;

fn gradient(w: u32, h: u32) -> Surface {
    let mut px = Vec::new();
    for y in 0..h {
        for x in 0..w {
            px.push(Rgba8::opaque((x * 10) as u8, (y * 10) as u8, 7));
        }
    }
    Surface::from_pixels(w, h, px).unwrap()
}

#[test]
fn from_pixels_checks_length() {
    assert!(Surface::from_pixels(2, 2, vec![Rgba8::TRANSPARENT; 3]).is_err());
    assert!(Surface::from_pixels(2, 2, vec![Rgba8::TRANSPARENT; 4]).is_ok());
}

#[test]
fn get_set_respect_bounds() {
    let mut s = Surface::new(3, 2).unwrap();
    s.set(2, 1, Rgba8::opaque(1, 2, 3)).unwrap();
    assert_eq!(s.get(2, 1), Some(Rgba8::opaque(1, 2, 3)));
    assert_eq!(s.get(3, 1), None);
    assert_eq!(s.get(0, 2), None);
    assert_eq!(s.get(-1, 0), None);
    assert!(s.set(0, 2, Rgba8::TRANSPARENT).is_err());
}

#[test]
fn copy_region_only_touches_rect() {
    let src = gradient(4, 4);
    let mut dst = Surface::new(4, 4).unwrap();
    let rect = PixelRect::new(1, 1, 3, 2).unwrap();
    dst.copy_region_from(&src, rect).unwrap();

    for y in 0..4 {
        for x in 0..4 {
            let expected = if rect.contains(x, y) {
                src.get(x, y).unwrap()
            } else {
                Rgba8::TRANSPARENT
            };
            assert_eq!(dst.get(x, y).unwrap(), expected, "({x}, {y})");
        }
    }

    let outside = PixelRect::new(2, 2, 5, 4).unwrap();
    assert!(dst.copy_region_from(&src, outside).is_err());
}

#[test]
fn nearest_truncates() {
    let s = gradient(4, 4);
    assert_eq!(s.sample_nearest(2.9, 1.99), s.get(2, 1).unwrap());
    assert_eq!(s.sample_nearest(4.0, 0.0), Rgba8::TRANSPARENT);
    assert_eq!(s.sample_nearest(-0.5, 0.0), Rgba8::TRANSPARENT);
}

#[test]
fn bilinear_is_exact_on_integer_coordinates() {
    let s = gradient(5, 3);
    for y in 0..3 {
        for x in 0..5 {
            assert_eq!(
                s.sample_bilinear(x as f32, y as f32),
                s.get(x, y).unwrap(),
                "({x}, {y})"
            );
        }
    }
}

#[test]
fn bilinear_interpolates_between_columns() {
    let s = gradient(4, 1);
    let mid = s.sample_bilinear(1.5, 0.0);
    assert_eq!(mid.r, 15);
    assert_eq!(mid.a, 255);

    // Last column clamps its right neighbor to itself.
    let edge = s.sample_bilinear(3.5, 0.0);
    assert_eq!(edge, s.get(3, 0).unwrap());
}

#[test]
fn bilinear_ignores_color_of_transparent_neighbors() {
    let s = Surface::from_pixels(
        2,
        1,
        vec![Rgba8::opaque(200, 0, 0), Rgba8::new(0, 255, 0, 0)],
    )
    .unwrap();
    let mid = s.sample_bilinear(0.5, 0.0);
    assert_eq!((mid.r, mid.g, mid.b), (200, 0, 0));
    assert!((i32::from(mid.a) - 128).abs() <= 1);
}

#[test]
fn bilinear_out_of_bounds_is_transparent() {
    let s = gradient(2, 2);
    assert_eq!(s.sample_bilinear(2.0, 0.0), Rgba8::TRANSPARENT);
    assert_eq!(s.sample_bilinear(0.0, -0.01), Rgba8::TRANSPARENT);
    assert_eq!(s.sample_bilinear(f32::NAN, 0.0), Rgba8::TRANSPARENT);
}

#[test]
fn split_rows_covers_surface_without_overlap() {
    let mut s = gradient(3, 7);
    let bands = s.split_rows_mut(3);
    let rects: Vec<_> = bands.iter().map(|b| b.rect()).collect();
    assert_eq!(
        rects,
        vec![
            PixelRect::new(0, 0, 3, 3).unwrap(),
            PixelRect::new(0, 3, 3, 6).unwrap(),
            PixelRect::new(0, 6, 3, 7).unwrap(),
        ]
    );
}

#[test]
fn band_rows_are_absolute() {
    let mut s = gradient(2, 4);
    {
        let mut bands = s.split_rows_mut(2);
        let second = &mut bands[1];
        assert!(second.row_mut(1).is_none());
        assert!(second.row_mut(4).is_none());
        let row = second.row_mut(3).unwrap();
        row[1] = Rgba8::opaque(1, 1, 1);
    }
    assert_eq!(s.get(1, 3), Some(Rgba8::opaque(1, 1, 1)));
}

#[test]
fn split_rows_zero_is_treated_as_one() {
    let mut s = gradient(2, 3);
    assert_eq!(s.split_rows_mut(0).len(), 3);
    let mut empty = Surface::new(0, 5).unwrap();
    assert!(empty.split_rows_mut(4).is_empty());
}
