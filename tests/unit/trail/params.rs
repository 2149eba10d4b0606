use super::*;

fn cfg(distance: u32, spacing: u32, direction_deg: f64) -> TrailConfig {
    TrailConfig::new(distance, spacing, direction_deg, true, true).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn defaults_match_control_defaults() {
    let d = TrailConfig::default();
    assert_eq!(d.distance, 25);
    assert_eq!(d.spacing, 1);
    assert_eq!(d.direction_deg, 0.0);
    assert!(d.fade);
    assert!(d.bilinear);
    assert!(d.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    assert!(TrailConfig::new(0, 1, 0.0, true, true).is_err());
    assert!(TrailConfig::new(501, 1, 0.0, true, true).is_err());
    assert!(TrailConfig::new(10, 0, 0.0, true, true).is_err());
    assert!(TrailConfig::new(10, 101, 0.0, true, true).is_err());
    assert!(TrailConfig::new(10, 1, -0.5, true, true).is_err());
    assert!(TrailConfig::new(10, 1, 360.5, true, true).is_err());
    assert!(TrailConfig::new(10, 1, f64::NAN, true, true).is_err());
    assert!(TrailConfig::new(500, 100, 360.0, false, false).is_ok());
}

#[test]
fn horizontal_direction() {
    let g = resolve(&cfg(25, 5, 0.0));
    assert!(close(g.step_x, 5.0));
    assert_eq!(g.step_y, 0.0);
    assert!(close(g.extent_x, 25.0));
    assert_eq!(g.extent_y, 0.0);
    assert_eq!((g.sign_x, g.sign_y), (1, 0));
    assert_eq!(g.step_count, 6);
}

#[test]
fn quadrant_signs() {
    // y grows downward, so "up" (90 degrees) travels toward negative y.
    let up = resolve(&cfg(10, 1, 90.0));
    assert_eq!(up.sign_y, -1);
    assert!(close(up.extent_y, 10.0));
    assert_eq!(up.extent_x, 0.0);
    assert_eq!(up.step_x, 0.0);
    assert_eq!(up.sign_x, 0);

    let left = resolve(&cfg(10, 1, 180.0));
    assert_eq!(left.sign_x, -1);
    assert_eq!((left.extent_y, left.sign_y), (0.0, 0));

    let down = resolve(&cfg(10, 1, 270.0));
    assert_eq!(down.sign_y, 1);

    let diag = resolve(&cfg(10, 2, 225.0));
    assert_eq!((diag.sign_x, diag.sign_y), (-1, 1));
    assert!(close(diag.step_x, diag.step_y));
    assert!(close(diag.extent_x, 10.0 * std::f64::consts::FRAC_1_SQRT_2));
}

#[test]
fn step_and_extent_are_non_negative() {
    for deg in [0.0, 37.0, 90.0, 135.0, 180.0, 222.5, 270.0, 315.0, 360.0] {
        let g = resolve(&cfg(40, 3, deg));
        assert!(g.step_x >= 0.0 && g.step_y >= 0.0, "{deg}");
        assert!(g.extent_x >= 0.0 && g.extent_y >= 0.0, "{deg}");
    }
}

#[test]
fn step_count_matches_per_axis_walk() {
    // Walk the per-axis bound for angles where the offsets are exactly representable.
    for (distance, spacing) in [(5u32, 5u32), (25, 1), (10, 3), (7, 8), (500, 100)] {
        let g = resolve(&cfg(distance, spacing, 0.0));
        let mut t = 0u32;
        while f64::from(t) * g.step_x <= g.extent_x {
            t += 1;
        }
        assert_eq!(g.step_count, t, "distance={distance} spacing={spacing}");
    }
}

#[test]
fn spacing_larger_than_distance_leaves_only_zero_step() {
    let g = resolve(&cfg(7, 8, 45.0));
    assert_eq!(g.step_count, 1);
}

#[test]
fn directed_offset_points_backward() {
    let right = resolve(&cfg(10, 2, 0.0));
    assert_eq!(right.directed_offset(0), (0.0, 0.0));
    assert_eq!(right.directed_offset(3), (-6.0, 0.0));

    let left = resolve(&cfg(10, 2, 180.0));
    let (dx, dy) = left.directed_offset(3);
    assert_eq!(dx, 6.0);
    assert!(dy.abs() < 1e-6);

    let up = resolve(&cfg(10, 2, 90.0));
    let (dx, dy) = up.directed_offset(2);
    assert!(dx.abs() < 1e-6);
    assert_eq!(dy, 4.0);
}

#[test]
fn fade_factor_is_linear_and_reaches_zero_at_distance() {
    let c = cfg(5, 1, 0.0);
    let g = resolve(&c);
    let factors: Vec<f64> = (0..=5).map(|t| fade_factor(&c, &g, t)).collect();
    assert!(close(factors[0], 1.0));
    assert!(close(factors[5], 0.0));
    for w in factors.windows(2) {
        assert!(w[0] > w[1]);
    }
    assert!(close(fade_factor(&c, &g, 2), 0.6));
}

#[test]
fn fade_factor_matches_horizontal_ratio() {
    let c = cfg(30, 4, 37.0);
    let g = resolve(&c);
    for t in 0..g.step_count {
        let (xoffset, _) = g.offsets(t);
        assert!(close(fade_factor(&c, &g, t), 1.0 - xoffset / g.extent_x));
    }
}

#[test]
fn vertical_directions_are_never_faded() {
    for deg in [90.0, 270.0] {
        let c = cfg(12, 3, deg);
        let g = resolve(&c);
        assert_eq!(g.extent_x, 0.0);
        for t in 0..g.step_count {
            assert_eq!(fade_factor(&c, &g, t), 1.0, "deg={deg} t={t}");
        }
    }
}

#[test]
fn config_serializes_for_diagnostics() {
    let json = serde_json::to_value(TrailConfig::default()).unwrap();
    assert_eq!(json["distance"], 25);
    assert_eq!(json["bilinear"], true);
}
