use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::math::sign_f64;

/// Accepted range for [`TrailConfig::distance`].
pub const DISTANCE_RANGE: (u32, u32) = (1, 500);
/// Accepted range for [`TrailConfig::spacing`].
pub const SPACING_RANGE: (u32, u32) = (1, 100);
/// Accepted range for [`TrailConfig::direction_deg`].
pub const DIRECTION_RANGE: (f64, f64) = (0.0, 360.0);

// cos/sin of 90, 180 and 270 degrees come out around 1e-16 instead of 0.
const AXIS_EPSILON: f64 = 1e-12;

/// User-facing trail settings, immutable for the duration of a render pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrailConfig {
    /// Total trail length in pixels.
    pub distance: u32,
    /// Pixels between consecutive trail samples.
    pub spacing: u32,
    /// Direction of travel in degrees, counter-clockwise with y pointing down on screen.
    pub direction_deg: f64,
    /// Fade samples linearly to transparent at the far end of the trail.
    pub fade: bool,
    /// Use bilinear sampling instead of nearest-pixel lookup.
    pub bilinear: bool,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            distance: 25,
            spacing: 1,
            direction_deg: 0.0,
            fade: true,
            bilinear: true,
        }
    }
}

impl TrailConfig {
    /// Create a validated configuration.
    pub fn new(
        distance: u32,
        spacing: u32,
        direction_deg: f64,
        fade: bool,
        bilinear: bool,
    ) -> TrailResult<Self> {
        let cfg = Self {
            distance,
            spacing,
            direction_deg,
            fade,
            bilinear,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every setting against its accepted range.
    pub fn validate(&self) -> TrailResult<()> {
        let (dmin, dmax) = DISTANCE_RANGE;
        if !(dmin..=dmax).contains(&self.distance) {
            return Err(TrailError::validation(format!(
                "distance must be in [{dmin}, {dmax}], got {}",
                self.distance
            )));
        }
        let (smin, smax) = SPACING_RANGE;
        if !(smin..=smax).contains(&self.spacing) {
            return Err(TrailError::validation(format!(
                "spacing must be in [{smin}, {smax}], got {}",
                self.spacing
            )));
        }
        let (amin, amax) = DIRECTION_RANGE;
        if !self.direction_deg.is_finite() || !(amin..=amax).contains(&self.direction_deg) {
            return Err(TrailError::validation(format!(
                "direction must be a finite angle in [{amin}, {amax}] degrees, got {}",
                self.direction_deg
            )));
        }
        Ok(())
    }

    /// Direction in radians.
    pub fn direction_rad(&self) -> f64 {
        self.direction_deg.to_radians()
    }
}

/// Per-axis decomposition of a [`TrailConfig`], consumed read-only by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrailGeometry {
    /// `spacing * |cos(angle)|`.
    pub step_x: f64,
    /// `spacing * |sin(angle)|`.
    pub step_y: f64,
    /// `distance * |cos(angle)|`.
    pub extent_x: f64,
    /// `distance * |sin(angle)|`.
    pub extent_y: f64,
    /// `sign(cos(angle))`, with `sign(0) == 0`.
    pub sign_x: i8,
    /// `-sign(sin(angle))`, with `sign(0) == 0`.
    pub sign_y: i8,
    /// Number of trail steps, including the zero-offset step.
    pub step_count: u32,
}

/// Resolve the directional geometry for `cfg`.
///
/// Pure and infallible for any validated configuration.
pub fn resolve(cfg: &TrailConfig) -> TrailGeometry {
    let angle = cfg.direction_rad();
    let (sin, cos) = angle.sin_cos();
    let (sin, cos) = (snap_to_axis(sin), snap_to_axis(cos));
    let spacing = f64::from(cfg.spacing);
    let distance = f64::from(cfg.distance);

    let geometry = TrailGeometry {
        step_x: spacing * cos.abs(),
        step_y: spacing * sin.abs(),
        extent_x: distance * cos.abs(),
        extent_y: distance * sin.abs(),
        sign_x: sign_f64(cos),
        sign_y: -sign_f64(sin),
        step_count: cfg.distance / cfg.spacing.max(1) + 1,
    };
    tracing::debug!(?geometry, "resolved trail geometry");
    geometry
}

fn snap_to_axis(v: f64) -> f64 {
    if v.abs() < AXIS_EPSILON {
        0.0
    } else {
        v
    }
}

impl TrailGeometry {
    /// Per-axis offsets travelled after `t` steps.
    #[inline]
    pub fn offsets(&self, t: u32) -> (f64, f64) {
        let t = f64::from(t);
        (t * self.step_x, t * self.step_y)
    }

    /// Signed sampling offset for step `t`.
    ///
    /// Negated because each destination pixel looks backward along the trail for the color that
    /// reaches it.
    #[inline]
    pub fn directed_offset(&self, t: u32) -> (f32, f32) {
        let (xoffset, yoffset) = self.offsets(t);
        (
            -(xoffset as f32) * f32::from(self.sign_x),
            -(yoffset as f32) * f32::from(self.sign_y),
        )
    }
}

/// Alpha multiplier applied to step `t` when fading: `1 - travelled / distance`.
///
/// Equal to `1 - xoffset / extent_x`. A purely vertical trail has `extent_x == 0` and is not
/// faded at all, so the multiplier is 1 for every step.
#[inline]
pub fn fade_factor(cfg: &TrailConfig, geometry: &TrailGeometry, t: u32) -> f64 {
    if geometry.extent_x <= 0.0 {
        return 1.0;
    }
    let travelled = f64::from(t) * f64::from(cfg.spacing);
    (1.0 - travelled / f64::from(cfg.distance.max(1))).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/trail/params.rs"]
mod tests;
