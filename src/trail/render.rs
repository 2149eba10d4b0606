use crate::effects::blend::{normal_over, scale_alpha};
use crate::foundation::core::PixelRect;
use crate::foundation::error::{TrailError, TrailResult};
use crate::render::cancel::CancelSignal;
use crate::render::surface::{PixelTarget, Surface};
use crate::trail::params::{TrailConfig, TrailGeometry, fade_factor};

/// Whether a render call ran to the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every region received every trail step.
    Completed,
    /// Cancellation was observed; the destination holds a partial result and should be
    /// discarded by the caller.
    Cancelled,
}

impl RenderOutcome {
    /// Return `true` for [`RenderOutcome::Completed`].
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// Counters accumulated while rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Regions whose processing started.
    pub regions: u64,
    /// Trail steps fully applied, summed over regions.
    pub steps: u64,
    /// Destination rows skipped because the shifted source row was out of bounds.
    pub rows_skipped: u64,
    /// Pixels skipped because the shifted source column was out of bounds.
    pub pixels_skipped: u64,
    /// Pixels that received a blended sample.
    pub pixels_blended: u64,
}

impl RenderStats {
    /// Add `other`'s counters into `self`.
    pub fn merge(&mut self, other: &RenderStats) {
        self.regions += other.regions;
        self.steps += other.steps;
        self.rows_skipped += other.rows_skipped;
        self.pixels_skipped += other.pixels_skipped;
        self.pixels_blended += other.pixels_blended;
    }
}

/// Result of a render call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Completion state.
    pub outcome: RenderOutcome,
    /// Work counters.
    pub stats: RenderStats,
}

/// Samples a source surface along the trail and composites the samples onto a destination.
///
/// Holds only borrowed, read-only state, so one renderer can be shared by concurrent workers
/// writing disjoint regions.
#[derive(Clone, Copy, Debug)]
pub struct TrailRenderer<'a> {
    cfg: &'a TrailConfig,
    geometry: &'a TrailGeometry,
}

impl<'a> TrailRenderer<'a> {
    /// Bind a configuration and its resolved geometry.
    pub fn new(cfg: &'a TrailConfig, geometry: &'a TrailGeometry) -> Self {
        Self { cfg, geometry }
    }

    /// Render one region of `dst`, which must already hold a copy of `src`.
    ///
    /// Steps run from the zero offset outward. Each sample is composited underneath the current
    /// destination pixel, so the original image stays on top of its own trail.
    /// Cancellation is polled once per step; on cancel the region is left as-is.
    /// Pixels of `rect` outside `dst.writable()` are never touched.
    pub fn render_region<T: PixelTarget + ?Sized>(
        &self,
        src: &Surface,
        dst: &mut T,
        rect: PixelRect,
        cancel: &dyn CancelSignal,
        stats: &mut RenderStats,
    ) -> RenderOutcome {
        stats.regions += 1;
        let Some(rect) = rect.intersect(dst.writable()) else {
            return RenderOutcome::Completed;
        };
        let bounds = src.bounds();

        for t in 0..self.geometry.step_count {
            if cancel.is_cancelled() {
                tracing::debug!(step = t, ?rect, "trail render cancelled");
                return RenderOutcome::Cancelled;
            }

            let (dx, dy) = self.geometry.directed_offset(t);
            let fade = self
                .cfg
                .fade
                .then(|| fade_factor(self.cfg, self.geometry, t))
                .filter(|&f| f < 1.0);

            for y in rect.top..rect.bottom {
                let sy = y as f32 + dy;
                if !bounds.contains_y_f32(sy) {
                    stats.rows_skipped += 1;
                    continue;
                }
                let Some(dst_row) = dst.row_mut(y) else {
                    stats.rows_skipped += 1;
                    continue;
                };

                for x in rect.left..rect.right {
                    let sx = x as f32 + dx;
                    if !bounds.contains_x_f32(sx) {
                        stats.pixels_skipped += 1;
                        continue;
                    }

                    let mut px = if self.cfg.bilinear {
                        src.sample_bilinear(sx, sy)
                    } else {
                        src.sample_nearest(sx, sy)
                    };
                    if let Some(f) = fade {
                        px = scale_alpha(px, f);
                    }

                    // The trail goes behind what is already there.
                    let d = &mut dst_row[x as usize];
                    *d = normal_over(px, *d);
                    stats.pixels_blended += 1;
                }
            }
            stats.steps += 1;
        }
        RenderOutcome::Completed
    }
}

/// Render the trail over caller-supplied regions of a pre-seeded destination.
///
/// `dst` must already contain a copy of `src` (at least over `regions`); regions must lie inside
/// the destination and be pairwise disjoint. Regions are processed in order and the call stops at
/// the first observed cancellation.
#[tracing::instrument(skip(src, dst, regions, cancel), fields(regions = regions.len()))]
pub fn render_regions(
    cfg: &TrailConfig,
    geometry: &TrailGeometry,
    src: &Surface,
    dst: &mut Surface,
    regions: &[PixelRect],
    cancel: &dyn CancelSignal,
) -> TrailResult<RenderReport> {
    cfg.validate()?;
    validate_regions(src, dst, regions)?;

    let renderer = TrailRenderer::new(cfg, geometry);
    let mut stats = RenderStats::default();
    for &rect in regions {
        if renderer.render_region(src, dst, rect, cancel, &mut stats) == RenderOutcome::Cancelled {
            return Ok(RenderReport {
                outcome: RenderOutcome::Cancelled,
                stats,
            });
        }
    }

    tracing::debug!(?stats, "trail regions rendered");
    Ok(RenderReport {
        outcome: RenderOutcome::Completed,
        stats,
    })
}

/// Check the region partitioning contract relied on by lock-free rendering.
pub fn validate_regions(src: &Surface, dst: &Surface, regions: &[PixelRect]) -> TrailResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(TrailError::validation(format!(
            "source {}x{} and destination {}x{} sizes differ",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }

    let bounds = dst.bounds();
    for (i, r) in regions.iter().enumerate() {
        if r.left > r.right || r.top > r.bottom {
            return Err(TrailError::validation(format!(
                "region {i} has inverted edges: {r:?}"
            )));
        }
        if !bounds.contains_rect(*r) {
            return Err(TrailError::validation(format!(
                "region {i} {r:?} exceeds destination bounds {bounds:?}"
            )));
        }
        if let Some(j) = regions[..i].iter().position(|o| o.intersects(*r)) {
            return Err(TrailError::validation(format!(
                "regions {j} and {i} overlap"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/trail/render.rs"]
mod tests;
