use rayon::prelude::*;

use crate::{
    foundation::error::{TrailError, TrailResult},
    render::cancel::CancelSignal,
    render::surface::Surface,
    trail::params::{TrailConfig, TrailGeometry, resolve},
    trail::render::{RenderOutcome, RenderReport, RenderStats, TrailRenderer},
};

#[derive(Clone, Debug)]
/// Threading and banding controls for whole-image rendering.
pub struct RenderThreading {
    /// Render bands concurrently when `true`.
    pub parallel: bool,
    /// Rows per band; `0` is treated as 1.
    pub band_rows: u32,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            band_rows: 64,
            threads: None,
        }
    }
}

/// Apply the trail effect to `src` and return the composited image.
///
/// The destination starts as a copy of `src`; the image is then cut into disjoint full-width
/// bands which are rendered in order, or concurrently on a dedicated rayon pool when
/// `threading.parallel` is set. On cancellation the partially written surface is still returned
/// together with [`RenderOutcome::Cancelled`].
#[tracing::instrument(skip(src, cancel), fields(width = src.width(), height = src.height()))]
pub fn apply_trail(
    cfg: &TrailConfig,
    src: &Surface,
    threading: &RenderThreading,
    cancel: &dyn CancelSignal,
) -> TrailResult<(Surface, RenderReport)> {
    cfg.validate()?;
    let geometry = resolve(cfg);
    let mut dst = src.clone();
    let report = render_bands(cfg, &geometry, src, &mut dst, threading, cancel)?;
    tracing::debug!(outcome = ?report.outcome, stats = ?report.stats, "trail applied");
    Ok((dst, report))
}

/// Render every band of a pre-seeded `dst`.
pub fn render_bands(
    cfg: &TrailConfig,
    geometry: &TrailGeometry,
    src: &Surface,
    dst: &mut Surface,
    threading: &RenderThreading,
    cancel: &dyn CancelSignal,
) -> TrailResult<RenderReport> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(TrailError::validation(
            "render_bands expects source and destination of equal size",
        ));
    }

    let renderer = TrailRenderer::new(cfg, geometry);
    let mut bands = dst.split_rows_mut(normalized_band_rows(threading.band_rows));

    if !threading.parallel {
        let mut stats = RenderStats::default();
        for band in bands.iter_mut() {
            let rect = band.rect();
            if renderer.render_region(src, band, rect, cancel, &mut stats)
                == RenderOutcome::Cancelled
            {
                return Ok(RenderReport {
                    outcome: RenderOutcome::Cancelled,
                    stats,
                });
            }
        }
        return Ok(RenderReport {
            outcome: RenderOutcome::Completed,
            stats,
        });
    }

    let pool = build_thread_pool(threading.threads)?;
    let per_band = pool.install(|| {
        bands
            .par_iter_mut()
            .map(|band| {
                let mut stats = RenderStats::default();
                let rect = band.rect();
                let outcome = renderer.render_region(src, band, rect, cancel, &mut stats);
                (outcome, stats)
            })
            .collect::<Vec<_>>()
    });

    let mut report = RenderReport {
        outcome: RenderOutcome::Completed,
        stats: RenderStats::default(),
    };
    for (outcome, stats) in &per_band {
        report.stats.merge(stats);
        if *outcome == RenderOutcome::Cancelled {
            report.outcome = RenderOutcome::Cancelled;
        }
    }
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> TrailResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TrailError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TrailError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_band_rows(band_rows: u32) -> u32 {
    band_rows.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
