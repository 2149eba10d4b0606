//! trailfx is a directional "trail" (motion-smear) compositing filter for RGBA8 images.
//!
//! The source image is resampled at a sequence of offsets along a chosen direction and every
//! sample is alpha-blended over a destination that starts as a copy of the source, optionally
//! fading samples to transparent toward the far end of the trail.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`TrailConfig`] `->` [`TrailGeometry`] (per-axis step, extent and sign)
//! 2. **Seed**: the destination is a copy of the source
//! 3. **Render**: for each region and each trail step, sample + blend ([`render_regions`], or
//!    [`apply_trail`] which seeds, bands and optionally parallelizes the whole image)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No locking**: concurrent workers write disjoint row bands; the source is shared read-only.
//! - **Cooperative cancellation**: polled once per trail step through [`CancelSignal`].
//! - **Straight-alpha RGBA8** end-to-end.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod effects;
mod foundation;
mod render;
mod trail;

/// Conversions between [`Surface`] and the `image` crate, plus file helpers.
pub mod io;

pub use effects::blend::{normal_over, scale_alpha};
pub use foundation::core::{PixelRect, Rgba8};
pub use foundation::error::{TrailError, TrailResult};
pub use render::cancel::{CancelSignal, CancelToken, NeverCancel};
pub use render::pipeline::{RenderThreading, apply_trail, render_bands};
pub use render::surface::{PixelTarget, RowBandMut, Surface};
pub use trail::params::{
    DIRECTION_RANGE, DISTANCE_RANGE, SPACING_RANGE, TrailConfig, TrailGeometry, fade_factor,
    resolve,
};
pub use trail::render::{
    RenderOutcome, RenderReport, RenderStats, TrailRenderer, render_regions, validate_regions,
};
