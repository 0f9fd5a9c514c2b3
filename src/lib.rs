//! Media tiles: a decoded bitmap drawn as a circle or rounded rectangle, inset by an optional
//! border, cross-fading in over a placeholder, with an optional provenance indicator.
//!
//! # Frame loop
//!
//! 1. **Bind**: [`MediaTile::bind`] (or [`set_bitmap`] on a [`HostView`]) takes the bitmap, its
//!    [`Provenance`] and [`TileOptions`], and decides whether to fade.
//! 2. **Layout**: [`MediaTile::on_bounds_changed`] invalidates the cached [`ClipGeometry`].
//! 3. **Draw**: [`MediaTile::draw`] renders into any [`Surface`] and returns whether another frame
//!    is needed. The host keeps drawing while it returns `true`; nothing is scheduled internally.
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single render thread**: no locking, no timers, no background work.
//! - **No IO in the core**: bitmaps arrive decoded; resources resolve through a
//!   [`ResourceResolver`] the host supplies.
//! - **Premultiplied RGBA8** end-to-end: [`CpuSurface`] outputs premultiplied pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod foundation;
mod geometry;
mod host;
mod render;
mod tile;

pub use animation::fade::{FADE_DURATION_MS, FadeAnimator, FadeControl, FadeSample, FadeState};
pub use config::TileSettings;
pub use foundation::core::{
    BezPath, FrameTime, IntRect, MonotonicClock, Point, Provenance, Rect, Rgba8,
};
pub use foundation::error::{TileError, TileResult};
pub use geometry::shape::{
    ClipGeometry, ClipShape, CornerRadius, GeometryCache, ShapeMode, compute_clip,
    compute_radius, content_rect,
};
pub use host::background::{BackgroundShape, BorderBackground, InteractionState};
pub use host::resources::{
    ColorRef, DrawableResource, NoResources, ResourceResolver, ResourceTable,
    resolve_color_or_literal,
};
pub use host::view::{BindRequest, HostView, PlaceholderSource, set_bitmap, set_placeholder};
pub use render::bitmap::{Bitmap, BitmapId, BitmapShader, ColorFilter, ColorMatrix, TilePaint};
pub use render::debug::{DebugOverlayRenderer, DebugPalette};
pub use render::recording::{DrawCall, RecordedBrush, RecordingSurface};
pub use render::shape::{FadePhase, ShapeRenderer};
pub use render::surface::{Brush, CpuSurface, FrameRGBA, Surface};
pub use tile::drawable::{
    Animatable, AnimationFrame, BitmapDrawable, ColorDrawable, Drawable, FrameAnimationDrawable,
};
pub use tile::media_tile::{Border, MediaTile, TileOptions};
