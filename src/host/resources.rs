use std::collections::HashMap;

use crate::{
    foundation::{
        core::Rgba8,
        error::{TileError, TileResult},
    },
    render::bitmap::Bitmap,
    tile::drawable::{
        AnimationFrame, BitmapDrawable, ColorDrawable, Drawable, FrameAnimationDrawable,
    },
};

/// Colour given as a host resource id, or as a literal `0xAARRGGBB` when no such resource exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorRef(pub u32);

impl ColorRef {
    /// Reference a literal colour.
    pub const fn literal(color: Rgba8) -> Self {
        Self(color.to_argb_u32())
    }

    /// The raw value read as a literal colour.
    pub const fn as_literal(self) -> Rgba8 {
        Rgba8::from_argb_u32(self.0)
    }
}

/// Host-side lookup of colours and drawables by id.
pub trait ResourceResolver {
    /// Colour registered under `id`.
    fn resolve_color(&self, id: u32) -> TileResult<Rgba8>;

    /// Fresh drawable instance registered under `id`.
    fn resolve_drawable(&self, id: u32) -> TileResult<Box<dyn Drawable>>;
}

/// Resolver with nothing registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResources;

impl ResourceResolver for NoResources {
    fn resolve_color(&self, id: u32) -> TileResult<Rgba8> {
        Err(TileError::resource(format!("no colour resource {id:#x}")))
    }

    fn resolve_drawable(&self, id: u32) -> TileResult<Box<dyn Drawable>> {
        Err(TileError::resource(format!("no drawable resource {id:#x}")))
    }
}

/// Recipe for a drawable resource; each resolution builds a new instance.
#[derive(Clone, Debug)]
pub enum DrawableResource {
    /// Solid colour.
    Color(Rgba8),
    /// Unshaped bitmap.
    Bitmap(Bitmap),
    /// Frame animation over nested resources with per-frame durations in milliseconds.
    Frames {
        /// Frames in display order.
        frames: Vec<(DrawableResource, u64)>,
        /// Stop on the last frame instead of looping.
        one_shot: bool,
    },
}

impl DrawableResource {
    /// Build a new drawable from this recipe.
    pub fn instantiate(&self) -> Box<dyn Drawable> {
        match self {
            Self::Color(c) => Box::new(ColorDrawable::new(*c)),
            Self::Bitmap(b) => Box::new(BitmapDrawable::new(b.clone())),
            Self::Frames { frames, one_shot } => {
                let frames = frames
                    .iter()
                    .map(|(r, duration_ms)| AnimationFrame {
                        drawable: r.instantiate(),
                        duration_ms: *duration_ms,
                    })
                    .collect();
                Box::new(FrameAnimationDrawable::new(frames, *one_shot))
            }
        }
    }
}

/// In-memory resolver.
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    colors: HashMap<u32, Rgba8>,
    drawables: HashMap<u32, DrawableResource>,
}

impl ResourceTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a colour under `id`, replacing any previous one.
    pub fn insert_color(&mut self, id: u32, color: Rgba8) -> &mut Self {
        self.colors.insert(id, color);
        self
    }

    /// Register a drawable recipe under `id`, replacing any previous one.
    pub fn insert_drawable(&mut self, id: u32, resource: DrawableResource) -> &mut Self {
        self.drawables.insert(id, resource);
        self
    }
}

impl ResourceResolver for ResourceTable {
    fn resolve_color(&self, id: u32) -> TileResult<Rgba8> {
        self.colors
            .get(&id)
            .copied()
            .ok_or_else(|| TileError::resource(format!("no colour resource {id:#x}")))
    }

    fn resolve_drawable(&self, id: u32) -> TileResult<Box<dyn Drawable>> {
        self.drawables
            .get(&id)
            .map(DrawableResource::instantiate)
            .ok_or_else(|| TileError::resource(format!("no drawable resource {id:#x}")))
    }
}

/// Resolve `color` as a resource, falling back to its literal value when that fails.
pub fn resolve_color_or_literal(resolver: &dyn ResourceResolver, color: ColorRef) -> Rgba8 {
    match resolver.resolve_color(color.0) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(
                value = color.0,
                %err,
                "colour resource not found, using literal value"
            );
            color.as_literal()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/resources.rs"]
mod tests;
