pub(crate) mod drawable;
pub(crate) mod media_tile;
