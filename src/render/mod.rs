pub(crate) mod bitmap;
pub(crate) mod debug;
pub(crate) mod recording;
pub(crate) mod shape;
pub(crate) mod surface;
