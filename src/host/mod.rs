pub(crate) mod background;
pub(crate) mod resources;
pub(crate) mod view;
