pub mod palette;
pub mod render;
