mod component;
mod palette;
mod render;
mod state;

pub use component::ForceGraphCanvas;
pub use palette::{NodeStyle, Palette};
