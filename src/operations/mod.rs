pub mod grid;
pub mod projection;
pub mod stencil;
pub mod weights;
