pub mod error;
pub mod math;
pub mod mesh;
pub mod operations;

pub use error::{MeshkernError, Result};
pub use mesh::{TriMesh, Triangulation};
