use thiserror::Error;

/// Top-level error type for the meshkern kernel.
#[derive(Debug, Error)]
pub enum MeshkernError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// An index refers to a vertex or cell that does not exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("vertex {index} is out of range for a mesh with {vertex_count} vertices")]
    VertexQuery { index: u32, vertex_count: usize },

    #[error("index {index} at position {position} is outside a grid of {cells} cells")]
    CellOutOfRange {
        position: usize,
        index: u32,
        cells: usize,
    },
}

/// Array lengths or dimensions are mutually inconsistent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{what}: expected length {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("flat triangle buffer of length {len} is not a multiple of three")]
    NotTripleWide { len: usize },

    #[error("triangle {triangle} repeats vertex {index}")]
    RepeatedVertex { triangle: usize, index: u32 },

    #[error("{vertex_count} vertices exceed the 32-bit index range")]
    TooManyVertices { vertex_count: usize },

    #[error("grid of {rows} x {cols} cells exceeds the 32-bit index range")]
    GridTooLarge { rows: usize, cols: usize },
}

/// A neighbor cloud does not fit the configured row width.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapacityError {
    #[error("vertex {vertex} needs {required} neighbor slots, capacity is {capacity}")]
    Exceeded {
        vertex: u32,
        required: usize,
        capacity: usize,
    },

    #[error("neighbor cloud capacity must be positive")]
    Zero,

    #[error("stencil width {nnz} squared overflows the row capacity")]
    WidthOverflow { nnz: usize },

    #[error("{rows} rows of {capacity} slots exceed the addressable arena size")]
    ArenaTooLarge { rows: usize, capacity: usize },
}

/// Input lies outside the domain of a numerical routine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("point {point} is antipodal to the projection centre")]
    Antipodal { point: usize },

    #[error("point {point} lies outside the projection disk (rho = {rho})")]
    OutsideProjection { point: usize, rho: f64 },

    #[error("{parameter} = {value} must be finite and positive")]
    InvalidRadius { parameter: &'static str, value: f64 },

    #[error("triangle {triangle} has non-finite area {value}")]
    NonFiniteArea { triangle: usize, value: f64 },
}

/// Convenience type alias for results using [`MeshkernError`].
pub type Result<T> = std::result::Result<T, MeshkernError>;
