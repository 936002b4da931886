mod mask;

pub use mask::{ExtractIndices, FillMask, Mask};
