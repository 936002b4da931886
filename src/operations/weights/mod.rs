mod accumulate;
mod area_weights;
mod from_areas;
mod projected;

pub use accumulate::{AccumulationParams, VertexWeights};
pub use area_weights::AreaWeights;
pub use from_areas::AreaWeightsFromAreas;
pub use projected::ProjectedAreaWeights;
