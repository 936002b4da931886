mod neighbor_cloud;

pub use neighbor_cloud::{
    build_neighbor_clouds, BuildNeighborClouds, CloudOverflow, NeighborClouds, CLOUD_PADDING,
};
