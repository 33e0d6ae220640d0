pub mod distance;
pub mod k_nearest;
pub mod stats;

pub use distance::euclidean;
pub use k_nearest::Neighbour;
pub use stats::{mean, scale_feature, std_dev, variance};
