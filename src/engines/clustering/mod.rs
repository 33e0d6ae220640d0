pub mod cluster;
pub mod initialisers;
pub mod kmeans;
pub mod outliers;
pub mod silhouette;

pub use cluster::Cluster;
pub use initialisers::{ForgyInitialisation, InitialiserKind, MeanInitialiser, PlusPlusInitialisation};
pub use kmeans::{Clustering, KMeansClustering};
pub use outliers::OutlierDetector;
pub use silhouette::silhouette_value;
