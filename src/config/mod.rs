pub mod traits;
pub mod evolution;
pub mod network;
pub mod clustering;
pub mod data;
pub mod metrics;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use network::NetworkConfig;
pub use clustering::ClusteringConfig;
pub use data::DataConfig;
pub use metrics::MetricsConfig;
pub use traits::{ConfigSection, ConfigManifest, FieldKind, FieldManifest};
