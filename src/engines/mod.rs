pub mod clustering;
pub mod evolution;
pub mod metrics;
pub mod network;
