// Infrastructure layer - Configuration and dataset input
pub mod config;
pub mod dataset_loader;
