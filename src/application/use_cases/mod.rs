pub mod dataset_exporter;
pub mod duplicate_detector;
pub mod tabular_browser;
