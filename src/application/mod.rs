pub mod use_cases;

pub use use_cases::dataset_exporter::DatasetExporter;
pub use use_cases::duplicate_detector::detect;
pub use use_cases::tabular_browser::{BrowserViewState, PageView, TabularBrowser};
