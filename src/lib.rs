pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use crate::application::use_cases::dataset_exporter::{export_file_name, DatasetExporter};
pub use crate::application::use_cases::duplicate_detector::detect;
pub use crate::application::use_cases::tabular_browser::{
    BrowserViewState, PageView, TabularBrowser,
};
pub use crate::domain::error::{AppError, Result};
pub use crate::domain::record::{Record, RecordSet};
pub use crate::domain::session::SessionContext;
pub use crate::domain::table::{
    CellValue, DuplicateIndexSet, Row, RowSignature, SpreadsheetDocument,
};
pub use crate::infrastructure::config::AppConfig;
pub use crate::infrastructure::http::data_fetch::{DataFetchClient, HttpDataFetchClient};
pub use crate::infrastructure::http::upload::{
    resolve_file_url, RemoteUploadCoordinator, UploadFile, UploadOutcome,
};
pub use crate::infrastructure::spreadsheet::{has_supported_extension, parse};
