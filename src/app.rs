//! CLI glue: parse, de-duplicate, export, and optionally talk to the
//! remote endpoints. All real work lives in the library modules.

use crate::application::use_cases::dataset_exporter::{export_file_name, DatasetExporter};
use crate::application::use_cases::duplicate_detector::detect;
use crate::application::use_cases::tabular_browser::TabularBrowser;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http::data_fetch::{DataFetchClient, HttpDataFetchClient};
use crate::infrastructure::http::upload::{RemoteUploadCoordinator, UploadFile};
use crate::infrastructure::spreadsheet::{has_supported_extension, parse};
use std::path::PathBuf;
use tracing::{info, warn};

pub async fn run() -> Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let mut file_path: Option<PathBuf> = None;
    let mut do_upload = false;
    let mut do_fetch = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--upload" => do_upload = true,
            "--fetch" => do_fetch = true,
            other => file_path = Some(PathBuf::from(other)),
        }
    }

    if file_path.is_none() && !do_fetch {
        return Err(AppError::Validation(
            "usage: sheetsift <file.xlsx> [--upload] [--fetch]".to_string(),
        ));
    }

    let config = AppConfig::load()?;
    let session = config.session();

    if let Some(path) = file_path {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !has_supported_extension(&file_name) {
            return Err(AppError::Validation(
                "please select an .xlsx or .xls file".to_string(),
            ));
        }

        let bytes = std::fs::read(&path)?;
        let document = parse(&bytes)?;
        let duplicates = detect(&document.rows);
        info!(
            rows = document.row_count(),
            duplicate_rows = duplicates.len(),
            "parsed spreadsheet"
        );

        if !duplicates.is_empty() {
            let mut row_numbers: Vec<usize> = duplicates.iter().map(|i| i + 1).collect();
            row_numbers.sort_unstable();
            info!(?row_numbers, "duplicate rows (1-based)");
        }

        let export = DatasetExporter::new().export(&document.rows, &document.headers, &duplicates);
        let out_path = path.with_file_name(export_file_name(&file_name));
        std::fs::write(&out_path, export)?;
        info!(path = %out_path.display(), "wrote cleaned export");

        if do_upload {
            let coordinator = RemoteUploadCoordinator::new(
                config.upload_url.clone(),
                session.clone(),
                config.upload_timeout(),
            );
            let outcome = coordinator
                .upload(
                    UploadFile {
                        name: file_name,
                        bytes,
                    },
                    None,
                )
                .await?;
            match outcome.resolved_url {
                Some(url) => info!(url = %url, "processed file ready"),
                None => warn!(body = %outcome.body, "upload succeeded but returned no file URL"),
            }
        }
    }

    if do_fetch {
        let client = HttpDataFetchClient::new(config.data_url.clone(), session);
        let browser = TabularBrowser::new(client.fetch_records().await?);
        let view = browser.current_view();
        info!(
            records = view.filtered_count,
            pages = view.total_pages,
            "fetched record set"
        );

        println!("{}", view.columns.join("\t"));
        for row in &view.rows {
            let line: Vec<String> = row
                .iter()
                .map(|value| crate::domain::record::value_text(value).unwrap_or_default())
                .collect();
            println!("{}", line.join("\t"));
        }
    }

    Ok(())
}
