mod export;
mod summary;
pub mod views;

pub use export::{
    export_filename, to_csv_string, write_csv, ExportError, CSV_HEADER, OVERALL_ROW_LABEL,
    UNANSWERED_TOKEN,
};
pub use summary::{dashboard, result_rows};
