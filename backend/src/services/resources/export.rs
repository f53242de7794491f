//! # Table Export Service
//!
//! Backs the "Export" buttons of the classroom, application-status and
//! parent-details tables (`GET /api/{kind}/export`).
//!
//! The query string carries the table's current search term and filters, so
//! the file contains exactly the rows the administrator sees, across all
//! pages. `format=csv` is written with the `csv` crate, `format=xlsx` with
//! `rust_xlsxwriter`; either way the response is an attachment named after
//! the sheet and today's date.

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Local;
use common::export::{file_name, to_table, ExportRecord};
use common::model::ParentProfile;
use common::portal::{
    application_pipeline, classroom_pipeline, parent_pipeline, ApplicationRow, ClassroomRow,
    Portal,
};
use common::requests::{ExportFormat, ExportQuery};
use common::query::resolve_classroom;
use common::table::{FilterCriteria, FilterPipeline};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::services::error::ApiError;
use crate::state::PortalState;

/// A table that can be downloaded.
pub trait ExportTable: ExportRecord + Sized + 'static {
    fn rows(portal: &Portal) -> Vec<Self>;

    fn pipeline() -> FilterPipeline<Self>;
}

impl ExportTable for ClassroomRow {
    fn rows(portal: &Portal) -> Vec<Self> {
        portal.classroom_rows()
    }

    fn pipeline() -> FilterPipeline<Self> {
        classroom_pipeline()
    }
}

impl ExportTable for ApplicationRow {
    fn rows(portal: &Portal) -> Vec<Self> {
        portal.application_rows()
    }

    fn pipeline() -> FilterPipeline<Self> {
        application_pipeline()
    }
}

impl ExportTable for ParentProfile {
    fn rows(portal: &Portal) -> Vec<Self> {
        portal.parents().list().to_vec()
    }

    fn pipeline() -> FilterPipeline<Self> {
        parent_pipeline()
    }
}

/// Filters of `query` with the classroom, given by id or name, resolved to
/// its id. An unknown classroom keeps its raw value and matches nothing.
fn criteria_for(query: &ExportQuery, portal: &Portal) -> FilterCriteria {
    let mut criteria = query.criteria();
    if let Some(value) = criteria.selector("classroom").map(str::to_string) {
        if let Some(id) = resolve_classroom(&value, portal.classrooms()) {
            criteria.set_selector("classroom", &id.to_string());
        }
    }
    criteria
}

/// Actix handler for `GET /api/{kind}/export`.
pub async fn process<T: ExportTable>(
    state: web::Data<PortalState>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, ApiError> {
    let table = {
        let portal = state.portal.read().await;
        let criteria = criteria_for(&query, &portal);
        let rows = T::rows(&portal);
        let selected = T::pipeline().apply(&rows, &criteria);
        to_table(&selected)
    };

    let body = match query.format {
        ExportFormat::Csv => write_csv(&table)?,
        ExportFormat::Xlsx => write_xlsx(T::SHEET, &table)?,
    };
    let name = file_name::<T>(query.format, Local::now().date_naive());
    info!("exporting {} rows as {}", table.len().saturating_sub(1), name);

    Ok(HttpResponse::Ok()
        .content_type(query.format.content_type())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", name),
        ))
        .body(body))
}

fn write_csv(table: &[Vec<String>]) -> Result<Vec<u8>, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in table {
        writer.write_record(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| ApiError::Export(e.to_string()))
}

/// One worksheet, bold header row. Whole numbers are written as numbers so
/// counts can be summed in the spreadsheet.
fn write_xlsx(sheet: &str, table: &[Vec<String>]) -> Result<Vec<u8>, ApiError> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet)?;
    let bold = Format::new().set_bold();

    for (row, record) in table.iter().enumerate() {
        let row = row as u32;
        for (col, value) in record.iter().enumerate() {
            let col = col as u16;
            if row == 0 {
                worksheet.write_string_with_format(row, col, value, &bold)?;
            } else if let Ok(number) = value.parse::<u64>() {
                worksheet.write_number(row, col, number as f64)?;
            } else {
                worksheet.write_string(row, col, value)?;
            }
        }
    }

    workbook.push_worksheet(worksheet);
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_embedded_commas() {
        let table = vec![
            vec!["Parent Name".to_string(), "Status".to_string()],
            vec!["Brown, Mike".to_string(), "Archive".to_string()],
        ];
        let bytes = write_csv(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Parent Name,Status\n\"Brown, Mike\",Archive\n"
        );
    }

    #[test]
    fn classroom_filter_accepts_names_and_ids() {
        let portal = common::portal::seed::demo_portal().unwrap();
        let by_name = ExportQuery {
            classroom: "purple".into(),
            ..ExportQuery::default()
        };
        assert_eq!(criteria_for(&by_name, &portal).selector("classroom"), Some("2"));
        let by_id = ExportQuery {
            classroom: "2".into(),
            ..ExportQuery::default()
        };
        let rows = portal.application_rows();
        let selected = application_pipeline().apply(&rows, &criteria_for(&by_id, &portal));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].child_name, "Liam Smith");
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let table = vec![
            vec!["Classroom Name".to_string(), "Student Count".to_string()],
            vec!["Butterfly".to_string(), "15".to_string()],
        ];
        let bytes = write_xlsx("Classrooms", &table).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
