//! Tabular export of the admin tables (CSV / XLSX downloads).
//!
//! The backend turns these rows into files; this module only decides which
//! columns a table exports and what they contain.

use chrono::NaiveDate;

use crate::model::ParentProfile;
use crate::portal::{ApplicationRow, ClassroomRow};
use crate::requests::ExportFormat;

pub trait ExportRecord {
    /// Base file and sheet name, e.g. `Application_Status`.
    const SHEET: &'static str;

    fn headers() -> &'static [&'static str];

    fn values(&self) -> Vec<String>;
}

impl ExportRecord for ClassroomRow {
    const SHEET: &'static str = "Classrooms";

    fn headers() -> &'static [&'static str] {
        &["Classroom Name", "Student Count", "Status"]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.student_count.to_string(),
            self.status().to_string(),
        ]
    }
}

impl ExportRecord for ApplicationRow {
    const SHEET: &'static str = "Application_Status";

    fn headers() -> &'static [&'static str] {
        &[
            "Child Name",
            "Child Class Name",
            "Parent Email",
            "Parent Two Email",
            "Form Status",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.child_name.clone(),
            self.classroom.clone(),
            self.primary_email.clone(),
            self.additional_parent_email.clone(),
            self.form_status.to_string(),
        ]
    }
}

impl ExportRecord for ParentProfile {
    const SHEET: &'static str = "Parent_Details";

    fn headers() -> &'static [&'static str] {
        &["Parent Name", "Parent Email", "Status"]
    }

    fn values(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.status.to_string()]
    }
}

/// Header row followed by one row per record.
pub fn to_table<T: ExportRecord>(records: &[&T]) -> Vec<Vec<String>> {
    std::iter::once(T::headers().iter().map(|h| h.to_string()).collect())
        .chain(records.iter().map(|record| record.values()))
        .collect()
}

/// Download name such as `Classrooms_2026-10-16.xlsx`.
pub fn file_name<T: ExportRecord>(format: ExportFormat, date: NaiveDate) -> String {
    format!("{}_{}.{}", T::SHEET, date.format("%Y-%m-%d"), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormStatus;
    use crate::table::ResourceId;

    #[test]
    fn application_rows_keep_the_column_order() {
        let row = ApplicationRow {
            id: ResourceId(1),
            child_name: "Emma Johnson".into(),
            classroom_id: ResourceId(1),
            classroom: "Butterfly".into(),
            primary_email: "emma.johnson@email.com".into(),
            additional_parent_email: String::new(),
            form_status: FormStatus::Completed,
        };
        let table = to_table(&[&row]);
        assert_eq!(table[0][1], "Child Class Name");
        assert_eq!(
            table[1],
            vec!["Emma Johnson", "Butterfly", "emma.johnson@email.com", "", "Completed"]
        );
    }

    #[test]
    fn reserved_classroom_exports_as_unassigned() {
        let row = ClassroomRow {
            id: ResourceId(5),
            name: "Unassign".into(),
            student_count: 0,
            forms: Vec::new(),
            reserved: true,
        };
        assert_eq!(row.values()[2], "Unassigned");
    }

    #[test]
    fn file_names_carry_the_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(
            file_name::<ClassroomRow>(ExportFormat::Xlsx, date),
            "Classrooms_2026-10-16.xlsx"
        );
    }
}
