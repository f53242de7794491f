//! Display rows with relation names resolved, and the filter pipeline of
//! each admin table.

use serde::{Deserialize, Serialize};

use crate::model::{Application, ChangeType, FormStatus, FormTemplate, ParentProfile};
use crate::portal::Portal;
use crate::table::{FilterPipeline, ResourceId};

/// Shown wherever a classroom reference is unassigned or dangling.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomRow {
    pub id: ResourceId,
    pub name: String,
    pub student_count: u32,
    pub forms: Vec<String>,
    pub reserved: bool,
}

impl ClassroomRow {
    pub fn status(&self) -> &'static str {
        if self.reserved { UNASSIGNED_LABEL } else { "Active" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFormRow {
    pub id: ResourceId,
    pub child_name: String,
    pub classroom_id: ResourceId,
    pub classroom: String,
    pub parent_email: String,
    pub form_ids: Vec<ResourceId>,
    pub forms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub id: ResourceId,
    pub child_name: String,
    pub classroom_id: ResourceId,
    pub classroom: String,
    pub primary_email: String,
    pub additional_parent_email: String,
    pub form_status: FormStatus,
}

impl Portal {
    /// Current name of a classroom, or `Unassigned`.
    pub fn classroom_name(&self, id: ResourceId) -> &str {
        self.classrooms()
            .get(id)
            .map(|room| room.name.as_str())
            .unwrap_or(UNASSIGNED_LABEL)
    }

    /// Current names of `ids`; ids that no longer resolve are skipped.
    pub fn form_names(&self, ids: &[ResourceId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.forms().get(*id))
            .map(|form| form.name.clone())
            .collect()
    }

    pub fn classroom_rows(&self) -> Vec<ClassroomRow> {
        self.classrooms()
            .iter()
            .map(|room| ClassroomRow {
                id: room.id,
                name: room.name.clone(),
                student_count: room.student_count,
                forms: self.form_names(&room.form_ids),
                reserved: room.is_reserved(),
            })
            .collect()
    }

    pub fn student_form_rows(&self) -> Vec<StudentFormRow> {
        self.students()
            .iter()
            .map(|student| StudentFormRow {
                id: student.id,
                child_name: student.child_name.clone(),
                classroom_id: student.classroom_id,
                classroom: self.classroom_name(student.classroom_id).to_string(),
                parent_email: student.parent_email.clone(),
                form_ids: student.form_ids.clone(),
                forms: self.form_names(&student.form_ids),
            })
            .collect()
    }

    pub fn application_rows(&self) -> Vec<ApplicationRow> {
        self.applications()
            .iter()
            .map(|app| self.application_row(app))
            .collect()
    }

    pub(crate) fn application_row(&self, app: &Application) -> ApplicationRow {
        ApplicationRow {
            id: app.id,
            child_name: app.child_name(),
            classroom_id: app.classroom_id,
            classroom: self.classroom_name(app.classroom_id).to_string(),
            primary_email: app.primary_email.clone(),
            additional_parent_email: app.additional_parent_email.clone(),
            form_status: app.form_status,
        }
    }
}

pub fn classroom_pipeline() -> FilterPipeline<ClassroomRow> {
    FilterPipeline::new()
        .search("name", |row: &ClassroomRow| row.name.clone())
        .selector("classroom", |row: &ClassroomRow| vec![row.id.to_string()])
}

pub fn form_pipeline() -> FilterPipeline<FormTemplate> {
    FilterPipeline::new()
        .search("name", |form: &FormTemplate| form.name.clone())
        .search("change_type", |form: &FormTemplate| {
            form.change_type.as_str().to_string()
        })
        .status(|form: &FormTemplate| form.change_type.as_str().to_string())
}

pub fn student_form_pipeline() -> FilterPipeline<StudentFormRow> {
    FilterPipeline::new()
        .search("child_name", |row: &StudentFormRow| row.child_name.clone())
        .search("parent_email", |row: &StudentFormRow| row.parent_email.clone())
        .search("classroom", |row: &StudentFormRow| row.classroom.clone())
        .search("forms", |row: &StudentFormRow| row.forms.join(", "))
        .selector("classroom", |row: &StudentFormRow| vec![row.classroom_id.to_string()])
        .selector("form", |row: &StudentFormRow| {
            row.form_ids.iter().map(ToString::to_string).collect()
        })
}

pub fn application_pipeline() -> FilterPipeline<ApplicationRow> {
    FilterPipeline::new()
        .search("child_name", |row: &ApplicationRow| row.child_name.clone())
        .search("primary_email", |row: &ApplicationRow| row.primary_email.clone())
        .search("additional_parent_email", |row: &ApplicationRow| {
            row.additional_parent_email.clone()
        })
        .search("classroom", |row: &ApplicationRow| row.classroom.clone())
        .search("form_status", |row: &ApplicationRow| {
            row.form_status.as_str().to_string()
        })
        .status(|row: &ApplicationRow| row.form_status.as_str().to_string())
        .selector("classroom", |row: &ApplicationRow| vec![row.classroom_id.to_string()])
}

pub fn parent_pipeline() -> FilterPipeline<ParentProfile> {
    FilterPipeline::new()
        .search("name", |parent: &ParentProfile| parent.name.clone())
        .search("email", |parent: &ParentProfile| parent.email.clone())
        .status(|parent: &ParentProfile| parent.status.as_str().to_string())
}

/// Options of the change-type dropdown, `All` first.
pub fn change_type_options() -> Vec<&'static str> {
    std::iter::once(crate::table::filter::ALL)
        .chain(ChangeType::ALL.iter().map(|ct| ct.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FilterCriteria;

    #[test]
    fn dangling_classroom_reads_as_unassigned() {
        let portal = Portal::default();
        assert_eq!(portal.classroom_name(ResourceId(42)), UNASSIGNED_LABEL);
    }

    #[test]
    fn classroom_selector_matches_ids_only() {
        let mut portal = Portal::default();
        let mut numbered = crate::model::Classroom::new("1");
        numbered.id = ResourceId(2);
        let mut butterfly = crate::model::Classroom::new("Butterfly");
        butterfly.id = ResourceId(1);
        portal.load(vec![butterfly, numbered]).unwrap();
        portal
            .load(vec![crate::model::Application {
                id: ResourceId(1),
                child_first_name: "Ava".into(),
                classroom_id: ResourceId(2),
                primary_email: "grace.lee@email.com".into(),
                ..Default::default()
            }])
            .unwrap();

        let rows = portal.application_rows();
        let pipeline = application_pipeline();
        let by_id = |id: &str| pipeline.apply(&rows, &FilterCriteria::new().with_selector("classroom", id)).len();
        assert_eq!(by_id("1"), 0);
        assert_eq!(by_id("2"), 1);
        assert_eq!(by_id("Butterfly"), 0);
    }

    #[test]
    fn change_type_status_filter_is_exact() {
        let forms = vec![
            FormTemplate::new("Admission Form", ChangeType::Active),
            FormTemplate::new("Medical Form", ChangeType::Archive),
        ];
        let hits = form_pipeline().apply(&forms, &FilterCriteria::new().with_status("Archive"));
        assert_eq!(hits, vec![&forms[1]]);
        assert_eq!(change_type_options()[0], "All");
    }
}
