//! State of the Forms Repository page: the local portal and its three
//! tables (classrooms, form templates, student forms), plus the open dialog.

use common::model::{ChangeType, Classroom, FormTemplate, StudentForms};
use common::portal::{
    classroom_pipeline, form_pipeline, student_form_pipeline, ClassroomRow, Portal,
    StudentFormRow,
};
use common::table::ResourceId;

use crate::components::section::{Section, TableControls};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Classrooms,
    Forms,
    Students,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Closed,
    AddClassroom,
    EditClassroom(ResourceId),
    AddForm,
    EditForm(ResourceId),
    /// Form assignment of one student.
    StudentForms(ResourceId),
}

/// Field values of the open dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub change_type: ChangeType,
    pub form_ids: Vec<ResourceId>,
}

impl Draft {
    pub fn toggle_form(&mut self, id: ResourceId) {
        if let Some(pos) = self.form_ids.iter().position(|f| *f == id) {
            self.form_ids.remove(pos);
        } else {
            self.form_ids.push(id);
        }
    }
}

pub struct FormsRepository {
    pub portal: Portal,
    /// Set once the first fetch has been requested.
    pub loaded: bool,
    pub classrooms: Section<Classroom, ClassroomRow>,
    pub forms: Section<FormTemplate, FormTemplate>,
    pub students: Section<StudentForms, StudentFormRow>,
    pub dialog: Dialog,
    pub draft: Draft,
}

impl FormsRepository {
    pub fn new() -> Self {
        Self {
            portal: Portal::new(),
            loaded: false,
            classrooms: Section::new(classroom_pipeline(), Portal::classroom_rows),
            forms: Section::new(form_pipeline(), |portal: &Portal| portal.forms().list().to_vec()),
            students: Section::new(student_form_pipeline(), Portal::student_form_rows),
            dialog: Dialog::Closed,
            draft: Draft::default(),
        }
    }

    pub fn controls(&mut self, table: Table) -> &mut dyn TableControls {
        match table {
            Table::Classrooms => &mut self.classrooms.table,
            Table::Forms => &mut self.forms.table,
            Table::Students => &mut self.students.table,
        }
    }

    /// Cascades touch every table, so all of them are re-projected.
    pub fn refresh(&mut self) {
        self.classrooms.refresh(&self.portal);
        self.forms.refresh(&self.portal);
        self.students.refresh(&self.portal);
    }

    /// Opens `dialog` with its fields filled from the current records.
    pub fn open(&mut self, dialog: Dialog) {
        self.draft = match dialog {
            Dialog::EditClassroom(id) => self
                .portal
                .classrooms()
                .get(id)
                .map(|room| Draft {
                    name: room.name.clone(),
                    form_ids: room.form_ids.clone(),
                    ..Draft::default()
                })
                .unwrap_or_default(),
            Dialog::EditForm(id) => self
                .portal
                .forms()
                .get(id)
                .map(|form| Draft {
                    name: form.name.clone(),
                    change_type: form.change_type,
                    ..Draft::default()
                })
                .unwrap_or_default(),
            Dialog::StudentForms(id) => self
                .portal
                .students()
                .get(id)
                .map(|student| Draft {
                    form_ids: student.form_ids.clone(),
                    ..Draft::default()
                })
                .unwrap_or_default(),
            Dialog::AddClassroom | Dialog::AddForm | Dialog::Closed => Draft::default(),
        };
        self.dialog = dialog;
    }

    pub fn close(&mut self) {
        self.dialog = Dialog::Closed;
        self.draft = Draft::default();
    }
}
