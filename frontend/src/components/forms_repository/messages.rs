use common::model::{Classroom, FormTemplate, StudentForms};
use common::portal::Portal;
use common::table::{Completion, ResourceId, TableError};

use super::state::{Dialog, Table};
use crate::components::section::TableMsg;

pub enum Msg {
    Loaded(Result<Portal, TableError>),
    Table(Table, TableMsg),
    Open(Dialog),
    Close,
    DraftName(String),
    DraftChangeType(String),
    ToggleDraftForm(ResourceId),
    Save,
    DeleteClassroom(ResourceId),
    DeleteForm(ResourceId),
    UnassignForm { student: ResourceId, form: ResourceId },
    ClassroomDone(Completion<Classroom>),
    FormDone(Completion<FormTemplate>),
    StudentDone(Completion<StudentForms>),
}
