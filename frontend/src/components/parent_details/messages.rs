use common::model::{ParentProfile, StudentForms};
use common::portal::Portal;
use common::table::{Completion, ResourceId, ServiceError, TableError};

use super::state::ChildField;
use crate::components::section::TableMsg;

pub enum Msg {
    Loaded(Result<Portal, TableError>),
    Table(TableMsg),
    ToggleStatus(ResourceId),
    ResendInvite(ResourceId),
    InviteResent(ResourceId, Result<ParentProfile, ServiceError>),
    OpenAddChild(String),
    CloseAddChild,
    ChildField(ChildField, String),
    SaveChild,
    ChildAdded(Result<StudentForms, ServiceError>),
    Done(Completion<ParentProfile>),
}
