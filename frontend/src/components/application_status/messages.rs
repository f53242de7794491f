use common::model::{Application, FormStatus};
use common::portal::Portal;
use common::table::{Completion, ResourceId, TableError};

use crate::components::section::TableMsg;

pub enum Msg {
    Loaded(Result<Portal, TableError>),
    Table(TableMsg),
    SetFormStatus { id: ResourceId, status: FormStatus },
    Done(Completion<Application>),
}
