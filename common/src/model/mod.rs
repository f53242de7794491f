//! Entity kinds of the portal. Relations between kinds are stored as ids;
//! names are resolved through [`crate::portal::Portal`] when rendering.

pub mod application;
pub mod classroom;
pub mod form_template;
pub mod parent;
pub mod student_forms;

pub use application::{Application, ApplicationPatch, FormStatus};
pub use classroom::{Classroom, ClassroomPatch, UNASSIGNED_CLASSROOM};
pub use form_template::{ChangeType, FormTemplate, FormTemplatePatch};
pub use parent::{InviteStatus, ParentProfile, ParentProfilePatch, ParentStatus};
pub use student_forms::{StudentForms, StudentFormsPatch};

use crate::table::ResourceId;

/// Drops repeated and unassigned ids, keeping first occurrences in order.
pub(crate) fn dedup_ids(ids: &[ResourceId]) -> Vec<ResourceId> {
    let mut out: Vec<ResourceId> = Vec::with_capacity(ids.len());
    for id in ids {
        if id.is_assigned() && !out.contains(id) {
            out.push(*id);
        }
    }
    out
}
