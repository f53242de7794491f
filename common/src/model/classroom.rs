use serde::{Deserialize, Serialize};

use crate::table::{Resource, ResourceId, TableError};

/// Name of the reserved bucket for children without a classroom.
pub const UNASSIGNED_CLASSROOM: &str = "Unassign";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classroom {
    #[serde(default)]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub student_count: u32,
    /// Forms required for every child in this classroom.
    #[serde(default)]
    pub form_ids: Vec<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassroomPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_ids: Option<Vec<ResourceId>>,
}

impl Classroom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(UNASSIGNED_CLASSROOM)
    }
}

impl Resource for Classroom {
    type Patch = ClassroomPatch;
    const KIND: &'static str = "classrooms";
    const LABEL: &'static str = "Classroom";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn set_id(&mut self, id: ResourceId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: &ClassroomPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(form_ids) = &patch.form_ids {
            self.form_ids = super::dedup_ids(form_ids);
        }
    }

    fn validate_patch(&self, patch: &ClassroomPatch) -> Result<(), TableError> {
        if self.is_reserved() && patch.name.is_some() {
            return Err(TableError::validation(format!(
                "The {} classroom cannot be renamed",
                UNASSIGNED_CLASSROOM
            )));
        }
        Ok(())
    }

    /// The count follows the student rows assigned to the classroom.
    fn sanitize_new(&mut self) {
        self.student_count = 0;
    }

    fn validate_delete(&self) -> Result<(), TableError> {
        if self.is_reserved() {
            return Err(TableError::validation(format!(
                "The {} classroom cannot be deleted",
                UNASSIGNED_CLASSROOM
            )));
        }
        if self.student_count > 0 {
            return Err(TableError::validation(format!(
                "Cannot delete {}: {} students are still assigned",
                self.name, self.student_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_classrooms_cannot_be_deleted() {
        let mut room = Classroom::new("Butterfly");
        room.student_count = 15;
        assert!(matches!(room.validate_delete(), Err(TableError::Validation(_))));
        room.student_count = 0;
        assert!(room.validate_delete().is_ok());
    }

    #[test]
    fn new_classrooms_start_without_students() {
        let mut room = Classroom::new("Ladybug");
        room.student_count = 7;
        room.sanitize_new();
        assert_eq!(room.student_count, 0);
        assert!(room.validate_delete().is_ok());
    }

    #[test]
    fn reserved_classroom_is_protected() {
        let room = Classroom::new("Unassign");
        assert!(room.is_reserved());
        assert!(room.validate_delete().is_err());
        let rename = ClassroomPatch {
            name: Some("Other".into()),
            form_ids: None,
        };
        assert!(room.validate_patch(&rename).is_err());
        let forms = ClassroomPatch {
            name: None,
            form_ids: Some(vec![ResourceId(1)]),
        };
        assert!(room.validate_patch(&forms).is_ok());
    }
}
