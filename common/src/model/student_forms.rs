use serde::{Deserialize, Serialize};

use crate::table::{Resource, ResourceId};

/// One child's row in the student form repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentForms {
    #[serde(default)]
    pub id: ResourceId,
    pub child_name: String,
    /// `UNASSIGNED` when the child has no classroom.
    #[serde(default)]
    pub classroom_id: ResourceId,
    #[serde(default)]
    pub parent_email: String,
    #[serde(default)]
    pub form_ids: Vec<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentFormsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_ids: Option<Vec<ResourceId>>,
}

impl StudentForms {
    pub fn has_form(&self, form_id: ResourceId) -> bool {
        self.form_ids.contains(&form_id)
    }

    /// Patch that assigns `form_id` in addition to the current forms.
    pub fn assign_patch(&self, form_id: ResourceId) -> StudentFormsPatch {
        let mut form_ids = self.form_ids.clone();
        form_ids.push(form_id);
        StudentFormsPatch {
            form_ids: Some(form_ids),
            ..StudentFormsPatch::default()
        }
    }

    /// Patch that drops `form_id` and keeps the other forms in order.
    pub fn unassign_patch(&self, form_id: ResourceId) -> StudentFormsPatch {
        StudentFormsPatch {
            form_ids: Some(
                self.form_ids
                    .iter()
                    .copied()
                    .filter(|id| *id != form_id)
                    .collect(),
            ),
            ..StudentFormsPatch::default()
        }
    }
}

impl Resource for StudentForms {
    type Patch = StudentFormsPatch;
    const KIND: &'static str = "student-forms";
    const LABEL: &'static str = "Student";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn set_id(&mut self, id: ResourceId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.child_name
    }

    fn apply_patch(&mut self, patch: &StudentFormsPatch) {
        if let Some(name) = &patch.child_name {
            self.child_name = name.trim().to_string();
        }
        if let Some(classroom_id) = patch.classroom_id {
            self.classroom_id = classroom_id;
        }
        if let Some(email) = &patch.parent_email {
            self.parent_email = email.trim().to_string();
        }
        if let Some(form_ids) = &patch.form_ids {
            self.form_ids = super::dedup_ids(form_ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emma() -> StudentForms {
        StudentForms {
            id: ResourceId(1),
            child_name: "Emma".into(),
            classroom_id: ResourceId(1),
            parent_email: "emma.parent@email.com".into(),
            form_ids: vec![ResourceId(1), ResourceId(2)],
        }
    }

    #[test]
    fn assigning_an_existing_form_keeps_it_once() {
        let mut student = emma();
        let patch = student.assign_patch(ResourceId(1));
        student.apply_patch(&patch);
        assert_eq!(student.form_ids, vec![ResourceId(1), ResourceId(2)]);
    }

    #[test]
    fn unassign_keeps_the_remaining_order() {
        let mut student = emma();
        student.form_ids.push(ResourceId(3));
        let patch = student.unassign_patch(ResourceId(2));
        student.apply_patch(&patch);
        assert_eq!(student.form_ids, vec![ResourceId(1), ResourceId(3)]);
    }
}
