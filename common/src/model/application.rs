use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::{Resource, ResourceId, TableError};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FormStatus {
    Completed,
    #[default]
    Incomplete,
}

impl FormStatus {
    pub const ALL: [FormStatus; 2] = [FormStatus::Completed, FormStatus::Incomplete];

    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Completed => "Completed",
            FormStatus::Incomplete => "Incomplete",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enrollment application of one child.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: ResourceId,
    pub child_first_name: String,
    #[serde(default)]
    pub child_last_name: String,
    #[serde(default)]
    pub classroom_id: ResourceId,
    pub primary_email: String,
    #[serde(default)]
    pub additional_parent_email: String,
    #[serde(default)]
    pub form_status: FormStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_parent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_status: Option<FormStatus>,
}

impl Application {
    pub fn child_name(&self) -> String {
        format!("{} {}", self.child_first_name.trim(), self.child_last_name.trim())
            .trim()
            .to_string()
    }

    /// Whether `email` is one of the two parent addresses (case-insensitive).
    pub fn belongs_to(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty()
            && (self.primary_email.eq_ignore_ascii_case(email)
                || self.additional_parent_email.eq_ignore_ascii_case(email))
    }
}

impl Resource for Application {
    type Patch = ApplicationPatch;
    const KIND: &'static str = "applications";
    const LABEL: &'static str = "Application";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn set_id(&mut self, id: ResourceId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.child_first_name
    }

    fn apply_patch(&mut self, patch: &ApplicationPatch) {
        if let Some(classroom_id) = patch.classroom_id {
            self.classroom_id = classroom_id;
        }
        if let Some(email) = &patch.additional_parent_email {
            self.additional_parent_email = email.trim().to_string();
        }
        if let Some(status) = patch.form_status {
            self.form_status = status;
        }
    }

    fn validate(&self) -> Result<(), TableError> {
        if self.child_first_name.trim().is_empty() {
            return Err(TableError::validation("First Name is required!"));
        }
        validation::require_email(&self.primary_email)?;
        if !self.additional_parent_email.trim().is_empty()
            && !validation::is_valid_email(&self.additional_parent_email)
        {
            return Err(TableError::validation(
                "Please enter a valid email address for the second parent",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liam() -> Application {
        Application {
            id: ResourceId(2),
            child_first_name: "Liam".into(),
            child_last_name: "Smith".into(),
            classroom_id: ResourceId(2),
            primary_email: "sarah.smith@email.com".into(),
            additional_parent_email: String::new(),
            form_status: FormStatus::Incomplete,
        }
    }

    #[test]
    fn matches_either_parent_email() {
        let mut app = liam();
        assert!(app.belongs_to("SARAH.smith@email.com"));
        assert!(!app.belongs_to(""));
        app.additional_parent_email = "tom.smith@email.com".into();
        assert!(app.belongs_to("tom.smith@email.com"));
    }

    #[test]
    fn second_parent_email_is_optional_but_checked() {
        let mut app = liam();
        assert!(app.validate().is_ok());
        app.additional_parent_email = "nope".into();
        assert!(app.validate().is_err());
    }
}
