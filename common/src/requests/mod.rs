//! Payloads exchanged between the front end and the backend.

use serde::{Deserialize, Serialize};

use crate::model::{Application, FormStatus, InviteStatus, ParentProfile, ParentStatus, StudentForms};
use crate::table::{FilterCriteria, ResourceId, TableError};
use crate::validation;

/// Success body: every data-carrying response is wrapped as `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

/// Error body: `{ "error": { "code": ..., "message": ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

impl ApiErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl From<&TableError> for ApiErrorBody {
    fn from(err: &TableError) -> Self {
        ApiErrorBody::new(err.code(), err.to_string())
    }
}

/// Invitation of a new family from the "Invite Parent" page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InviteParentRequest {
    pub child_first_name: String,
    pub child_last_name: String,
    pub classroom_id: ResourceId,
    pub parent_name: String,
    pub email: String,
}

impl InviteParentRequest {
    /// Checks the form fields in the order they appear on the page.
    pub fn validate(&self) -> Result<(), TableError> {
        validation::require_min_len(
            &self.child_first_name,
            2,
            "Child first name",
            "First name must be at least 2 characters",
        )?;
        validation::require_min_len(
            &self.child_last_name,
            2,
            "Child last name",
            "Last name must be at least 2 characters",
        )?;
        if !self.classroom_id.is_assigned() {
            return Err(TableError::validation("Please select a classroom"));
        }
        validation::require_min_len(
            &self.parent_name,
            2,
            "Parent full name",
            "Name must be at least 2 characters",
        )?;
        validation::require_email(&self.email)
    }

    /// Records created when the invitation is accepted: the not yet active
    /// parent profile carrying `token`, and an incomplete application.
    pub fn to_records(&self, token: String) -> (ParentProfile, Application) {
        let email = self.email.trim().to_string();
        let parent = ParentProfile {
            id: ResourceId::UNASSIGNED,
            name: self.parent_name.trim().to_string(),
            email: email.clone(),
            status: ParentStatus::Active,
            invite_status: InviteStatus::Inactive,
            invite_token: Some(token),
        };
        let application = Application {
            id: ResourceId::UNASSIGNED,
            child_first_name: self.child_first_name.trim().to_string(),
            child_last_name: self.child_last_name.trim().to_string(),
            classroom_id: self.classroom_id,
            primary_email: email,
            additional_parent_email: String::new(),
            form_status: FormStatus::Incomplete,
        };
        (parent, application)
    }
}

/// "Add child" dialog on the Parent Details page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddChildRequest {
    pub first_name: String,
    pub last_name: String,
    pub classroom_id: ResourceId,
    pub parent_email: String,
}

impl AddChildRequest {
    pub fn validate(&self) -> Result<(), TableError> {
        if self.first_name.trim().is_empty() {
            return Err(TableError::validation("First Name is required!"));
        }
        if self.last_name.trim().is_empty() {
            return Err(TableError::validation("Last Name is required!"));
        }
        if !self.classroom_id.is_assigned() {
            return Err(TableError::validation("Class Room selection is required!"));
        }
        if self.parent_email.trim().is_empty() {
            return Err(TableError::validation("Parent information is required!"));
        }
        validation::require_email(&self.parent_email)
    }

    pub fn to_records(&self) -> (StudentForms, Application) {
        let email = self.parent_email.trim().to_string();
        let student = StudentForms {
            id: ResourceId::UNASSIGNED,
            child_name: self.first_name.trim().to_string(),
            classroom_id: self.classroom_id,
            parent_email: email.clone(),
            form_ids: Vec::new(),
        };
        let application = Application {
            id: ResourceId::UNASSIGNED,
            child_first_name: self.first_name.trim().to_string(),
            child_last_name: self.last_name.trim().to_string(),
            classroom_id: self.classroom_id,
            primary_email: email,
            additional_parent_email: String::new(),
            form_status: FormStatus::Incomplete,
        };
        (student, application)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// Query string of `GET /api/{kind}/export`: the table's current filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub classroom: String,
}

impl ExportQuery {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_search(self.search.clone())
            .with_status(&self.status)
            .with_selector("classroom", &self.classroom)
    }

    /// Query string for the front end's download link.
    pub fn to_query_string(&self) -> String {
        format!(
            "format={}&search={}&status={}&classroom={}",
            self.format.extension(),
            urlencoding::encode(&self.search),
            urlencoding::encode(&self.status),
            urlencoding::encode(&self.classroom)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite() -> InviteParentRequest {
        InviteParentRequest {
            child_first_name: "Ava".into(),
            child_last_name: "Lee".into(),
            classroom_id: ResourceId(3),
            parent_name: "Grace Lee".into(),
            email: "grace.lee@email.com".into(),
        }
    }

    #[test]
    fn invite_checks_fields_in_page_order() {
        let mut req = invite();
        assert!(req.validate().is_ok());

        req.child_first_name = "A".into();
        assert_eq!(
            req.validate(),
            Err(TableError::validation("First name must be at least 2 characters"))
        );

        req = invite();
        req.classroom_id = ResourceId::UNASSIGNED;
        assert_eq!(req.validate(), Err(TableError::validation("Please select a classroom")));

        req = invite();
        req.email = "grace".into();
        assert_eq!(
            req.validate(),
            Err(TableError::validation("Please enter a valid email address"))
        );
    }

    #[test]
    fn invite_creates_an_inactive_parent_and_incomplete_application() {
        let (parent, app) = invite().to_records("tok".into());
        assert_eq!(parent.invite_status, InviteStatus::Inactive);
        assert_eq!(parent.invite_token.as_deref(), Some("tok"));
        assert_eq!(app.form_status, FormStatus::Incomplete);
        assert_eq!(app.classroom_id, ResourceId(3));
    }

    #[test]
    fn add_child_requires_a_classroom() {
        let req = AddChildRequest {
            first_name: "Mia".into(),
            last_name: "Ray".into(),
            classroom_id: ResourceId::UNASSIGNED,
            parent_email: "ray@email.com".into(),
        };
        assert_eq!(
            req.validate(),
            Err(TableError::validation("Class Room selection is required!"))
        );
    }

    #[test]
    fn export_query_feeds_the_filter_criteria() {
        let query = ExportQuery {
            format: ExportFormat::Xlsx,
            search: "emma".into(),
            status: "All".into(),
            classroom: "Butterfly".into(),
        };
        let criteria = query.criteria();
        assert_eq!(criteria.search_term(), "emma");
        assert_eq!(criteria.selector("classroom"), Some("Butterfly"));
        assert_eq!(
            query.to_query_string(),
            "format=xlsx&search=emma&status=All&classroom=Butterfly"
        );
    }
}
