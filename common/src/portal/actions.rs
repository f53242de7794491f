//! Multi-record operations behind the invite, add-child and form
//! assignment dialogs.

use crate::model::{
    Application, Classroom, FormTemplate, InviteStatus, ParentProfile, StudentForms,
};
use crate::portal::{Portal, References};
use crate::requests::{AddChildRequest, InviteParentRequest};
use crate::table::{Change, Reconcile, Resource, ResourceId, TableError};

impl Portal {
    /// Records an invitation: a parent profile waiting for acceptance and an
    /// incomplete application for the child. Nothing is stored unless both
    /// records pass their checks.
    pub fn invite_parent(
        &mut self,
        request: &InviteParentRequest,
        token: String,
    ) -> Result<(ParentProfile, Application), TableError> {
        request.validate()?;
        self.classrooms().require(request.classroom_id)?;

        let (parent, application) = request.to_records(token);
        parent.validate()?;
        application.validate()?;
        self.check_references(&parent)?;
        self.check_references(&application)?;

        let parent = self.insert(parent)?;
        let application = self.create(application)?;
        log::info!(
            "invited {} for {} in {}",
            parent.email,
            application.child_name(),
            self.classroom_name(application.classroom_id)
        );
        Ok((parent, application))
    }

    /// Registers another child for an existing parent.
    pub fn add_child(&mut self, request: &AddChildRequest) -> Result<StudentForms, TableError> {
        request.validate()?;
        self.classrooms().require(request.classroom_id)?;
        let email = request.parent_email.trim();
        if !self
            .parents()
            .iter()
            .any(|p| p.email.eq_ignore_ascii_case(email))
        {
            return Err(TableError::validation(format!("No parent with email {}", email)));
        }

        let (mut student, application) = request.to_records();
        student.form_ids = self
            .classrooms()
            .get(request.classroom_id)
            .map(|room| room.form_ids.clone())
            .unwrap_or_default();
        student.validate()?;
        application.validate()?;
        self.check_references(&student)?;
        self.check_references(&application)?;

        let student = self.create(student)?;
        self.create(application)?;
        Ok(student)
    }

    /// Issues a fresh invitation token for a parent who has not accepted
    /// yet. Delivery of the email happens outside the portal.
    pub fn resend_invite(&mut self, parent_id: ResourceId, token: String) -> Result<ParentProfile, TableError> {
        let mut parent = self.parents().require(parent_id)?.clone();
        if parent.invite_status == InviteStatus::Active {
            return Err(TableError::validation(format!(
                "{} has already accepted the invitation",
                parent.email
            )));
        }
        parent.invite_token = Some(token);
        let stored = self.reconcile(Change::Updated(parent))?;
        stored.ok_or_else(|| TableError::not_found(ParentProfile::KIND, parent_id))
    }

    /// Adds one form to one student's list.
    pub fn assign_form(&mut self, student_id: ResourceId, form_id: ResourceId) -> Result<StudentForms, TableError> {
        self.forms().require(form_id)?;
        let patch = self.students().require(student_id)?.assign_patch(form_id);
        self.update::<StudentForms>(student_id, &patch)
    }

    /// Removes one form from one student's list.
    pub fn unassign_form(&mut self, student_id: ResourceId, form_id: ResourceId) -> Result<StudentForms, TableError> {
        let student = self.students().require(student_id)?;
        if !student.has_form(form_id) {
            return Err(TableError::not_found(FormTemplate::KIND, form_id));
        }
        let patch = student.unassign_patch(form_id);
        self.update::<StudentForms>(student_id, &patch)
    }

    /// Classrooms a child can be placed in (all but the reserved bucket).
    pub fn assignable_classrooms(&self) -> Vec<&Classroom> {
        self.classrooms().iter().filter(|room| !room.is_reserved()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormStatus;
    use crate::portal::seed::demo_portal;

    fn invite(email: &str) -> InviteParentRequest {
        InviteParentRequest {
            child_first_name: "Ava".into(),
            child_last_name: "Lee".into(),
            classroom_id: ResourceId(2),
            parent_name: "Grace Lee".into(),
            email: email.into(),
        }
    }

    #[test]
    fn invitation_creates_parent_and_application() {
        let mut portal = demo_portal().unwrap();
        let parents = portal.parents().len();
        let (parent, app) = portal.invite_parent(&invite("grace.lee@email.com"), "t1".into()).unwrap();
        assert_eq!(portal.parents().len(), parents + 1);
        assert_eq!(parent.invite_status, InviteStatus::Inactive);
        assert_eq!(parent.invite_token.as_deref(), Some("t1"));
        assert_eq!(app.form_status, FormStatus::Incomplete);
        assert_eq!(portal.classroom_name(app.classroom_id), "Purple");
    }

    #[test]
    fn duplicate_invitation_stores_nothing() {
        let mut portal = demo_portal().unwrap();
        let before = portal.clone();
        let err = portal
            .invite_parent(&invite("sarah.smith@email.com"), "t2".into())
            .unwrap_err();
        assert!(matches!(err, TableError::Validation(_)));
        assert_eq!(portal, before);
    }

    #[test]
    fn resend_is_rejected_once_accepted() {
        let mut portal = demo_portal().unwrap();
        assert!(portal.resend_invite(ResourceId(1), "x".into()).is_err());
        let parent = portal.resend_invite(ResourceId(2), "fresh".into()).unwrap();
        assert_eq!(parent.invite_token.as_deref(), Some("fresh"));
    }

    #[test]
    fn added_child_gets_the_classroom_forms_and_bumps_the_count() {
        let mut portal = demo_portal().unwrap();
        let before = portal.classrooms().get(ResourceId(4)).unwrap().student_count;
        let student = portal
            .add_child(&AddChildRequest {
                first_name: "Ella".into(),
                last_name: "Davis".into(),
                classroom_id: ResourceId(4),
                parent_email: "anna.davis@email.com".into(),
            })
            .unwrap();
        assert_eq!(student.form_ids, vec![ResourceId(1), ResourceId(4)]);
        assert_eq!(
            portal.classrooms().get(ResourceId(4)).unwrap().student_count,
            before + 1
        );
        assert_eq!(portal.parent_dashboard("anna.davis@email.com").children.len(), 2);
    }

    #[test]
    fn unassigning_a_missing_form_is_not_found() {
        let mut portal = demo_portal().unwrap();
        let updated = portal.unassign_form(ResourceId(1), ResourceId(2)).unwrap();
        assert_eq!(updated.form_ids, vec![ResourceId(1)]);
        assert_eq!(
            portal.unassign_form(ResourceId(1), ResourceId(2)).unwrap_err(),
            TableError::not_found("form-templates", ResourceId(2))
        );
    }
}
