//! Demo data the backend starts with unless seeding is disabled.

use crate::model::{
    Application, ChangeType, Classroom, FormStatus, FormTemplate, InviteStatus, ParentProfile,
    ParentStatus, StudentForms, UNASSIGNED_CLASSROOM,
};
use crate::portal::Portal;
use crate::table::{ResourceId, TableError};

fn ids(raw: &[u64]) -> Vec<ResourceId> {
    raw.iter().copied().map(ResourceId).collect()
}

fn classroom(id: u64, name: &str, student_count: u32, forms: &[u64]) -> Classroom {
    Classroom {
        id: ResourceId(id),
        name: name.to_string(),
        student_count,
        form_ids: ids(forms),
    }
}

fn form(id: u64, name: &str, change_type: ChangeType) -> FormTemplate {
    FormTemplate {
        id: ResourceId(id),
        name: name.to_string(),
        change_type,
    }
}

fn student(id: u64, name: &str, classroom: u64, email: &str, forms: &[u64]) -> StudentForms {
    StudentForms {
        id: ResourceId(id),
        child_name: name.to_string(),
        classroom_id: ResourceId(classroom),
        parent_email: email.to_string(),
        form_ids: ids(forms),
    }
}

fn application(
    id: u64,
    (first, last): (&str, &str),
    classroom: u64,
    (primary, additional): (&str, &str),
    form_status: FormStatus,
) -> Application {
    Application {
        id: ResourceId(id),
        child_first_name: first.to_string(),
        child_last_name: last.to_string(),
        classroom_id: ResourceId(classroom),
        primary_email: primary.to_string(),
        additional_parent_email: additional.to_string(),
        form_status,
    }
}

fn parent(id: u64, name: &str, email: &str, status: ParentStatus, invite: InviteStatus) -> ParentProfile {
    ParentProfile {
        id: ResourceId(id),
        name: name.to_string(),
        email: email.to_string(),
        status,
        invite_status: invite,
        invite_token: None,
    }
}

/// Loads the demo collections into `portal`, replacing what it holds.
pub fn seed(portal: &mut Portal) -> Result<(), TableError> {
    portal.load(vec![
        form(1, "Admission Form", ChangeType::Active),
        form(2, "Enrollment Agreement", ChangeType::Default),
        form(3, "Parent Handbook", ChangeType::Active),
        form(4, "Authorization Form", ChangeType::Available),
        form(5, "Medical Form", ChangeType::Active),
    ])?;
    portal.load(vec![
        classroom(1, "Butterfly", 15, &[1, 2]),
        classroom(2, "Purple", 12, &[1, 3]),
        classroom(3, "Rainbow", 18, &[1]),
        classroom(4, "Sunshine", 10, &[1, 4]),
        classroom(5, UNASSIGNED_CLASSROOM, 0, &[]),
    ])?;
    portal.load(vec![
        student(1, "Emma", 1, "emma.johnson@email.com", &[1, 2]),
        student(2, "Liam", 2, "sarah.smith@email.com", &[1]),
        student(3, "Olivia", 3, "mike.brown@email.com", &[1, 3]),
        student(4, "Noah", 4, "anna.davis@email.com", &[1, 4]),
    ])?;
    portal.load(vec![
        application(
            1,
            ("Emma", "Johnson"),
            1,
            ("emma.johnson@email.com", "john.johnson@email.com"),
            FormStatus::Completed,
        ),
        application(
            2,
            ("Liam", "Smith"),
            2,
            ("sarah.smith@email.com", ""),
            FormStatus::Incomplete,
        ),
        application(
            3,
            ("Olivia", "Brown"),
            3,
            ("mike.brown@email.com", "lisa.brown@email.com"),
            FormStatus::Completed,
        ),
        application(
            4,
            ("Noah", "Davis"),
            4,
            ("anna.davis@email.com", ""),
            FormStatus::Incomplete,
        ),
    ])?;
    portal.load(vec![
        parent(1, "Jennifer Johnson", "emma.johnson@email.com", ParentStatus::Active, InviteStatus::Active),
        parent(2, "Sarah Smith", "sarah.smith@email.com", ParentStatus::Active, InviteStatus::Inactive),
        parent(3, "Mike Brown", "mike.brown@email.com", ParentStatus::Archive, InviteStatus::Active),
        parent(4, "Anna Davis", "anna.davis@email.com", ParentStatus::Active, InviteStatus::Inactive),
    ])?;
    log::debug!("demo data loaded");
    Ok(())
}

pub fn demo_portal() -> Result<Portal, TableError> {
    let mut portal = Portal::new();
    seed(&mut portal)?;
    Ok(portal)
}
