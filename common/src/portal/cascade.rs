//! Cross-kind rules: reference checks before a commit, and the cascades
//! that run when a change is reconciled.

use crate::model::{Application, Classroom, FormTemplate, ParentProfile, StudentForms};
use crate::portal::Portal;
use crate::table::{
    Change, Reconcile, ReferenceIntegrityWarning, Resource, ResourceId, ResourceStore, TableError,
};

/// Checks a resource against the other collections before it is stored.
pub trait References<R: Resource> {
    fn check_references(&self, resource: &R) -> Result<(), TableError>;

    /// Rejects removing a resource other collections still depend on.
    fn check_delete(&self, _resource: &R) -> Result<(), TableError> {
        Ok(())
    }
}

fn ensure_forms_exist(forms: &ResourceStore<FormTemplate>, ids: &[ResourceId]) -> Result<(), TableError> {
    match ids.iter().find(|id| !forms.contains(**id)) {
        Some(missing) => Err(TableError::validation(format!("Unknown form id {}", missing))),
        None => Ok(()),
    }
}

fn ensure_classroom_exists(
    classrooms: &ResourceStore<Classroom>,
    id: ResourceId,
) -> Result<(), TableError> {
    if id.is_assigned() && !classrooms.contains(id) {
        return Err(TableError::validation(format!("Unknown classroom id {}", id)));
    }
    Ok(())
}

fn name_taken<R: Resource>(store: &ResourceStore<R>, resource: &R) -> bool {
    let name = resource.display_name().trim();
    store
        .iter()
        .any(|other| other.id() != resource.id() && other.display_name().trim().eq_ignore_ascii_case(name))
}

impl References<Classroom> for Portal {
    fn check_references(&self, room: &Classroom) -> Result<(), TableError> {
        if name_taken(&self.classrooms, room) {
            return Err(TableError::validation(format!(
                "A classroom named {} already exists",
                room.name
            )));
        }
        ensure_forms_exist(&self.forms, &room.form_ids)
    }
}

impl References<FormTemplate> for Portal {
    fn check_references(&self, form: &FormTemplate) -> Result<(), TableError> {
        if name_taken(&self.forms, form) {
            return Err(TableError::validation(format!(
                "A form named {} already exists",
                form.name
            )));
        }
        Ok(())
    }
}

impl References<StudentForms> for Portal {
    fn check_references(&self, student: &StudentForms) -> Result<(), TableError> {
        ensure_classroom_exists(&self.classrooms, student.classroom_id)?;
        ensure_forms_exist(&self.forms, &student.form_ids)
    }
}

impl References<ParentProfile> for Portal {
    fn check_references(&self, parent: &ParentProfile) -> Result<(), TableError> {
        let email = parent.email.trim();
        if self
            .parents
            .iter()
            .any(|other| other.id != parent.id && other.email.eq_ignore_ascii_case(email))
        {
            return Err(TableError::validation(format!(
                "A parent with email {} already exists",
                email
            )));
        }
        Ok(())
    }

    fn check_delete(&self, parent: &ParentProfile) -> Result<(), TableError> {
        if self.children_of(&parent.email) > 0 {
            return Err(TableError::validation(format!(
                "Cannot delete {}: children are still registered under {}",
                parent.name, parent.email
            )));
        }
        Ok(())
    }
}

impl References<Application> for Portal {
    fn check_references(&self, app: &Application) -> Result<(), TableError> {
        ensure_classroom_exists(&self.classrooms, app.classroom_id)
    }
}

impl Reconcile<Classroom> for Portal {
    fn store(&self) -> &ResourceStore<Classroom> {
        &self.classrooms
    }

    fn reconcile(&mut self, change: Change<Classroom>) -> Result<Option<Classroom>, TableError> {
        match change {
            Change::Removed(id) => {
                let removed = self.classrooms.remove(id)?;
                self.detach_classroom(&removed);
                Ok(None)
            }
            other => self.classrooms.reconcile(other),
        }
    }
}

impl Reconcile<FormTemplate> for Portal {
    fn store(&self) -> &ResourceStore<FormTemplate> {
        &self.forms
    }

    fn reconcile(&mut self, change: Change<FormTemplate>) -> Result<Option<FormTemplate>, TableError> {
        match change {
            Change::Removed(id) => {
                self.forms.remove(id)?;
                self.detach_form(id);
                Ok(None)
            }
            other => self.forms.reconcile(other),
        }
    }
}

impl Reconcile<StudentForms> for Portal {
    fn store(&self) -> &ResourceStore<StudentForms> {
        &self.students
    }

    fn reconcile(&mut self, change: Change<StudentForms>) -> Result<Option<StudentForms>, TableError> {
        match change {
            Change::Created(student) => {
                let stored = self.students.add(student)?;
                self.adjust_student_count(stored.classroom_id, 1, stored.id);
                Ok(Some(stored))
            }
            Change::Updated(student) => {
                let previous = self.students.require(student.id)?.classroom_id;
                let stored = self.students.replace(student)?;
                if previous != stored.classroom_id {
                    self.adjust_student_count(previous, -1, stored.id);
                    self.adjust_student_count(stored.classroom_id, 1, stored.id);
                }
                Ok(Some(stored))
            }
            Change::Removed(id) => {
                let removed = self.students.remove(id)?;
                self.adjust_student_count(removed.classroom_id, -1, removed.id);
                Ok(None)
            }
            loaded @ Change::Loaded(_) => self.students.reconcile(loaded),
        }
    }
}

impl Reconcile<ParentProfile> for Portal {
    fn store(&self) -> &ResourceStore<ParentProfile> {
        &self.parents
    }

    fn reconcile(&mut self, change: Change<ParentProfile>) -> Result<Option<ParentProfile>, TableError> {
        match change {
            Change::Updated(parent) => {
                let previous = self.parents.require(parent.id)?.email.clone();
                let stored = self.parents.replace(parent)?;
                if !previous.trim().eq_ignore_ascii_case(stored.email.trim()) {
                    self.rewrite_parent_email(&previous, &stored.email);
                }
                Ok(Some(stored))
            }
            Change::Removed(id) => {
                let removed = self.parents.remove(id)?;
                let email = removed.email.trim();
                let holders: Vec<(&'static str, ResourceId)> = self
                    .students
                    .iter()
                    .filter(|s| s.parent_email.trim().eq_ignore_ascii_case(email))
                    .map(|s| (StudentForms::KIND, s.id))
                    .chain(
                        self.applications
                            .iter()
                            .filter(|a| a.primary_email.trim().eq_ignore_ascii_case(email))
                            .map(|a| (Application::KIND, a.id)),
                    )
                    .collect();
                for (kind, holder) in holders {
                    self.warn(ReferenceIntegrityWarning::new(
                        kind,
                        holder,
                        ParentProfile::KIND,
                        removed.id,
                        format!("parent {} was removed", email),
                    ));
                }
                Ok(None)
            }
            other => self.parents.reconcile(other),
        }
    }
}

impl Reconcile<Application> for Portal {
    fn store(&self) -> &ResourceStore<Application> {
        &self.applications
    }

    fn reconcile(&mut self, change: Change<Application>) -> Result<Option<Application>, TableError> {
        self.applications.reconcile(change)
    }
}

impl Portal {
    /// Moves every child of a removed classroom to "unassigned".
    ///
    /// A removed classroom always had a zero student count, so any student
    /// still pointing at it means the count had drifted.
    fn detach_classroom(&mut self, removed: &Classroom) {
        let mut drifted = Vec::new();
        for student in self.students.iter_mut().filter(|s| s.classroom_id == removed.id) {
            student.classroom_id = ResourceId::UNASSIGNED;
            drifted.push(student.id);
        }
        let mut applications = 0;
        for app in self.applications.iter_mut().filter(|a| a.classroom_id == removed.id) {
            app.classroom_id = ResourceId::UNASSIGNED;
            applications += 1;
        }
        if applications > 0 {
            log::info!(
                "classroom {} removed, {} applications moved to unassigned",
                removed.name,
                applications
            );
        }
        if removed.student_count == 0 {
            for student_id in drifted {
                self.warn(ReferenceIntegrityWarning::new(
                    StudentForms::KIND,
                    student_id,
                    Classroom::KIND,
                    removed.id,
                    format!("still assigned to {} although its student count was 0", removed.name),
                ));
            }
        }
    }

    /// Student rows and applications filed under `email` as primary parent.
    pub(crate) fn children_of(&self, email: &str) -> usize {
        let email = email.trim();
        let students = self
            .students
            .iter()
            .filter(|s| s.parent_email.trim().eq_ignore_ascii_case(email))
            .count();
        let applications = self
            .applications
            .iter()
            .filter(|a| a.primary_email.trim().eq_ignore_ascii_case(email))
            .count();
        students + applications
    }

    /// Points every student and application of `from` at `to`.
    fn rewrite_parent_email(&mut self, from: &str, to: &str) {
        let from = from.trim();
        let mut touched = 0;
        for student in self
            .students
            .iter_mut()
            .filter(|s| s.parent_email.trim().eq_ignore_ascii_case(from))
        {
            student.parent_email = to.to_string();
            touched += 1;
        }
        for app in self.applications.iter_mut() {
            if app.primary_email.trim().eq_ignore_ascii_case(from) {
                app.primary_email = to.to_string();
                touched += 1;
            }
            if app.additional_parent_email.trim().eq_ignore_ascii_case(from) {
                app.additional_parent_email = to.to_string();
                touched += 1;
            }
        }
        log::info!("parent email {} changed to {}, {} references rewritten", from, to, touched);
    }

    /// Students and applications whose parent email matches no profile.
    /// Second-parent addresses need no profile and are not checked.
    pub(crate) fn orphaned_by_email(&self) -> Vec<ReferenceIntegrityWarning> {
        let known = |email: &str| {
            self.parents
                .iter()
                .any(|p| p.email.trim().eq_ignore_ascii_case(email.trim()))
        };
        let students = self
            .students
            .iter()
            .filter(|s| !known(&s.parent_email))
            .map(|s| {
                ReferenceIntegrityWarning::new(
                    StudentForms::KIND,
                    s.id,
                    ParentProfile::KIND,
                    ResourceId::UNASSIGNED,
                    format!("no parent with email {}", s.parent_email.trim()),
                )
            });
        let applications = self
            .applications
            .iter()
            .filter(|a| !known(&a.primary_email))
            .map(|a| {
                ReferenceIntegrityWarning::new(
                    Application::KIND,
                    a.id,
                    ParentProfile::KIND,
                    ResourceId::UNASSIGNED,
                    format!("no parent with email {}", a.primary_email.trim()),
                )
            });
        students.chain(applications).collect()
    }

    /// Strips a removed form from every classroom and student.
    fn detach_form(&mut self, form_id: ResourceId) {
        let mut touched = 0;
        for room in self.classrooms.iter_mut() {
            let before = room.form_ids.len();
            room.form_ids.retain(|id| *id != form_id);
            touched += before - room.form_ids.len();
        }
        for student in self.students.iter_mut() {
            let before = student.form_ids.len();
            student.form_ids.retain(|id| *id != form_id);
            touched += before - student.form_ids.len();
        }
        log::debug!("form {} removed from {} assignments", form_id, touched);
    }

    fn adjust_student_count(&mut self, classroom_id: ResourceId, delta: i64, student_id: ResourceId) {
        if !classroom_id.is_assigned() {
            return;
        }
        let warning = match self.classrooms.get_mut(classroom_id) {
            Some(room) => {
                let next = i64::from(room.student_count) + delta;
                room.student_count = next.clamp(0, i64::from(u32::MAX)) as u32;
                (next < 0).then(|| {
                    ReferenceIntegrityWarning::new(
                        StudentForms::KIND,
                        student_id,
                        Classroom::KIND,
                        classroom_id,
                        format!("student count of {} would drop below 0", room.name),
                    )
                })
            }
            None => Some(ReferenceIntegrityWarning::new(
                StudentForms::KIND,
                student_id,
                Classroom::KIND,
                classroom_id,
                "classroom not found while adjusting its student count",
            )),
        };
        if let Some(warning) = warning {
            self.warn(warning);
        }
    }
}
