//! The portal aggregate: one store per entity kind, plus everything that
//! spans kinds (cascades, name resolution, statistics).
//!
//! `Portal` implements [`Reconcile`] for every kind, so the same cascade
//! code runs in the backend when a request commits and in a browser page
//! when the backend confirms a change.

mod actions;
mod cascade;
pub mod rows;
pub mod seed;
pub mod stats;

pub use cascade::References;
pub use rows::{
    ApplicationRow, ClassroomRow, StudentFormRow, UNASSIGNED_LABEL, application_pipeline,
    change_type_options, classroom_pipeline, form_pipeline, parent_pipeline,
    student_form_pipeline,
};
pub use stats::{
    ApplicationStats, ChildSummary, ClassroomStats, DashboardSummary, FormProgress,
    ParentDashboard, ParentStats,
};

use crate::model::{Application, Classroom, FormTemplate, ParentProfile, StudentForms};
use crate::table::{
    Change, Reconcile, ReferenceIntegrityWarning, Resource, ResourceId, ResourceStore, TableError,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portal {
    classrooms: ResourceStore<Classroom>,
    forms: ResourceStore<FormTemplate>,
    students: ResourceStore<StudentForms>,
    parents: ResourceStore<ParentProfile>,
    applications: ResourceStore<Application>,
    warnings: Vec<ReferenceIntegrityWarning>,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classrooms(&self) -> &ResourceStore<Classroom> {
        &self.classrooms
    }

    pub fn forms(&self) -> &ResourceStore<FormTemplate> {
        &self.forms
    }

    pub fn students(&self) -> &ResourceStore<StudentForms> {
        &self.students
    }

    pub fn parents(&self) -> &ResourceStore<ParentProfile> {
        &self.parents
    }

    pub fn applications(&self) -> &ResourceStore<Application> {
        &self.applications
    }

    /// Store of kind `R`.
    pub fn store_of<R: Resource>(&self) -> &ResourceStore<R>
    where
        Self: Reconcile<R>,
    {
        <Self as Reconcile<R>>::store(self)
    }

    /// Replaces a whole collection, as after a fetch.
    pub fn load<R: Resource>(&mut self, items: Vec<R>) -> Result<(), TableError>
    where
        Self: Reconcile<R>,
    {
        self.reconcile(Change::Loaded(items)).map(|_| ())
    }

    /// Stores a new resource under a freshly assigned id. Fields the portal
    /// derives itself are reset first.
    pub fn create<R: Resource>(&mut self, mut draft: R) -> Result<R, TableError>
    where
        Self: Reconcile<R> + References<R>,
    {
        draft.sanitize_new();
        self.insert(draft)
    }

    /// [`Portal::create`] for records the portal built itself.
    pub(crate) fn insert<R: Resource>(&mut self, mut draft: R) -> Result<R, TableError>
    where
        Self: Reconcile<R> + References<R>,
    {
        draft.set_id(ResourceId::UNASSIGNED);
        draft.validate()?;
        self.check_references(&draft)?;
        let stored = self.reconcile(Change::Created(draft))?;
        stored.ok_or_else(|| TableError::validation(format!("{} was not stored", R::LABEL)))
    }

    pub fn update<R: Resource>(&mut self, id: ResourceId, patch: &R::Patch) -> Result<R, TableError>
    where
        Self: Reconcile<R> + References<R>,
    {
        let updated = self.store_of::<R>().preview_update(id, patch)?;
        self.check_references(&updated)?;
        let stored = self.reconcile(Change::Updated(updated))?;
        stored.ok_or_else(|| TableError::not_found(R::KIND, id))
    }

    /// Removes a resource after its delete preconditions pass and cascades
    /// the removal into dependent collections.
    pub fn delete<R: Resource>(&mut self, id: ResourceId) -> Result<R, TableError>
    where
        Self: Reconcile<R> + References<R>,
    {
        let removed = self.store_of::<R>().require(id)?.clone();
        removed.validate_delete()?;
        self.check_delete(&removed)?;
        self.reconcile(Change::Removed(id))?;
        Ok(removed)
    }

    /// Warnings raised by cascades since the last [`Portal::take_warnings`].
    pub fn warnings(&self) -> &[ReferenceIntegrityWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ReferenceIntegrityWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: ReferenceIntegrityWarning) {
        self.warnings.push(warning.logged());
    }

    /// Scans every relation for ids that no longer resolve.
    pub fn integrity_warnings(&self) -> Vec<ReferenceIntegrityWarning> {
        let mut found = Vec::new();
        for room in self.classrooms.iter() {
            for form_id in room.form_ids.iter().filter(|id| !self.forms.contains(**id)) {
                found.push(ReferenceIntegrityWarning::new(
                    Classroom::KIND,
                    room.id,
                    FormTemplate::KIND,
                    *form_id,
                    "required form does not exist",
                ));
            }
        }
        for student in self.students.iter() {
            if student.classroom_id.is_assigned() && !self.classrooms.contains(student.classroom_id)
            {
                found.push(ReferenceIntegrityWarning::new(
                    StudentForms::KIND,
                    student.id,
                    Classroom::KIND,
                    student.classroom_id,
                    "classroom does not exist",
                ));
            }
            for form_id in student.form_ids.iter().filter(|id| !self.forms.contains(**id)) {
                found.push(ReferenceIntegrityWarning::new(
                    StudentForms::KIND,
                    student.id,
                    FormTemplate::KIND,
                    *form_id,
                    "assigned form does not exist",
                ));
            }
        }
        for app in self.applications.iter() {
            if app.classroom_id.is_assigned() && !self.classrooms.contains(app.classroom_id) {
                found.push(ReferenceIntegrityWarning::new(
                    Application::KIND,
                    app.id,
                    Classroom::KIND,
                    app.classroom_id,
                    "classroom does not exist",
                ));
            }
        }
        found.extend(self.orphaned_by_email());
        found.into_iter().map(ReferenceIntegrityWarning::logged).collect()
    }
}
