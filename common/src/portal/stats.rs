//! Counters shown above the admin tables and on the dashboards.

use serde::{Deserialize, Serialize};

use crate::model::{
    Application, Classroom, FormStatus, InviteStatus, ParentProfile, ParentStatus,
};
use crate::portal::Portal;
use crate::table::ResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassroomStats {
    pub total_classrooms: usize,
    pub total_students: u32,
    /// Every classroom except the reserved `Unassign` bucket.
    pub active_classrooms: usize,
}

impl ClassroomStats {
    pub fn of(classrooms: &[Classroom]) -> Self {
        Self {
            total_classrooms: classrooms.len(),
            total_students: classrooms.iter().map(|room| room.student_count).sum(),
            active_classrooms: classrooms.iter().filter(|room| !room.is_reserved()).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
}

impl ApplicationStats {
    pub fn of<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        applications.into_iter().fold(Self::default(), |mut acc, app| {
            acc.total += 1;
            match app.form_status {
                FormStatus::Completed => acc.completed += 1,
                FormStatus::Incomplete => acc.incomplete += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentStats {
    pub active: usize,
    pub archived: usize,
    /// Parents who accepted their invitation.
    pub invited: usize,
}

impl ParentStats {
    pub fn of(parents: &[ParentProfile]) -> Self {
        Self {
            active: parents.iter().filter(|p| p.status == ParentStatus::Active).count(),
            archived: parents.iter().filter(|p| p.status == ParentStatus::Archive).count(),
            invited: parents
                .iter()
                .filter(|p| p.invite_status == InviteStatus::Active)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub classrooms: ClassroomStats,
    pub applications: ApplicationStats,
    pub parents: ParentStats,
    pub forms: usize,
}

/// Required forms of a family, and how many of them are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormProgress {
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
    /// Whole percent, 0 when nothing is required.
    pub progress: u32,
}

impl FormProgress {
    pub fn new(total: usize, completed: usize) -> Self {
        let completed = completed.min(total);
        let progress = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            total,
            completed,
            incomplete: total - completed,
            progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub application_id: ResourceId,
    pub child_name: String,
    pub classroom: String,
    pub form_status: FormStatus,
    pub required_forms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentDashboard {
    pub email: String,
    pub parent: Option<ParentProfile>,
    pub children: Vec<ChildSummary>,
    pub progress: FormProgress,
}

impl Portal {
    pub fn classroom_stats(&self) -> ClassroomStats {
        ClassroomStats::of(self.classrooms().list())
    }

    pub fn application_stats(&self) -> ApplicationStats {
        ApplicationStats::of(self.applications().iter())
    }

    pub fn parent_stats(&self) -> ParentStats {
        ParentStats::of(self.parents().list())
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        DashboardSummary {
            classrooms: self.classroom_stats(),
            applications: self.application_stats(),
            parents: self.parent_stats(),
            forms: self.forms().len(),
        }
    }

    /// Forms a child must complete: the forms assigned to their row in the
    /// student repository, or their classroom's forms when no row exists.
    fn required_forms(&self, app: &Application) -> Vec<ResourceId> {
        let first_name = app.child_first_name.trim();
        self.students()
            .iter()
            .find(|s| {
                s.child_name.trim().eq_ignore_ascii_case(first_name)
                    && app.belongs_to(&s.parent_email)
            })
            .map(|s| s.form_ids.clone())
            .or_else(|| {
                self.classrooms()
                    .get(app.classroom_id)
                    .map(|room| room.form_ids.clone())
            })
            .unwrap_or_default()
    }

    /// Children of the parent with `email` and their form progress.
    pub fn parent_dashboard(&self, email: &str) -> ParentDashboard {
        let email = email.trim();
        let parent = self
            .parents()
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email))
            .cloned();

        let mut total = 0;
        let mut completed = 0;
        let children = self
            .applications()
            .iter()
            .filter(|app| app.belongs_to(email))
            .map(|app| {
                let required = self.required_forms(app);
                total += required.len();
                if app.form_status == FormStatus::Completed {
                    completed += required.len();
                }
                ChildSummary {
                    application_id: app.id,
                    child_name: app.child_name(),
                    classroom: self.classroom_name(app.classroom_id).to_string(),
                    form_status: app.form_status,
                    required_forms: self.form_names(&required),
                }
            })
            .collect();

        ParentDashboard {
            email: email.to_string(),
            parent,
            children,
            progress: FormProgress::new(total, completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::seed::demo_portal;

    #[test]
    fn reserved_classroom_is_not_active() {
        let stats = demo_portal().unwrap().classroom_stats();
        assert_eq!(stats.total_classrooms, 5);
        assert_eq!(stats.active_classrooms, 4);
        assert_eq!(stats.total_students, 55);
    }

    #[test]
    fn progress_rounds_to_whole_percent() {
        assert_eq!(FormProgress::new(4, 2).progress, 50);
        assert_eq!(FormProgress::new(3, 1).progress, 33);
        assert_eq!(FormProgress::new(0, 0).progress, 0);
        assert_eq!(FormProgress::new(2, 5).incomplete, 0);
    }

    #[test]
    fn parent_dashboard_counts_required_forms() {
        let portal = demo_portal().unwrap();
        let dashboard = portal.parent_dashboard("emma.johnson@email.com");
        assert_eq!(dashboard.children.len(), 1);
        assert_eq!(dashboard.children[0].classroom, "Butterfly");
        assert_eq!(dashboard.progress.total, 2);
        assert_eq!(dashboard.progress.progress, 100);

        let unknown = portal.parent_dashboard("nobody@email.com");
        assert!(unknown.parent.is_none());
        assert!(unknown.children.is_empty());
    }
}
