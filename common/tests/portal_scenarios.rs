use std::cell::RefCell;
use std::rc::Rc;

use common::model::{
    Classroom, ClassroomPatch, FormTemplate, FormTemplatePatch, StudentForms,
};
use common::portal::seed::demo_portal;
use common::portal::{Portal, student_form_pipeline};
use common::table::paginate::page;
use common::table::{
    BackingService, FilterCriteria, Mutation, MutationCoordinator, MutationOutcome, Notifier,
    ResourceId, ServiceError, TableError, TableView, Viewport,
};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

#[derive(Clone, Default)]
struct Toasts(Rc<RefCell<Vec<String>>>);

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.0.borrow_mut().push(format!("error: {}", message));
    }
}

/// Backing service running against a second portal, standing in for the
/// REST backend.
struct InMemoryBackend {
    remote: RefCell<Portal>,
    fail: bool,
}

impl InMemoryBackend {
    fn new(remote: Portal) -> Self {
        Self {
            remote: RefCell::new(remote),
            fail: false,
        }
    }

    fn failing(remote: Portal) -> Self {
        Self {
            remote: RefCell::new(remote),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.fail {
            return Err(ServiceError::status(504, "Gateway Timeout"));
        }
        Ok(())
    }
}

fn to_service(err: TableError) -> ServiceError {
    ServiceError::status(400, err.to_string())
}

impl BackingService<Classroom> for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Classroom>, ServiceError> {
        self.check()?;
        Ok(self.remote.borrow().classrooms().list().to_vec())
    }

    async fn create(&self, draft: &Classroom) -> Result<Classroom, ServiceError> {
        self.check()?;
        self.remote.borrow_mut().create(draft.clone()).map_err(to_service)
    }

    async fn update(&self, id: ResourceId, patch: &ClassroomPatch) -> Result<Classroom, ServiceError> {
        self.check()?;
        self.remote.borrow_mut().update::<Classroom>(id, patch).map_err(to_service)
    }

    async fn delete(&self, id: ResourceId) -> Result<(), ServiceError> {
        self.check()?;
        self.remote
            .borrow_mut()
            .delete::<Classroom>(id)
            .map(|_| ())
            .map_err(to_service)
    }
}

fn seeded() -> Portal {
    demo_portal().unwrap()
}

#[test]
fn twenty_three_forms_make_three_desktop_pages() {
    let forms: Vec<FormTemplate> = (1..=23)
        .map(|n| FormTemplate::new(format!("Form {}", n), Default::default()))
        .collect();
    let last = page(&forms, 10, 3);
    assert_eq!(last.total_pages(), 3);
    assert_eq!(last.len(), 3);
    assert_eq!(page(&forms, 10, 5).current_page(), 3);
}

#[test]
fn renamed_form_replaces_the_old_name_everywhere() {
    let mut portal = seeded();
    let admission = portal
        .forms()
        .iter()
        .find(|f| f.name == "Admission Form")
        .map(|f| f.id)
        .unwrap();

    portal
        .update::<FormTemplate>(
            admission,
            &FormTemplatePatch {
                name: Some("Enrollment Intake".into()),
                change_type: None,
            },
        )
        .unwrap();

    let mut old = 0;
    let mut new = 0;
    for forms in portal
        .classroom_rows()
        .into_iter()
        .map(|r| r.forms)
        .chain(portal.student_form_rows().into_iter().map(|r| r.forms))
    {
        old += forms.iter().filter(|f| *f == "Admission Form").count();
        new += forms.iter().filter(|f| *f == "Enrollment Intake").count();
    }
    assert_eq!(old, 0);
    // Every seeded classroom and student carries the admission form.
    assert_eq!(new, 8);
}

#[test]
fn butterfly_search_finds_exactly_the_butterfly_students() {
    let mut portal = seeded();
    // Replace the seeded students with 18, three of them in Butterfly.
    let rooms = [ResourceId(1), ResourceId(2), ResourceId(3), ResourceId(4)];
    let students: Vec<StudentForms> = (1..=18u64)
        .map(|n| StudentForms {
            id: ResourceId(n),
            child_name: format!("Child {}", n),
            classroom_id: if n % 6 == 0 {
                rooms[0]
            } else {
                rooms[1 + (n as usize % 3)]
            },
            parent_email: format!("parent{}@email.com", n),
            form_ids: vec![ResourceId(1)],
        })
        .collect();
    portal.load(students).unwrap();

    let mut view = TableView::new(student_form_pipeline());
    view.set_rows(portal.student_form_rows());
    view.set_search("butterfly");

    let hits: Vec<u64> = view.filtered().iter().map(|row| row.id.0).collect();
    assert_eq!(hits, vec![6, 12, 18]);
    assert_eq!(view.page(Viewport::Full).bounds.summary(), "Showing 1 to 3 of 3 results");
}

#[test]
fn classroom_selector_and_search_combine() {
    let portal = seeded();
    let mut view = TableView::new(student_form_pipeline())
        .with_criteria(FilterCriteria::new().with_selector("classroom", "2"));
    view.set_rows(portal.student_form_rows());
    assert_eq!(view.filtered_len(), 1);
    view.set_search("emma");
    assert_eq!(view.filtered_len(), 0);
}

#[test]
fn deleting_an_occupied_classroom_is_rejected_before_the_call() {
    let mut local = seeded();
    let backend = InMemoryBackend::new(seeded());
    let toasts = Toasts::default();
    let mut coordinator = MutationCoordinator::<Classroom>::new(toasts.clone());
    let before = local.classrooms().clone();

    let err = block_on(coordinator.run(&mut local, &backend, Mutation::Delete(ResourceId(1))))
        .unwrap_err();

    assert!(matches!(err, TableError::Validation(_)));
    assert_eq!(local.classrooms(), &before);
    assert_eq!(backend.remote.borrow().classrooms(), &before);
    assert_eq!(
        *toasts.0.borrow(),
        vec!["error: Cannot delete Butterfly: 15 students are still assigned".to_string()]
    );
}

#[test]
fn timed_out_create_leaves_the_list_unchanged() {
    let mut local = seeded();
    let backend = InMemoryBackend::failing(seeded());
    let toasts = Toasts::default();
    let mut coordinator = MutationCoordinator::<Classroom>::new(toasts.clone());
    let before = local.clone();

    let err = block_on(coordinator.run(
        &mut local,
        &backend,
        Mutation::Create(Classroom::new("Ladybug")),
    ))
    .unwrap_err();

    match err {
        TableError::Service(service) => assert!(service.is_timeout()),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(local, before);
    assert_eq!(
        *toasts.0.borrow(),
        vec!["error: Error creating classroom: Gateway Timeout".to_string()]
    );
}

#[test]
fn confirmed_create_lands_in_both_portals() {
    let mut local = seeded();
    let backend = InMemoryBackend::new(seeded());
    let toasts = Toasts::default();
    let mut coordinator = MutationCoordinator::<Classroom>::new(toasts.clone());

    let outcome = block_on(coordinator.run(
        &mut local,
        &backend,
        Mutation::Create(Classroom::new("Ladybug")),
    ))
    .unwrap();

    let MutationOutcome::Committed { id, .. } = outcome else {
        panic!("create was discarded");
    };
    assert_eq!(local.classroom_name(id), "Ladybug");
    assert_eq!(backend.remote.borrow().classroom_name(id), "Ladybug");
    assert_eq!(*toasts.0.borrow(), vec!["Classroom created successfully!".to_string()]);
}
