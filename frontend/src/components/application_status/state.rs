use common::model::Application;
use common::portal::{application_pipeline, ApplicationRow, Portal};

use crate::components::section::Section;

pub struct ApplicationStatus {
    pub portal: Portal,
    pub loaded: bool,
    pub applications: Section<Application, ApplicationRow>,
}

impl ApplicationStatus {
    pub fn new() -> Self {
        Self {
            portal: Portal::new(),
            loaded: false,
            applications: Section::new(application_pipeline(), Portal::application_rows),
        }
    }

    pub fn refresh(&mut self) {
        self.applications.refresh(&self.portal);
    }
}
