use std::collections::BTreeSet;

use common::model::ParentProfile;
use common::portal::{parent_pipeline, Portal};
use common::requests::AddChildRequest;
use common::table::ResourceId;

use crate::components::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildField {
    FirstName,
    LastName,
    Classroom,
}

pub struct ParentDetails {
    pub portal: Portal,
    pub loaded: bool,
    pub parents: Section<ParentProfile, ParentProfile>,
    /// Open "add child" dialog, prefilled with the parent's email.
    pub child: Option<AddChildRequest>,
    pub adding_child: bool,
    pub resending: BTreeSet<ResourceId>,
}

fn parent_rows(portal: &Portal) -> Vec<ParentProfile> {
    portal.parents().list().to_vec()
}

impl ParentDetails {
    pub fn new() -> Self {
        Self {
            portal: Portal::new(),
            loaded: false,
            parents: Section::new(parent_pipeline(), parent_rows),
            child: None,
            adding_child: false,
            resending: BTreeSet::new(),
        }
    }

    pub fn refresh(&mut self) {
        self.parents.refresh(&self.portal);
    }

    pub fn set_child_field(&mut self, field: ChildField, value: String) {
        let Some(child) = self.child.as_mut() else {
            return;
        };
        match field {
            ChildField::FirstName => child.first_name = value,
            ChildField::LastName => child.last_name = value,
            ChildField::Classroom => {
                child.classroom_id = value.parse().unwrap_or(ResourceId::UNASSIGNED)
            }
        }
    }
}
