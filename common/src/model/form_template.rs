use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::{Resource, ResourceId, TableError};

/// Lifecycle tag of a form in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChangeType {
    Default,
    Available,
    #[default]
    Active,
    Archive,
}

impl ChangeType {
    pub const ALL: [ChangeType; 4] = [
        ChangeType::Default,
        ChangeType::Available,
        ChangeType::Active,
        ChangeType::Archive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Default => "Default",
            ChangeType::Available => "Available",
            ChangeType::Active => "Active",
            ChangeType::Archive => "Archive",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeType::ALL
            .into_iter()
            .find(|ct| ct.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TableError::validation(format!("Unknown change type `{}`", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormTemplate {
    #[serde(default)]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormTemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
}

impl FormTemplate {
    pub fn new(name: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            id: ResourceId::UNASSIGNED,
            name: name.into(),
            change_type,
        }
    }
}

impl Resource for FormTemplate {
    type Patch = FormTemplatePatch;
    const KIND: &'static str = "form-templates";
    const LABEL: &'static str = "Form";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn set_id(&mut self, id: ResourceId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: &FormTemplatePatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(change_type) = patch.change_type {
            self.change_type = change_type;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_type_parses_any_casing() {
        assert_eq!("archive".parse::<ChangeType>().unwrap(), ChangeType::Archive);
        assert!("All".parse::<ChangeType>().is_err());
    }

    #[test]
    fn serialises_as_display_name() {
        let form = FormTemplate::new("Medical Form", ChangeType::Available);
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["change_type"], "Available");
    }
}
