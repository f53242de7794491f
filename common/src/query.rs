//! Deep-link parameters read from `location.search`.
//!
//! `?id=` pre-selects a classroom on the admin tables, and a parent (by
//! email) on the parent dashboard. Values are percent-decoded.

use crate::model::Classroom;
use crate::table::{ResourceId, ResourceStore};

/// Value of `key` in a query string such as `?id=3&tab=forms`.
///
/// The leading `?` is optional, `+` is read as a space, and a value that is
/// not valid percent-encoding is dropped.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .and_then(|(_, raw)| {
            let raw = raw.replace('+', " ");
            match urlencoding::decode(&raw) {
                Ok(value) => Some(value.trim().to_string()),
                Err(e) => {
                    log::warn!("ignoring undecodable `{}` parameter: {}", key, e);
                    None
                }
            }
        })
        .filter(|value| !value.is_empty())
}

pub fn deep_link_id(search: &str) -> Option<String> {
    query_param(search, "id")
}

/// Classroom named by `?id=`, given either as its numeric id or its name.
pub fn classroom_from_query(search: &str, classrooms: &ResourceStore<Classroom>) -> Option<ResourceId> {
    resolve_classroom(&deep_link_id(search)?, classrooms)
}

/// Id of the classroom `value` refers to. An existing numeric id wins over
/// a classroom whose name happens to be that number.
pub fn resolve_classroom(value: &str, classrooms: &ResourceStore<Classroom>) -> Option<ResourceId> {
    let value = value.trim();
    if let Ok(id) = value.parse::<ResourceId>() {
        if classrooms.contains(id) {
            return Some(id);
        }
    }
    classrooms
        .iter()
        .find(|room| room.name.trim().eq_ignore_ascii_case(value))
        .map(|room| room.id)
}

/// Query string selecting a parent on the parent dashboard.
pub fn parent_dashboard_link(email: &str) -> String {
    format!("/parent-dashboard?id={}", urlencoding::encode(email.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_encoded_emails() {
        assert_eq!(
            deep_link_id("?id=emma.johnson%40email.com"),
            Some("emma.johnson@email.com".to_string())
        );
        assert_eq!(query_param("tab=forms&id=a+b", "id"), Some("a b".to_string()));
    }

    #[test]
    fn missing_or_empty_values_are_none() {
        assert_eq!(deep_link_id(""), None);
        assert_eq!(deep_link_id("?id="), None);
        assert_eq!(deep_link_id("?id"), None);
        assert_eq!(deep_link_id("?other=1"), None);
    }

    #[test]
    fn classroom_resolves_by_id_or_name() {
        let mut butterfly = Classroom::new("Butterfly");
        butterfly.id = ResourceId(1);
        let mut purple = Classroom::new("Purple");
        purple.id = ResourceId(2);
        let store = ResourceStore::from_vec(vec![butterfly, purple]).unwrap();

        assert_eq!(classroom_from_query("?id=2", &store), Some(ResourceId(2)));
        assert_eq!(classroom_from_query("?id=butterfly", &store), Some(ResourceId(1)));
        assert_eq!(classroom_from_query("?id=9", &store), None);
    }

    #[test]
    fn numeric_names_do_not_shadow_ids() {
        let mut butterfly = Classroom::new("Butterfly");
        butterfly.id = ResourceId(1);
        let mut numbered = Classroom::new("1");
        numbered.id = ResourceId(2);
        let store = ResourceStore::from_vec(vec![butterfly, numbered]).unwrap();

        assert_eq!(resolve_classroom("1", &store), Some(ResourceId(1)));
        assert_eq!(resolve_classroom(" Butterfly ", &store), Some(ResourceId(1)));
    }

    #[test]
    fn dashboard_links_round_trip() {
        let link = parent_dashboard_link("a+b@email.com");
        let search = link.split_once('?').map(|(_, q)| q).unwrap_or_default();
        assert_eq!(deep_link_id(search), Some("a+b@email.com".to_string()));
    }
}
