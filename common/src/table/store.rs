//! In-memory collection for one entity kind.
//!
//! The store is the single source of truth for a page (or for the backend
//! process). Insertion order is preserved; ids are unique at all times.

use std::collections::HashSet;

use crate::table::error::TableError;
use crate::table::resource::{Resource, ResourceId};

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceStore<R: Resource> {
    items: Vec<R>,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded collection, see [`ResourceStore::replace_all`].
    pub fn from_vec(items: Vec<R>) -> Result<Self, TableError> {
        let mut store = Self::new();
        store.replace_all(items)?;
        Ok(store)
    }

    pub fn list(&self) -> &[R] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ResourceId) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.get(id).is_some()
    }

    /// Lookup that reports a missing id as `NotFound`.
    pub fn require(&self, id: ResourceId) -> Result<&R, TableError> {
        self.get(id).ok_or_else(|| TableError::not_found(R::KIND, id))
    }

    /// Next id under the "max numeric id + 1" policy.
    pub fn next_id(&self) -> ResourceId {
        self.items
            .iter()
            .map(|r| r.id())
            .max()
            .unwrap_or(ResourceId::UNASSIGNED)
            .next()
    }

    /// Appends a resource, assigning an id when it has none.
    ///
    /// A server-assigned id is kept as long as no live resource uses it.
    pub fn add(&mut self, mut resource: R) -> Result<R, TableError> {
        resource.validate()?;
        if !resource.id().is_assigned() {
            resource.set_id(self.next_id());
        } else if self.contains(resource.id()) {
            return Err(TableError::validation(format!(
                "{} id {} is already in use",
                R::LABEL,
                resource.id()
            )));
        }
        self.items.push(resource.clone());
        Ok(resource)
    }

    /// Returns what `update` would store, without storing it.
    pub fn preview_update(&self, id: ResourceId, patch: &R::Patch) -> Result<R, TableError> {
        let current = self.require(id)?;
        current.validate_patch(patch)?;
        let mut updated = current.clone();
        updated.apply_patch(patch);
        updated.set_id(id);
        updated.validate()?;
        Ok(updated)
    }

    /// Merges `patch` into the resource with `id`.
    ///
    /// The stored resource is left untouched when the merged result fails
    /// validation.
    pub fn update(&mut self, id: ResourceId, patch: &R::Patch) -> Result<R, TableError> {
        let updated = self.preview_update(id, patch)?;
        self.replace(updated)
    }

    /// Swaps in a full replacement for the resource with the same id.
    pub fn replace(&mut self, resource: R) -> Result<R, TableError> {
        resource.validate()?;
        let id = resource.id();
        let slot = self
            .items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| TableError::not_found(R::KIND, id))?;
        *slot = resource.clone();
        Ok(resource)
    }

    pub fn remove(&mut self, id: ResourceId) -> Result<R, TableError> {
        let position = self
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| TableError::not_found(R::KIND, id))?;
        Ok(self.items.remove(position))
    }

    /// Replaces the whole collection, e.g. after a fetch.
    ///
    /// Resources without an id get one; duplicate ids reject the whole load
    /// and leave the current collection in place.
    pub fn replace_all(&mut self, items: Vec<R>) -> Result<(), TableError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in items.iter().filter(|r| r.id().is_assigned()) {
            if !seen.insert(item.id()) {
                return Err(TableError::validation(format!(
                    "duplicate {} id {}",
                    R::KIND,
                    item.id()
                )));
            }
        }

        let mut next = seen
            .iter()
            .copied()
            .max()
            .unwrap_or(ResourceId::UNASSIGNED)
            .next();
        let mut loaded = Vec::with_capacity(items.len());
        for mut item in items {
            if !item.id().is_assigned() {
                item.set_id(next);
                next = next.next();
            }
            loaded.push(item);
        }
        self.items = loaded;
        Ok(())
    }

    /// Mutable access for cascades that rewrite dependent fields in place.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.items.iter_mut()
    }

    pub(crate) fn get_mut(&mut self, id: ResourceId) -> Option<&mut R> {
        self.items.iter_mut().find(|r| r.id() == id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Note {
        pub id: ResourceId,
        pub name: String,
    }

    #[derive(Debug, Clone, Default)]
    pub(crate) struct NotePatch {
        pub name: Option<String>,
    }

    impl Resource for Note {
        type Patch = NotePatch;
        const KIND: &'static str = "notes";
        const LABEL: &'static str = "Note";

        fn id(&self) -> ResourceId {
            self.id
        }

        fn set_id(&mut self, id: ResourceId) {
            self.id = id;
        }

        fn display_name(&self) -> &str {
            &self.name
        }

        fn apply_patch(&mut self, patch: &NotePatch) {
            if let Some(name) = &patch.name {
                self.name = name.trim().to_string();
            }
        }
    }

    pub(crate) fn note(id: u64, name: &str) -> Note {
        Note {
            id: ResourceId(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut store = ResourceStore::from_vec(vec![note(3, "a"), note(7, "b")]).unwrap();
        let added = store.add(note(0, "c")).unwrap();
        assert_eq!(added.id, ResourceId(8));
        assert_eq!(store.list().last().unwrap().name, "c");
    }

    #[test]
    fn add_rejects_blank_names_and_duplicate_ids() {
        let mut store = ResourceStore::from_vec(vec![note(1, "a")]).unwrap();
        assert!(matches!(
            store.add(note(0, "   ")),
            Err(TableError::Validation(msg)) if msg == "Please enter a note name"
        ));
        assert!(matches!(store.add(note(1, "b")), Err(TableError::Validation(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_merges_and_keeps_the_old_value_on_invalid_patch() {
        let mut store = ResourceStore::from_vec(vec![note(1, "a")]).unwrap();
        let updated = store
            .update(ResourceId(1), &NotePatch { name: Some("b".into()) })
            .unwrap();
        assert_eq!(updated.name, "b");

        let err = store
            .update(ResourceId(1), &NotePatch { name: Some(" ".into()) })
            .unwrap_err();
        assert!(matches!(err, TableError::Validation(_)));
        assert_eq!(store.get(ResourceId(1)).unwrap().name, "b");
    }

    #[test]
    fn update_and_remove_report_missing_ids() {
        let mut store = ResourceStore::<Note>::new();
        assert_eq!(
            store.update(ResourceId(9), &NotePatch::default()).unwrap_err(),
            TableError::not_found("notes", ResourceId(9))
        );
        assert_eq!(
            store.remove(ResourceId(9)).unwrap_err(),
            TableError::not_found("notes", ResourceId(9))
        );
    }

    #[test]
    fn replace_all_rejects_duplicates_without_touching_state() {
        let mut store = ResourceStore::from_vec(vec![note(1, "a")]).unwrap();
        let err = store
            .replace_all(vec![note(2, "x"), note(2, "y")])
            .unwrap_err();
        assert!(matches!(err, TableError::Validation(_)));
        assert_eq!(store.list(), &[note(1, "a")]);
    }

    #[test]
    fn replace_all_fills_in_missing_ids() {
        let store = ResourceStore::from_vec(vec![note(0, "x"), note(5, "y"), note(0, "z")]).unwrap();
        let ids: Vec<u64> = store.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![6, 5, 7]);
    }
}
