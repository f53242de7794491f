use common::model::{ChangeType, FormTemplate};
use common::portal::form_pipeline;
use common::table::paginate::page;
use common::table::{FilterCriteria, PageCursor, ResourceId, ResourceStore};
use proptest::prelude::*;

/// Generates a form with an unassigned id, a short name and any change type.
fn arb_form() -> impl Strategy<Value = FormTemplate> {
    let change_type = prop_oneof![
        Just(ChangeType::Default),
        Just(ChangeType::Available),
        Just(ChangeType::Active),
        Just(ChangeType::Archive),
    ];
    ("[a-zA-Z ]{1,12}", change_type).prop_map(|(name, change_type)| FormTemplate {
        id: ResourceId::UNASSIGNED,
        name: format!("F{}", name),
        change_type,
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    let status = prop_oneof![
        Just("All"),
        Just("Default"),
        Just("Available"),
        Just("Active"),
        Just("Archive"),
    ];
    ("[a-z ]{0,3}", status)
        .prop_map(|(search, status)| FilterCriteria::new().with_search(search).with_status(status))
}

proptest! {
    #[test]
    fn filtering_is_an_idempotent_ordered_subset(
        forms in prop::collection::vec(arb_form(), 0..40),
        criteria in arb_criteria(),
    ) {
        let pipeline = form_pipeline();
        let once: Vec<FormTemplate> = pipeline.apply(&forms, &criteria).into_iter().cloned().collect();

        let mut cursor = 0;
        for hit in &once {
            let pos = forms[cursor..].iter().position(|f| f == hit);
            prop_assert!(pos.is_some());
            cursor += pos.unwrap_or_default() + 1;
        }

        let twice: Vec<FormTemplate> = pipeline.apply(&once, &criteria).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn pages_are_disjoint_and_exhaustive(len in 0usize..120, page_size in 1usize..15) {
        let items: Vec<usize> = (0..len).collect();
        let total_pages = page(&items, page_size, 1).total_pages();
        prop_assert!(total_pages >= 1);

        let mut seen = Vec::new();
        for number in 1..=total_pages {
            seen.extend(page(&items, page_size, number).items.into_iter().copied());
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn cursor_never_leaves_the_page_range(
        len in 0usize..60,
        moves in prop::collection::vec(0u8..3, 0..30),
        target in 0usize..20,
    ) {
        let mut cursor = PageCursor::new(5);
        for m in moves {
            match m {
                0 => { cursor.next(len); }
                1 => { cursor.previous(); }
                _ => { cursor.go_to(target, len); }
            }
            let bounds = cursor.bounds(len);
            prop_assert!(cursor.current() >= 1);
            prop_assert!(cursor.current() <= bounds.total_pages);
        }
    }

    #[test]
    fn add_yields_exactly_one_new_unique_id(forms in prop::collection::vec(arb_form(), 0..20)) {
        let mut store = ResourceStore::from_vec(forms).unwrap();
        let before: Vec<ResourceId> = store.iter().map(|f| f.id).collect();

        let added = store.add(FormTemplate::new("Photo Release", ChangeType::Active)).unwrap();

        prop_assert_eq!(store.len(), before.len() + 1);
        prop_assert!(!before.contains(&added.id));
        prop_assert_eq!(store.iter().filter(|f| f.id == added.id).count(), 1);
    }

    #[test]
    fn removed_ids_are_gone(forms in prop::collection::vec(arb_form(), 1..20), pick in any::<prop::sample::Index>()) {
        let mut store = ResourceStore::from_vec(forms).unwrap();
        let id = store.list()[pick.index(store.len())].id;
        store.remove(id).unwrap();
        prop_assert!(store.iter().all(|f| f.id != id));
    }
}
