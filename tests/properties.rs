//! Property tests for the task store.

use proptest::prelude::*;
use teamtasks::{AuthorFilter, Filter, StatusFilter, TaskStore, ValidationError};

fn field() -> impl Strategy<Value = String> {
    "[ ]{0,2}[A-Za-z][A-Za-z ]{0,10}[ ]{0,2}"
}

fn blank() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

fn populated(entries: &[(String, String, bool)]) -> TaskStore {
    let mut store = TaskStore::new();
    for (text, author, done) in entries {
        let task = store.create_task(text, author).unwrap();
        if *done {
            store.toggle_completed(task.id);
        }
    }
    store
}

proptest! {
    #[test]
    fn create_prepends_exactly_one_pending_task(
        existing in prop::collection::vec((field(), field(), any::<bool>()), 0..8),
        text in field(),
        author in field(),
    ) {
        let mut store = populated(&existing);
        let before = store.len();

        let task = store.create_task(&text, &author).unwrap();

        prop_assert_eq!(store.len(), before + 1);
        prop_assert_eq!(&store.tasks()[0], &task);
        prop_assert!(!task.completed);
        prop_assert_eq!(task.text.as_str(), text.trim());
        prop_assert_eq!(task.author.as_str(), author.trim());
    }

    #[test]
    fn blank_fields_are_rejected_without_mutation(
        existing in prop::collection::vec((field(), field(), any::<bool>()), 0..8),
        text in field(),
        empty in blank(),
        blank_text in any::<bool>(),
    ) {
        let mut store = populated(&existing);
        let before = store.tasks().to_vec();

        let result = if blank_text {
            store.create_task(&empty, &text)
        } else {
            store.create_task(&text, &empty)
        };

        prop_assert_eq!(result, Err(ValidationError::EmptyField));
        prop_assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn toggle_twice_is_identity(
        existing in prop::collection::vec((field(), field(), any::<bool>()), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = populated(&existing);
        let before = store.tasks().to_vec();
        let id = before[pick.index(before.len())].id;

        store.toggle_completed(id);
        store.toggle_completed(id);

        prop_assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn ids_stay_unique(
        ops in prop::collection::vec((field(), any::<bool>()), 1..30),
    ) {
        let mut store = TaskStore::new();
        for (text, delete_first) in &ops {
            if *delete_first && !store.is_empty() {
                let id = store.tasks()[0].id;
                store.delete_task(id);
            }
            store.create_task(text, "Ann").unwrap();
        }

        let mut ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), count);
    }

    #[test]
    fn visible_tasks_is_an_ordered_subsequence(
        existing in prop::collection::vec((field(), field(), any::<bool>()), 0..10),
        query in "[a-zA-Z]{0,3}",
        status in prop::sample::select(vec![StatusFilter::All, StatusFilter::Completed, StatusFilter::Pending]),
    ) {
        let mut store = populated(&existing);
        store.set_filters(Filter::new(query, status, AuthorFilter::All));

        let visible = store.visible_tasks();
        let mut all = store.tasks().iter();
        for task in &visible {
            prop_assert!(store.filter().matches(task));
            prop_assert!(all.any(|t| t == task));
        }
        let expected = store.tasks().iter().filter(|t| store.filter().matches(t)).count();
        prop_assert_eq!(visible.len(), expected);
    }

    #[test]
    fn distinct_authors_has_no_duplicates(
        existing in prop::collection::vec((field(), field(), any::<bool>()), 0..10),
    ) {
        let store = populated(&existing);
        let authors = store.distinct_authors();

        let mut deduped = authors.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), authors.len());
        for task in store.tasks() {
            prop_assert!(authors.contains(&task.author));
        }
    }

    #[test]
    fn begin_then_cancel_edit_changes_nothing(
        existing in prop::collection::vec((field(), field(), any::<bool>()), 1..8),
        pick in any::<prop::sample::Index>(),
        scribble in ".{0,12}",
    ) {
        let mut store = populated(&existing);
        let before = store.tasks().to_vec();
        let id = before[pick.index(before.len())].id;

        store.begin_edit(id);
        store.set_edited_text(&scribble);
        store.set_edited_author(&scribble);
        store.cancel_edit();

        prop_assert_eq!(store.tasks(), before.as_slice());
        prop_assert_eq!(store.editing_id(), None);
    }
}
