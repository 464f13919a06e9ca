//! Property-based tests for the board partition invariant
//!
//! Random sequences of create, move, update and delete calls are applied to a small
//! board; after every step each task must sit in exactly one column.

use proptest::prelude::*;
use taskdeck_board::{BoardStore, ColumnId, MoveOutcome, MoveSkip, NewTask, TaskId, TaskPatch};

#[derive(Debug, Clone)]
enum Step {
    AddColumn,
    AddTask { column: usize },
    Move { task: usize, column: usize, index: usize },
    Rename { task: usize },
    DeleteTask { task: usize },
    DeleteColumn { column: usize },
    MoveStale { column: usize },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => Just(Step::AddColumn),
        4 => (0..8usize).prop_map(|column| Step::AddTask { column }),
        8 => (0..32usize, 0..8usize, 0..40usize)
            .prop_map(|(task, column, index)| Step::Move { task, column, index }),
        1 => (0..32usize).prop_map(|task| Step::Rename { task }),
        2 => (0..32usize).prop_map(|task| Step::DeleteTask { task }),
        1 => (0..8usize).prop_map(|column| Step::DeleteColumn { column }),
        1 => (0..8usize).prop_map(|column| Step::MoveStale { column }),
    ]
}

/// Pick an element by wrapping index, if any exist
fn pick<T: Clone>(items: &[T], i: usize) -> Option<T> {
    (!items.is_empty()).then(|| items[i % items.len()].clone())
}

fn columns(store: &BoardStore) -> Vec<ColumnId> {
    store
        .projects()
        .flat_map(|p| p.column_ids.iter().cloned())
        .collect()
}

fn tasks(store: &BoardStore) -> Vec<TaskId> {
    columns(store)
        .iter()
        .flat_map(|c| store.column_tasks(c).into_iter().map(|t| t.id.clone()))
        .collect()
}

fn apply(store: &mut BoardStore, step: &Step) {
    let project = store.projects().next().map(|p| p.id.clone());
    let cols = columns(store);
    let ids = tasks(store);
    match step {
        Step::AddColumn => {
            if let Some(project) = project {
                store.create_column(&project, "extra", None);
            }
        }
        Step::AddTask { column } => {
            if let Some(column) = pick(&cols, *column) {
                store.create_task(&column, NewTask::new("task"));
            }
        }
        Step::Move { task, column, index } => {
            if let (Some(task), Some(column)) = (pick(&ids, *task), pick(&cols, *column)) {
                store.move_task(&task, &column, *index);
            }
        }
        Step::Rename { task } => {
            if let Some(task) = pick(&ids, *task) {
                store.update_task(&task, TaskPatch::default().title("renamed"));
            }
        }
        Step::DeleteTask { task } => {
            if let Some(task) = pick(&ids, *task) {
                store.delete_task(&task);
            }
        }
        Step::DeleteColumn { column } => {
            if let Some(column) = pick(&cols, *column) {
                store.delete_column(&column);
            }
        }
        Step::MoveStale { column } => {
            if let Some(column) = pick(&cols, *column) {
                let outcome = store.move_task(&TaskId::from("stale"), &column, 0);
                assert_eq!(outcome, MoveOutcome::Unchanged(MoveSkip::UnknownTask));
            }
        }
    }
}

proptest! {
    /// Property: every task id appears in exactly one column after any sequence
    #[test]
    fn prop_partition_holds(steps in prop::collection::vec(step(), 0..60)) {
        let mut store = BoardStore::with_default_project("Board");
        for step in &steps {
            apply(&mut store, step);
            prop_assert_eq!(store.check_invariants(), Ok(()));
            prop_assert_eq!(tasks(&store).len(), store.task_count());
        }
    }

    /// Property: moving a task away and straight back restores both columns
    #[test]
    fn prop_round_trip_restores_order(
        sizes in (1..6usize, 0..6usize),
        from_pick in 0..6usize,
        to_index in 0..10usize,
    ) {
        let mut store = BoardStore::with_default_project("Board");
        let cols = columns(&store);
        let (a, b) = (cols[0].clone(), cols[1].clone());
        for _ in 0..sizes.0 {
            store.create_task(&a, NewTask::new("a"));
        }
        for _ in 0..sizes.1 {
            store.create_task(&b, NewTask::new("b"));
        }

        let before = store.snapshot().without_timestamps();
        let original_index = from_pick % sizes.0;
        let task = store.column(&a).unwrap().task_ids[original_index].clone();

        store.move_task(&task, &b, to_index);
        store.move_task(&task, &a, original_index);

        prop_assert_eq!(store.snapshot().without_timestamps(), before);
    }

    /// Property: an index past the end always appends
    #[test]
    fn prop_large_index_appends(len in 0..8usize, extra in 0..10_000usize) {
        let mut store = BoardStore::with_default_project("Board");
        let cols = columns(&store);
        for _ in 0..len {
            store.create_task(&cols[1], NewTask::new("b"));
        }
        let task = store.create_task(&cols[0], NewTask::new("mover")).unwrap().id;

        store.move_task(&task, &cols[1], len + extra);

        let order = &store.column(&cols[1]).unwrap().task_ids;
        prop_assert_eq!(order.len(), len + 1);
        prop_assert_eq!(order.last(), Some(&task));
    }
}
