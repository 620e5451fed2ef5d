//! Property tests over random command sequences.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tidy::{NewTask, TaskId, TodoAction, TodoEnvironment, TodoReducer, TodoState, DEFAULT_STORAGE_KEY};
use tidy_core::reducer::Reducer;
use tidy_testing::InMemoryKeyValueStore;

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Toggle(u64),
    Delete(u64),
    ShowHidden(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[a-z ]{0,12}".prop_map(Op::Add),
        2 => (0u64..16).prop_map(Op::Toggle),
        1 => (0u64..16).prop_map(Op::Delete),
        1 => any::<bool>().prop_map(Op::ShowHidden),
    ]
}

impl Op {
    fn into_action(self) -> TodoAction {
        match self {
            Self::Add(text) => TodoAction::AddTask { draft: NewTask::new(text) },
            Self::Toggle(id) => TodoAction::ToggleComplete { id: TaskId::new(id) },
            Self::Delete(id) => TodoAction::DeleteTask { id: TaskId::new(id) },
            Self::ShowHidden(show) => TodoAction::SetShowHidden { show },
        }
    }
}

/// Reduce each op in turn; write effects are dropped unrun
fn apply(ops: Vec<Op>) -> TodoState {
    let env = TodoEnvironment::new(Arc::new(InMemoryKeyValueStore::new()), DEFAULT_STORAGE_KEY);
    let reducer = TodoReducer::new();
    let mut state = TodoState::new();
    for op in ops {
        drop(reducer.reduce(&mut state, op.into_action(), &env));
    }
    state
}

proptest! {
    #[test]
    fn added_tasks_get_distinct_ids(texts in prop::collection::vec("[a-z]{1,8}", 0..40)) {
        let count = texts.len();
        let state = apply(texts.into_iter().map(Op::Add).collect());

        let ids: HashSet<_> = state.tasks.iter().map(|task| task.id).collect();
        prop_assert_eq!(ids.len(), count);
        prop_assert_eq!(state.count(), count);
    }

    #[test]
    fn ids_stay_unique_under_any_sequence(ops in prop::collection::vec(op(), 0..60)) {
        let state = apply(ops);

        let ids: HashSet<_> = state.tasks.iter().map(|task| task.id).collect();
        prop_assert_eq!(ids.len(), state.tasks.len());
        prop_assert!(state.tasks.iter().all(|task| task.id.value() < state.next_id));
    }

    #[test]
    fn summary_stays_within_bounds(ops in prop::collection::vec(op(), 0..60)) {
        let state = apply(ops);
        let summary = state.summary();

        prop_assert!(summary.completed <= summary.total);
        prop_assert_eq!(summary.total, state.tasks.len());
        prop_assert!((0.0..=1.0).contains(&summary.completion_ratio()));
        prop_assert!(state.tasks.iter().all(|task| task.hidden() == task.completed));
    }

    #[test]
    fn double_toggle_is_identity(ops in prop::collection::vec(op(), 0..30), target in 0u64..16) {
        let before = apply(ops.clone());

        let mut twice = ops;
        twice.push(Op::Toggle(target));
        twice.push(Op::Toggle(target));
        let after = apply(twice);

        prop_assert_eq!(before.tasks, after.tasks);
    }

    #[test]
    fn blank_text_never_adds(text in "[ \t\n]{0,6}") {
        let state = apply(vec![Op::Add(text)]);
        prop_assert!(state.tasks.is_empty());
        prop_assert_eq!(state.revision, 0);
    }
}
