//! Property-based tests for the priority queue and the event graph.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use prio_fsm::{FsmError, Machine, Mode, PriorityQueue, QueueError};
use proptest::prelude::*;

const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

prop_compose! {
    fn arbitrary_edge()(
        event in 0..3usize,
        from in 0..NAMES.len(),
        to in 0..NAMES.len(),
    ) -> (String, &'static str, &'static str) {
        (format!("e{event}"), NAMES[from], NAMES[to])
    }
}

fn machine_with(edges: &[(String, &'static str, &'static str)]) -> Machine {
    let machine = Machine::new(Mode::CallerDriven, "a").unwrap();
    for name in NAMES {
        machine.add_state(name);
    }
    for (event, from, to) in edges {
        // Conflicting edges are rejected; the rest form the graph.
        let _ = machine.add_event(event, from, to);
    }
    machine
}

proptest! {
    #[test]
    fn drain_order_is_stable_sort_by_descending_priority(
        priorities in prop::collection::vec(-5i32..5, 0..64)
    ) {
        let queue = PriorityQueue::new();
        for (index, priority) in priorities.iter().enumerate() {
            queue.push_with_priority(*priority, index).unwrap();
        }

        let mut expected: Vec<usize> = (0..priorities.len()).collect();
        expected.sort_by_key(|index| std::cmp::Reverse(priorities[*index]));

        let drained: Vec<usize> = std::iter::from_fn(|| queue.pop()).collect();
        prop_assert_eq!(drained, expected);
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn bounded_queue_accepts_exactly_its_capacity(
        capacity in 1usize..16,
        pushes in 0usize..32,
    ) {
        let queue = PriorityQueue::bounded(capacity);
        let mut accepted = 0;
        for item in 0..pushes {
            match queue.push(item) {
                Ok(()) => accepted += 1,
                Err(err) => prop_assert_eq!(err, QueueError::Full { capacity }),
            }
        }

        prop_assert_eq!(accepted, pushes.min(capacity));
        prop_assert_eq!(queue.len(), accepted);
        prop_assert_eq!(queue.available(), Some(capacity - accepted));
    }

    #[test]
    fn at_most_one_definition_per_name_and_source(
        edges in prop::collection::vec(arbitrary_edge(), 0..24)
    ) {
        let machine = machine_with(&edges);

        for name in machine.event_names() {
            let definitions = machine.get_events(&name);
            let mut sources: Vec<_> = definitions.iter().map(|e| e.from().name().to_owned()).collect();
            sources.sort();
            sources.dedup();
            prop_assert_eq!(sources.len(), definitions.len());
        }
    }

    #[test]
    fn removing_a_state_prunes_every_touching_event(
        edges in prop::collection::vec(arbitrary_edge(), 0..24),
        removed in 0..NAMES.len(),
    ) {
        let machine = machine_with(&edges);
        let removed = NAMES[removed];
        prop_assert!(machine.remove_state(removed));

        for name in machine.event_names() {
            let definitions = machine.get_events(&name);
            prop_assert!(!definitions.is_empty());
            for event in definitions {
                prop_assert!(event.from().name() != removed && event.to().name() != removed);
            }
        }

        for event in ["e0", "e1", "e2"] {
            match machine.emit(event) {
                Ok(())
                | Err(FsmError::EventNotExist { .. })
                | Err(FsmError::IllegalStateForEvent { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
