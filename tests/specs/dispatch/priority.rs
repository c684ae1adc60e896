//! Priority ordering across local, wildcard and shared listeners.
//!
//! Every scenario attaches listeners that enqueue a value into the event's
//! `accumulator` param, then checks the order the values arrived in.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn listeners_of_different_priorities_run_in_priority_order() {
    let world = World::new();
    for i in -1..5 {
        world
            .events
            .attach_with_priority("test", create_listener(i), i as i32)
            .unwrap();
    }

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![4, 3, 2, 1, 0, -1]);
}

#[test]
fn listeners_of_same_priority_run_in_attachment_order() {
    let world = World::new();
    for i in -1..5 {
        world.events.attach("test", create_listener(i)).unwrap();
    }

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![-1, 0, 1, 2, 3, 4]);
}

#[test]
fn wildcard_listeners_run_after_explicit_listeners_of_same_priority() {
    let world = World::new();
    world
        .events
        .attach_with_priority("*", create_listener(2), 5)
        .unwrap();
    world
        .events
        .attach_with_priority("test", create_listener(1), 5)
        .unwrap();
    world
        .events
        .attach_with_priority("*", create_listener(3), 5)
        .unwrap();

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![1, 2, 3]);
}

#[test]
fn shared_listeners_run_after_wildcard_listeners_of_same_priority() {
    let world = World::new();
    world
        .shared
        .attach_with_priority(IDENTIFIER, "test", create_listener(2), 5)
        .unwrap();
    world
        .events
        .attach_with_priority("*", create_listener(1), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority(IDENTIFIER, "test", create_listener(3), 5)
        .unwrap();

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![1, 2, 3]);
}

#[test]
fn shared_wildcard_listeners_run_after_shared_listeners_of_same_priority() {
    let world = World::new();
    world
        .shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(2), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority(IDENTIFIER, "test", create_listener(1), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(3), 5)
        .unwrap();

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![1, 2, 3]);
}

#[test]
fn wildcard_identifier_listeners_run_after_shared_wildcard_listeners_of_same_priority() {
    let world = World::new();
    world
        .shared
        .attach_with_priority("*", "test", create_listener(2), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(1), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority("*", "test", create_listener(3), 5)
        .unwrap();

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![1, 2, 3]);
}

#[test]
fn fully_wildcard_listeners_run_after_wildcard_identifier_listeners_of_same_priority() {
    let world = World::new();
    world
        .shared
        .attach_with_priority("*", "*", create_listener(2), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority("*", "test", create_listener(1), 5)
        .unwrap();
    world
        .shared
        .attach_with_priority("*", "*", create_listener(3), 5)
        .unwrap();

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();

    assert_eq!(accumulated(&event), vec![1, 2, 3]);
}

#[test]
fn mix_of_local_shared_and_wildcard_listeners_runs_in_value_order() {
    let world = World::new();
    let shared = &world.shared;
    let events = &world.events;

    shared
        .attach_with_priority("*", "*", create_listener(1024), 1024)
        .unwrap();
    shared
        .attach_with_priority("*", "*", create_listener(1023), 1024)
        .unwrap();
    events
        .attach_with_priority("*", create_listener(1025), 1024)
        .unwrap();
    events
        .attach_with_priority("test", create_listener(1026), 1024)
        .unwrap();

    shared
        .attach_with_priority("*", "test", create_listener(512), 512)
        .unwrap();
    shared
        .attach_with_priority("*", "*", create_listener(510), 512)
        .unwrap();
    shared
        .attach_with_priority("*", "test", create_listener(511), 512)
        .unwrap();
    events
        .attach_with_priority("*", create_listener(513), 512)
        .unwrap();
    events
        .attach_with_priority("test", create_listener(514), 512)
        .unwrap();

    shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(256), 256)
        .unwrap();
    shared
        .attach_with_priority("*", "*", create_listener(253), 256)
        .unwrap();
    shared
        .attach_with_priority("*", "test", create_listener(254), 256)
        .unwrap();
    shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(255), 256)
        .unwrap();
    events
        .attach_with_priority("*", create_listener(257), 256)
        .unwrap();
    events
        .attach_with_priority("test", create_listener(258), 256)
        .unwrap();

    shared
        .attach_with_priority(IDENTIFIER, "test", create_listener(128), 128)
        .unwrap();
    shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(126), 128)
        .unwrap();
    shared
        .attach_with_priority("*", "*", create_listener(123), 128)
        .unwrap();
    shared
        .attach_with_priority("*", "test", create_listener(124), 128)
        .unwrap();
    shared
        .attach_with_priority(IDENTIFIER, "*", create_listener(125), 128)
        .unwrap();
    shared
        .attach_with_priority(IDENTIFIER, "test", create_listener(127), 128)
        .unwrap();
    events
        .attach_with_priority("*", create_listener(129), 128)
        .unwrap();
    events
        .attach_with_priority("test", create_listener(130), 128)
        .unwrap();

    events
        .attach_with_priority("*", create_listener(64), 64)
        .unwrap();
    events
        .attach_with_priority("*", create_listener(63), 64)
        .unwrap();
    events
        .attach_with_priority("test", create_listener(32), 32)
        .unwrap();
    events
        .attach_with_priority("*", create_listener(30), 32)
        .unwrap();
    events
        .attach_with_priority("test", create_listener(31), 32)
        .unwrap();

    let mut event = create_event();
    events.trigger_event(&mut event).unwrap();

    let values = accumulated(&event);
    assert_eq!(values.len(), 28);
    let mut expected = values.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(values, expected, "values were not strictly descending");
    assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
}
