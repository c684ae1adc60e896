//! Attaching, detaching and clearing across local and shared listeners.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn detaching_twice_is_harmless() {
    let world = World::new();
    let handle = world.events.attach("test", create_listener(1)).unwrap();
    world.events.attach("test", create_listener(2)).unwrap();
    let shared = world
        .shared
        .attach(IDENTIFIER, "test", create_listener(3))
        .unwrap();

    assert!(world.events.detach(&handle));
    assert!(!world.events.detach(&handle));
    assert!(world.shared.detach(&shared));
    assert!(!world.shared.detach(&shared));

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();
    assert_eq!(accumulated(&event), vec![2]);
}

#[test]
fn clearing_a_name_leaves_wildcard_and_shared_listeners() {
    let world = World::new();
    world.events.attach("test", create_listener(1)).unwrap();
    world.events.attach("*", create_listener(2)).unwrap();
    world
        .shared
        .attach(IDENTIFIER, "test", create_listener(3))
        .unwrap();
    world
        .shared
        .attach("*", "test", create_listener(4))
        .unwrap();

    world.events.clear_listeners("test");

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();
    assert_eq!(accumulated(&event), vec![2, 3, 4]);
}

#[test]
fn clearing_shared_listeners_for_an_identifier() {
    let world = World::new();
    world
        .shared
        .attach(IDENTIFIER, "test", create_listener(1))
        .unwrap();
    world
        .shared
        .attach(IDENTIFIER, "*", create_listener(2))
        .unwrap();
    world.shared.attach("*", "*", create_listener(3)).unwrap();

    world.shared.clear_listeners(IDENTIFIER, None);

    let mut event = create_event();
    world.events.trigger_event(&mut event).unwrap();
    assert_eq!(accumulated(&event), vec![3]);
}

#[test]
fn one_shared_store_serves_many_dispatchers() {
    let shared = SharedListeners::new();
    let orders = EventDispatcher::with_shared(shared.clone(), ["orders", "app"]);
    let billing = EventDispatcher::with_shared(shared.clone(), ["billing", "app"]);
    shared.attach("orders", "test", create_listener(1)).unwrap();
    shared
        .attach("billing", "test", create_listener(2))
        .unwrap();
    shared.attach("app", "test", create_listener(3)).unwrap();

    let mut for_orders = create_event();
    orders.trigger_event(&mut for_orders).unwrap();
    let mut for_billing = create_event();
    billing.trigger_event(&mut for_billing).unwrap();

    assert_eq!(accumulated(&for_orders), vec![1, 3]);
    assert_eq!(accumulated(&for_billing), vec![2, 3]);
}
