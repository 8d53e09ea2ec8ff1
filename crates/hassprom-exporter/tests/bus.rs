#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use hassprom_core::model::{Event, EventType, RegistryAction};
use hassprom_core::State;
use hassprom_exporter::bus::EventBus;

fn registry_event(id: &str) -> Event {
    Event::EntityRegistryUpdated {
        action: RegistryAction::Remove,
        entity_id: id.to_string(),
        changes: Default::default(),
    }
}

#[test]
fn publish_in_subscription_order_and_by_type() {
    let bus = EventBus::new();
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let s1 = {
        let seen = Arc::clone(&seen);
        bus.subscribe(EventType::StateChanged, move |ev| {
            seen.lock().unwrap().push(format!("first:{}", ev.entity_id()))
        })
    };
    let s2 = {
        let seen = Arc::clone(&seen);
        bus.subscribe(EventType::StateChanged, move |ev| {
            seen.lock().unwrap().push(format!("second:{}", ev.entity_id()))
        })
    };
    let s3 = {
        let seen = Arc::clone(&seen);
        bus.subscribe(EventType::EntityRegistryUpdated, move |ev| {
            seen.lock().unwrap().push(format!("registry:{}", ev.entity_id()))
        })
    };

    let n = bus.publish(&Event::state_changed(None, State::new("light.a", "on")));
    assert_eq!(n, 2);
    assert_eq!(bus.publish(&registry_event("light.b")), 1);
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["first:light.a", "second:light.a", "registry:light.b"]
    );
    assert_eq!(s3.event_type(), EventType::EntityRegistryUpdated);

    drop((s1, s2, s3));
}

#[test]
fn unsubscribe_and_drop_remove_handlers() {
    let bus = EventBus::new();
    let hits = Arc::new(Mutex::new(0u32));

    let sub = {
        let hits = Arc::clone(&hits);
        bus.subscribe(EventType::StateChanged, move |_| *hits.lock().unwrap() += 1)
    };
    {
        let _scoped = bus.subscribe(EventType::StateChanged, |_| {});
        assert_eq!(bus.listener_count(EventType::StateChanged), 2);
    }
    assert_eq!(bus.listener_count(EventType::StateChanged), 1);

    bus.publish(&Event::state_changed(None, State::new("switch.s", "off")));
    sub.unsubscribe();
    bus.publish(&Event::state_changed(None, State::new("switch.s", "on")));

    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(bus.listener_count(EventType::StateChanged), 0);
}

#[test]
fn subscription_outliving_bus_is_harmless() {
    let sub = {
        let bus = EventBus::new();
        bus.subscribe(EventType::StateChanged, |_| {})
    };
    sub.unsubscribe();
}
