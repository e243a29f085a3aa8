use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use accord::prelude::*;
use serde_json::json;

fn direct_interaction() -> Interaction {
    let cache = Cache::new();
    let payload: InteractionPayload = serde_json::from_value(json!({
        "id": "1",
        "token": "tok",
        "type": 2,
        "channel": {"id": "55", "type": 1},
        "user": {"id": "99"},
    }))
    .unwrap();

    InteractionMaterializer::new().materialize(&cache, payload).unwrap()
}

#[test]
fn first_ack_wins() {
    let interaction = direct_interaction();

    assert!(!interaction.is_acknowledged());
    assert!(!interaction.ack());
    assert!(interaction.ack());
    assert!(interaction.is_acknowledged());
}

#[test]
fn exactly_one_concurrent_ack_succeeds() {
    let interaction = Arc::new(direct_interaction());
    let winners = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let interaction = Arc::clone(&interaction);
            let winners = Arc::clone(&winners);
            std::thread::spawn(move || {
                if !interaction.ack() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert!(interaction.is_acknowledged());
}
