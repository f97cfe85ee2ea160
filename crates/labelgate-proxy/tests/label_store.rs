#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use labelgate_core::LabelSet;
use labelgate_proxy::store::LabelStore;

fn set(pairs: &[(&str, &str)]) -> LabelSet {
    LabelSet::from_pairs(pairs.iter().copied()).unwrap()
}

#[tokio::test]
async fn replace_is_visible_to_later_snapshots() {
    let store = LabelStore::new(set(&[("env", "old")]));
    let before = store.snapshot().await;

    store.replace(set(&[("env", "new"), ("dc", "eu1")])).await;
    let after = store.snapshot().await;

    // The earlier snapshot is unaffected by the swap.
    assert_eq!(before.fragment(), r#"env="old""#);
    assert_eq!(after.fragment(), r#"dc="eu1",env="new""#);
}

#[tokio::test]
async fn concurrent_readers_only_see_whole_sets() {
    let store = Arc::new(LabelStore::new(set(&[("a", "0"), ("b", "0")])));

    let mut readers = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let snap = store.snapshot().await;
                // Both labels always come from the same generation.
                assert_eq!(snap.get("a"), snap.get("b"));
                tokio::task::yield_now().await;
            }
        }));
    }

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 1..=100 {
                let v = i.to_string();
                store.replace(set(&[("a", v.as_str()), ("b", v.as_str())])).await;
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    for r in readers {
        r.await.unwrap();
    }
    assert_eq!(store.snapshot().await.get("a"), Some("100"));
}
