//! Layer operations seen through the shared store

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use memetext_core::types::{Bitmap, ImageHandle};
use memetext_core::AssetLoader;
use memetext_layers::{LayerId, LayerModel, LayerState};

/// Every extra loads after `delay`; files named `broken*` fail
struct DelayedLoader {
    delay: Duration,
}

impl AssetLoader for DelayedLoader {
    fn name(&self) -> &'static str {
        "delayed"
    }

    fn load(&self, url: &str) -> BoxFuture<'static, Option<ImageHandle>> {
        let delay = self.delay;
        let broken = url.rsplit('/').next().is_some_and(|f| f.starts_with("broken"));
        async move {
            tokio::time::sleep(delay).await;
            (!broken).then(|| Arc::new(Bitmap::transparent(40, 20)))
        }
        .boxed()
    }
}

fn model() -> LayerModel {
    LayerModel::new(Arc::new(DelayedLoader {
        delay: Duration::from_millis(20),
    }))
}

fn order(model: &LayerModel) -> Vec<LayerId> {
    model.snapshot().z_order
}

#[tokio::test]
async fn move_up_then_down_restores_order() {
    let model = model();
    let a = model.add_extra("a.png").id;
    let b = model.add_extra("b.png").id;
    let before = order(&model);
    assert_eq!(before, vec![LayerId::MainText, LayerId::SubText, a, b]);

    for id in [LayerId::MainText, LayerId::SubText, a] {
        assert!(model.move_item_up(&id));
        assert!(model.move_item_down(&id));
        assert_eq!(order(&model), before, "{id}");
    }
}

#[tokio::test]
async fn moves_at_the_edges_do_nothing() {
    let model = model();
    let a = model.add_extra("a.png").id;

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    model.store().subscribe(move |_: &LayerState| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(!model.move_item_up(&a), "already on top");
    assert!(!model.move_item_down(&LayerId::MainText), "already at the bottom");
    assert!(!model.move_item_up(&LayerId::Extra(99)));
    assert!(!model.move_item_down(&LayerId::Extra(99)));
    assert_eq!(notified.load(Ordering::SeqCst), 0);
    assert_eq!(order(&model), vec![LayerId::MainText, LayerId::SubText, a]);
}

#[tokio::test]
async fn text_layers_move_like_any_other() {
    let model = model();
    let a = model.add_extra("a.png").id;

    assert!(model.move_item_down(&a));
    assert!(model.move_item_down(&a));
    assert_eq!(order(&model), vec![a, LayerId::MainText, LayerId::SubText]);

    assert!(model.move_item_up(&LayerId::MainText));
    assert_eq!(order(&model), vec![a, LayerId::SubText, LayerId::MainText]);
    assert_eq!(model.snapshot().check_invariants(), Ok(()));
}

#[tokio::test]
async fn remove_clears_entry_slot_and_selection() {
    let model = model();
    let a = model.add_extra("a.png").id;
    let b = model.add_extra("b.png").id;
    assert_eq!(model.snapshot().selected, Some(b));

    assert!(model.remove_extra(&b));
    let state = model.snapshot();
    assert!(state.extra(&b).is_none());
    assert!(!state.z_order.contains(&b));
    assert_eq!(state.selected, None);
    assert!(state.extra(&a).is_some());
    assert_eq!(state.check_invariants(), Ok(()));

    assert!(!model.remove_extra(&b), "second removal is a no-op");
}

#[tokio::test(start_paused = true)]
async fn add_then_remove_restores_layers_exactly() {
    let model = model();
    let a = model.add_extra("a.png");
    assert!(a.load.await);
    assert!(model.move_item_down(&a.id));
    let before = model.snapshot();

    let star = model.add_extra("star.png");
    assert!(star.load.await);
    assert_ne!(model.snapshot().z_order, before.z_order);
    assert!(model.remove_extra(&star.id));

    let after = model.snapshot();
    assert_eq!(after.z_order, before.z_order);
    assert_eq!(after.extras, before.extras);
    assert_eq!(after.selected, None, "the removed layer was selected");
    assert_eq!(after.check_invariants(), Ok(()));
}

#[tokio::test]
async fn removing_unselected_layer_keeps_selection() {
    let model = model();
    let a = model.add_extra("a.png").id;
    let b = model.add_extra("b.png").id;

    assert!(model.remove_extra(&a));
    assert_eq!(model.snapshot().selected, Some(b));
}

#[tokio::test(start_paused = true)]
async fn loaded_image_reaches_store_and_listeners() {
    let model = model();

    let loaded_seen = Arc::new(Mutex::new(Vec::new()));
    let sink = loaded_seen.clone();
    model.store().subscribe(move |state: &LayerState| {
        let loaded = state.extras.iter().filter(|l| l.is_loaded()).count();
        if let Ok(mut seen) = sink.lock() {
            seen.push(loaded);
        }
    });

    let added = model.add_extra("cat.png");
    assert!(!model.snapshot().extra(&added.id).is_some_and(|l| l.is_loaded()));

    assert!(added.load.await);

    let state = model.snapshot();
    let layer = state.extra(&added.id);
    assert_eq!(layer.and_then(|l| l.image.as_ref()).map(|i| (i.width, i.height)), Some((40, 20)));
    assert_eq!(*loaded_seen.lock().unwrap_or_else(|e| e.into_inner()), vec![0, 1]);
}

#[tokio::test(start_paused = true)]
async fn load_after_removal_is_dropped() {
    let model = model();
    let added = model.add_extra("cat.png");
    let keep = model.add_extra("dog.png");

    assert!(model.remove_extra(&added.id));
    let (gone, kept) = tokio::join!(added.load, keep.load);

    assert!(!gone);
    assert!(kept);
    let state = model.snapshot();
    assert!(state.extra(&added.id).is_none());
    assert!(!state.z_order.contains(&added.id));
    assert_eq!(state.extras.len(), 1);
    assert_eq!(state.check_invariants(), Ok(()));
}

#[tokio::test(start_paused = true)]
async fn failed_load_keeps_layer_without_image() {
    let model = model();
    let added = model.add_extra("broken.png");

    assert!(!added.load.await);
    let state = model.snapshot();
    assert!(state.extra(&added.id).is_some_and(|l| !l.is_loaded()));
    assert_eq!(state.topmost(), Some(&added.id));
}

#[tokio::test]
async fn extra_ids_are_never_reused() {
    let model = model();
    let mut seen = HashSet::new();

    for round in 0..5 {
        let id = model.add_extra(&format!("{round}.png")).id;
        assert!(seen.insert(id), "{id} handed out twice");
        if round % 2 == 0 {
            assert!(model.remove_extra(&id));
        }
    }

    assert_eq!(seen.len(), 5);
    assert_eq!(model.snapshot().extras.len(), 2);
}

#[tokio::test]
async fn clones_share_one_layer_list() {
    let model = model();
    let other = model.clone();

    let id = other.add_extra("a.png").id;
    assert!(model.snapshot().extra(&id).is_some());
    assert!(model.store().same_store(other.store()));

    let next = model.add_extra("b.png").id;
    assert_ne!(id, next);
}

#[tokio::test]
async fn random_operation_sequence_keeps_invariants() {
    let model = model();
    let mut live = Vec::new();

    // Deterministic LCG keeps the sequence reproducible
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    for _ in 0..200 {
        let state = model.snapshot();
        let pick = |n: usize| state.z_order[n % state.z_order.len()];
        match next() % 5 {
            0 => live.push(model.add_extra("x.png").id),
            1 if !live.is_empty() => {
                let id = live.remove(next() % live.len());
                assert!(model.remove_extra(&id));
            },
            2 => {
                model.move_item_up(&pick(next()));
            },
            3 => {
                model.move_item_down(&pick(next()));
            },
            _ => {
                model.select(&pick(next()));
            },
        }
        assert_eq!(model.snapshot().check_invariants(), Ok(()));
    }
}
