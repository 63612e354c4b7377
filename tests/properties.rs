//! Behavioral properties of the session store, message pipeline, gesture
//! recognizers and drawer controller, exercised through the public API.

use parley::domain::DEFAULT_SESSION_TITLE;
use parley::drawer::{DrawerController, DrawerPhase};
use parley::gesture::{
    GestureContext, GestureIntent, PointerSample, Release, SurfaceRecognizer,
};
use parley::pipeline::{MessagePipeline, ScriptedResponses};
use parley::store::SessionStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const WELCOME: &str = "Welcome aboard!";
const DRAWER_WIDTH: f32 = 480.0;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn pipeline() -> MessagePipeline {
    MessagePipeline::new(
        ms(1200),
        WELCOME.to_string(),
        Box::new(ScriptedResponses::new(["Canned."])),
    )
}

fn assert_store_consistent(store: &SessionStore) {
    assert!(!store.is_empty());
    assert!(store.contains(store.active_id()));
}

#[test]
fn sessions_never_empty_and_active_always_present() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut store = SessionStore::new();
    assert_store_consistent(&store);

    for _ in 0..500 {
        if rng.gen_bool(0.5) {
            store.create_session();
        } else {
            let ids: Vec<_> = store.sessions().iter().map(|s| s.id).collect();
            let id = ids[rng.gen_range(0..ids.len())];
            assert!(store.delete_session(id));
        }
        assert_store_consistent(&store);
    }
}

#[test]
fn rename_trims_and_rejects_blank_titles() {
    let mut store = SessionStore::new();
    let id = store.active_id();

    assert!(!store.rename_session(id, "   "));
    assert_eq!(store.active().title, DEFAULT_SESSION_TITLE);

    assert!(store.rename_session(id, " Trip Plan "));
    assert_eq!(store.active().title, "Trip Plan");
}

#[test]
fn first_send_gets_exactly_one_welcome_reply() {
    let mut store = SessionStore::new();
    let mut pipeline = pipeline();
    let id = store.active_id();

    assert!(!pipeline.is_typing(id));
    let due = pipeline.submit(&mut store, "Hello", ms(0)).unwrap();
    assert_eq!(due, ms(1200));

    let messages = store.active().messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_user());
    assert_eq!(messages[0].text(), "Hello");
    assert!(pipeline.is_typing(id));

    assert!(pipeline.deliver_due(&mut store, ms(1199)).is_empty());
    assert!(pipeline.is_typing(id));
    assert_eq!(store.active().messages().len(), 1);

    assert_eq!(pipeline.deliver_due(&mut store, due).len(), 1);
    assert!(!pipeline.is_typing(id));
    let messages = store.active().messages();
    assert_eq!(messages.len(), 2);
    assert!(!messages[1].is_user());
    assert_eq!(messages[1].text(), WELCOME);

    assert!(pipeline.deliver_due(&mut store, ms(10_000)).is_empty());
    assert_eq!(store.active().messages().len(), 2);
}

#[test]
fn whitespace_send_changes_nothing() {
    let mut store = SessionStore::new();
    let mut pipeline = pipeline();
    let before = store.sessions().to_vec();

    assert_eq!(pipeline.submit(&mut store, "  ", ms(0)), None);

    assert_eq!(store.sessions(), before.as_slice());
    assert!(pipeline.is_idle());
    assert!(!store.active().welcomed());
}

#[test]
fn deleting_sole_session_leaves_fresh_active_one() {
    let mut store = SessionStore::new();
    let old = store.active_id();

    assert!(store.delete_session(old));

    assert_eq!(store.len(), 1);
    let replacement = &store.sessions()[0];
    assert_ne!(replacement.id, old);
    assert_eq!(store.active_id(), replacement.id);
    assert!(replacement.messages().is_empty());
}

fn closed_ctx() -> GestureContext {
    GestureContext {
        drawer_open: false,
        keyboard_visible: false,
        drawer_width: DRAWER_WIDTH,
    }
}

/// Feeds one move and a release at the same sample, applying every intent to
/// `drawer`, then runs the animation to completion.
fn swipe(drawer: &mut DrawerController, ctx: &GestureContext, sample: PointerSample) {
    let mut recognizer = SurfaceRecognizer::default();
    recognizer.press();

    let mut intents = recognizer.moved(sample, ctx);
    match recognizer.release(sample, ctx) {
        Release::Intents(released) => intents.extend(released),
        Release::Tap => panic!("swipe was reported as a tap"),
    }

    let now = ms(1000);
    for intent in intents {
        match intent {
            GestureIntent::BeginDrag => {
                drawer.begin_drag(now);
            }
            GestureIntent::SetProgress(p) => drawer.drag_to(p),
            GestureIntent::OpenDrawer => drawer.open(now),
            GestureIntent::CloseDrawer => drawer.close(now),
            GestureIntent::SnapClosed => drawer.snap_back(now),
            GestureIntent::SnapOpen => drawer.settle_open(now),
            GestureIntent::FocusComposer | GestureIntent::DismissKeyboard => {}
        }
    }

    drawer.tick(now + ms(5000));
}

#[test]
fn long_swipe_opens_closed_drawer() {
    let mut drawer = DrawerController::default();
    swipe(&mut drawer, &closed_ctx(), PointerSample::new(60.0, 0.0, 0.0, 0.0));

    assert_eq!(drawer.phase(), DrawerPhase::Open);
    assert!((drawer.progress() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn long_swipe_left_closes_open_drawer() {
    let mut drawer = DrawerController::default();
    drawer.open(ms(0));
    drawer.tick(ms(1000));
    assert_eq!(drawer.phase(), DrawerPhase::Open);

    let ctx = GestureContext {
        drawer_open: true,
        ..closed_ctx()
    };
    swipe(&mut drawer, &ctx, PointerSample::new(-60.0, 0.0, -0.2, 0.0));

    assert_eq!(drawer.phase(), DrawerPhase::Closed);
    assert!(drawer.progress().abs() < f32::EPSILON);
}

#[test]
fn slow_short_swipe_snaps_back_closed() {
    let mut drawer = DrawerController::default();
    swipe(&mut drawer, &closed_ctx(), PointerSample::new(30.0, 0.0, 0.1, 0.0));

    assert_eq!(drawer.phase(), DrawerPhase::Closed);
    assert!(drawer.progress().abs() < f32::EPSILON);
}

#[test]
fn switching_to_active_session_is_a_no_op() {
    let mut store = SessionStore::new();
    let mut pipeline = pipeline();
    pipeline.submit(&mut store, "Hello", ms(0));
    store.create_session();
    let before = store.sessions().to_vec();
    let active = store.active_id();

    store.switch_active(active);

    assert_eq!(store.sessions(), before.as_slice());
    assert_eq!(store.active_id(), active);
}

#[test]
fn deleting_inactive_session_keeps_active() {
    let mut store = SessionStore::new();
    let first = store.active_id();
    store.create_session();
    store.create_session();
    let active = store.active_id();

    assert!(store.delete_session(first));

    assert_eq!(store.active_id(), active);
    assert_eq!(store.len(), 2);
}
