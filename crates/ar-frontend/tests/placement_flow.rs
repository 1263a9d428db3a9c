//! End-to-end placement flows driven through scripted sessions

use approx::assert_relative_eq;
use ar_core::{ReferenceSpace, ReferenceSpaceKind, Scene, SceneGraph, TrackerStatus};
use ar_frontend::{AppConfig, ArApp, PlacementState, ReplayScript, ReplayStep, replay};
use ar_gestures::TouchSlot;
use glam::{Quat, Vec3};

const SURFACE: [f32; 3] = [0.0, -1.0, -1.5];

fn app() -> ArApp<Scene> {
    ArApp::new(
        &AppConfig::new(),
        Scene::new(),
        ReferenceSpace::new(0, ReferenceSpaceKind::Local),
    )
}

fn script(hit_test_supported: bool, steps: Vec<ReplayStep>) -> ReplayScript {
    ReplayScript {
        hit_test_supported,
        steps,
    }
}

fn load() -> ReplayStep {
    ReplayStep::Load {
        name: "sandwich".into(),
        clips: vec![],
    }
}

fn frame(t: f64, hits: &[[f32; 3]]) -> ReplayStep {
    ReplayStep::Frame {
        t,
        hits: hits.to_vec(),
    }
}

/// A short touch at `t`, followed by frames until the tap is dispatched
fn tap(t: f64, hits: &[[f32; 3]]) -> Vec<ReplayStep> {
    vec![
        ReplayStep::Down {
            t,
            slot: TouchSlot::Primary,
            at: [0.0, 0.0, -0.3],
        },
        frame(t + 0.06, hits),
        ReplayStep::Up {
            t: t + 0.1,
            slot: TouchSlot::Primary,
        },
        frame(t + 0.35, hits),
    ]
}

fn placed_position(app: &ArApp<Scene>) -> Vec3 {
    app.placement().object().unwrap().transform().position
}

#[test]
fn test_demo_script_places_edits_and_removes() {
    let mut app = app();
    replay(&mut app, &ReplayScript::demo());

    assert_eq!(app.placement().state(), PlacementState::Removed);
    let object = app.placement().object().unwrap();
    assert!(!object.visible());
    assert!(!app.scene().contains(object.id()));

    let transform = object.transform();
    assert_relative_eq!(transform.position.x, 0.03, epsilon = 1e-4);
    assert_relative_eq!(transform.position.y, -1.3, epsilon = 1e-5);
    assert_relative_eq!(transform.position.z, -2.0, epsilon = 1e-5);
    assert_relative_eq!(transform.scale.x, 0.006, epsilon = 1e-5);

    // Clockwise seen from above
    let (axis, angle) = transform.rotation.to_axis_angle();
    assert_relative_eq!(axis.y.abs(), 1.0, epsilon = 1e-4);
    assert_relative_eq!(angle * axis.y.signum(), -0.499, epsilon = 2e-3);

    // Session ended
    assert!(!app.reticle().visible());
    assert_eq!(app.tracker().status(), TrackerStatus::Idle);
}

#[test]
fn test_demo_file_matches_builtin_demo() {
    let from_file = ReplayScript::from_ron(include_str!("../scripts/demo.ron")).unwrap();
    assert_eq!(from_file, ReplayScript::demo());
}

#[test]
fn test_tap_places_on_reticle_with_offset() {
    let mut app = app();
    let mut steps = vec![load(), frame(0.0, &[SURFACE])];
    steps.extend(tap(0.1, &[SURFACE]));
    replay(&mut app, &script(true, steps));

    assert_eq!(app.placement().state(), PlacementState::Placed);
    assert_eq!(app.tracker().status(), TrackerStatus::Active);
    let object = app.placement().object().unwrap();
    assert!(object.visible());
    assert!(app.scene().contains(object.id()));
    assert_relative_eq!(placed_position(&app).y, -1.3, epsilon = 1e-6);
    assert_relative_eq!(placed_position(&app).z, -2.0, epsilon = 1e-6);
}

#[test]
fn test_second_tap_does_not_move_object() {
    let mut app = app();
    let mut steps = vec![load(), frame(0.0, &[SURFACE])];
    steps.extend(tap(0.1, &[SURFACE]));
    steps.extend(tap(1.0, &[[2.0, -1.0, -3.0]]));
    replay(&mut app, &script(true, steps));

    assert_eq!(app.reticle().transform().position(), Vec3::new(2.0, -1.0, -3.0));
    assert_relative_eq!(placed_position(&app).x, 0.0);
    assert_relative_eq!(placed_position(&app).z, -2.0, epsilon = 1e-6);
}

#[test]
fn test_no_surface_hides_reticle_and_tap_does_nothing() {
    let mut app = app();
    let mut steps = vec![load(), frame(0.0, &[])];
    steps.extend(tap(0.1, &[]));
    replay(&mut app, &script(true, steps));

    assert!(!app.reticle().visible());
    assert_eq!(app.placement().state(), PlacementState::Unplaced);
    assert!(!app.placement().object().unwrap().visible());
    assert!(app.scene().is_empty());
}

#[test]
fn test_unsupported_hit_test_is_not_retried_within_session() {
    let mut app = app();
    let mut steps = vec![load(), frame(0.0, &[SURFACE])];
    steps.extend(tap(0.1, &[SURFACE]));
    replay(&mut app, &script(false, steps));

    assert_eq!(app.tracker().status(), TrackerStatus::Unsupported);
    assert!(app.tracker().is_requested());
    assert!(!app.reticle().visible());
    assert_eq!(app.placement().state(), PlacementState::Unplaced);
}

#[test]
fn test_tap_before_load_is_ignored() {
    let mut app = app();
    let mut steps = vec![frame(0.0, &[SURFACE])];
    steps.extend(tap(0.1, &[SURFACE]));
    replay(&mut app, &script(true, steps));
    assert!(app.placement().object().is_none());
    assert!(app.scene().is_empty());

    let mut steps = vec![load()];
    steps.extend(tap(1.0, &[SURFACE]));
    replay(&mut app, &script(true, steps));
    assert_eq!(app.placement().state(), PlacementState::Placed);
}

#[test]
fn test_swipe_then_tap_places_again() {
    let mut app = app();
    let mut steps = vec![load(), frame(0.0, &[SURFACE])];
    steps.extend(tap(0.1, &[SURFACE]));
    steps.extend([
        ReplayStep::Down {
            t: 1.0,
            slot: TouchSlot::Primary,
            at: [0.0, 0.0, -0.3],
        },
        frame(1.06, &[SURFACE]),
        ReplayStep::Move {
            t: 1.1,
            slot: TouchSlot::Primary,
            at: [0.0, 0.05, -0.3],
        },
        ReplayStep::Up {
            t: 1.12,
            slot: TouchSlot::Primary,
        },
    ]);
    replay(&mut app, &script(true, steps));
    assert_eq!(app.placement().state(), PlacementState::Removed);
    assert!(app.scene().is_empty());

    let surface = [1.0, -1.0, -1.5];
    replay(&mut app, &script(true, tap(2.0, &[surface])));
    assert_eq!(app.placement().state(), PlacementState::Placed);
    assert_relative_eq!(placed_position(&app).x, 1.0, epsilon = 1e-6);
    assert_eq!(app.placement().object().unwrap().transform().rotation, Quat::IDENTITY);
}

#[test]
fn test_new_session_requests_a_fresh_source() {
    let mut app = app();
    replay(
        &mut app,
        &script(true, vec![frame(0.0, &[SURFACE]), ReplayStep::EndSession]),
    );
    assert_eq!(app.tracker().status(), TrackerStatus::Idle);
    assert!(!app.reticle().visible());

    replay(&mut app, &script(true, vec![frame(1.0, &[SURFACE])]));
    assert_eq!(app.tracker().status(), TrackerStatus::Active);
    assert!(app.reticle().visible());
}

#[test]
fn test_load_failure_keeps_indicator_visible() {
    let mut app = app();
    replay(
        &mut app,
        &script(
            true,
            vec![
                ReplayStep::Progress { loaded: 10, total: 40 },
                ReplayStep::LoadFailed {
                    reason: "truncated buffer".into(),
                },
            ],
        ),
    );

    assert!(app.loading().visible());
    assert_relative_eq!(app.loading().progress(), 0.25);
    assert!(app.placement().object().is_none());
}

#[test]
fn test_quick_pinch_does_not_place() {
    let mut app = app();
    let steps = vec![
        load(),
        frame(0.0, &[SURFACE]),
        ReplayStep::Down {
            t: 0.0,
            slot: TouchSlot::Primary,
            at: [-0.05, 0.0, -0.3],
        },
        ReplayStep::Down {
            t: 0.0,
            slot: TouchSlot::Secondary,
            at: [0.05, 0.0, -0.3],
        },
        frame(0.06, &[SURFACE]),
        ReplayStep::Move {
            t: 0.08,
            slot: TouchSlot::Secondary,
            at: [0.12, 0.0, -0.3],
        },
        ReplayStep::Up {
            t: 0.12,
            slot: TouchSlot::Secondary,
        },
        ReplayStep::Up {
            t: 0.13,
            slot: TouchSlot::Primary,
        },
        frame(0.5, &[SURFACE]),
    ];
    replay(&mut app, &script(true, steps));

    assert_eq!(app.placement().state(), PlacementState::Unplaced);
    assert!(app.scene().is_empty());
}
