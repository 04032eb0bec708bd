use super::*;
use crate::geom::{convex_hull, invert, signed_area, InversionMap};
use crate::host::{Event, ScriptedSource, Session};
use crate::points::{random_points, Distribution};
use crate::raster::Rgb;
use nalgebra::vector;

fn session(points: Vec<Point>) -> Session {
    Session::new(points, 800, 600, ViewerCfg::default()).unwrap()
}

fn key(c: char) -> Event {
    Event::Key {
        key: Key::Char(c),
        mods: Modifiers::NONE,
        x: 0,
        y: 0,
    }
}

fn special(k: Key) -> Event {
    Event::Key {
        key: k,
        mods: Modifiers::NONE,
        x: 0,
        y: 0,
    }
}

fn button(button: Button, action: ButtonAction, x: i32, y: i32) -> Event {
    Event::Button {
        button,
        action,
        mods: Modifiers::NONE,
        x,
        y,
    }
}

fn motion(buttons: ButtonMask, x: i32, y: i32) -> Event {
    Event::Motion {
        buttons,
        mods: Modifiers::NONE,
        x,
        y,
    }
}

fn drive(s: &mut Session, events: impl IntoIterator<Item = Event>) -> ScriptedSource {
    let mut src = ScriptedSource::new(events);
    s.run(&mut src);
    src
}

/// Move the inversion center away from the default so background clicks miss it.
fn park_center(s: &mut Session) {
    let cfg = s.viewer.cfg().clone();
    s.viewer
        .state_mut()
        .set_inversion(vector![-1000.0, -1000.0], cfg.default_radius, &cfg);
}

#[test]
fn defaults_after_construction() {
    let s = session(vec![vector![1.0, 2.0]]);
    let st = s.viewer.state();
    assert_eq!(st.inversion().center, vector![100.0, 100.0]);
    assert_eq!(st.inversion().radius, 400.0);
    assert_eq!(st.transform().scale(), 1.0);
    assert_eq!(st.drag(), DragState::Idle);
    assert_eq!(st.points().len(), 1);
}

#[test]
fn zoom_key_keeps_window_center_fixed() {
    let mut s = session(vec![]);
    let before = s.viewer.state().transform().to_view(vector![400.0, 300.0]);
    drive(&mut s, [key('+')]);
    let t = *s.viewer.state().transform();
    assert!((t.scale() - 1.43).abs() < 1e-12);
    assert!((t.to_view(vector![400.0, 300.0]) - before).norm() < 1e-9);
    drive(&mut s, [key('-')]);
    assert!((s.viewer.state().transform().scale() - 1.0).abs() < 1e-12);
}

#[test]
fn resize_is_clamped_to_capacity() {
    let mut s = session(vec![vector![10.0, 10.0]]);
    let cap = s.window.canvas().storage().len();
    let src = drive(&mut s, [Event::Expose, Event::Resize { w: 5000, h: 600 }]);
    assert_eq!(s.window.width(), 2000);
    assert_eq!(s.window.height(), 600);
    assert_eq!(s.window.canvas().storage().len(), cap);
    assert_eq!(src.image_updates(), 2);
    assert_eq!(src.last_size(), Some((2000, 600)));
}

#[test]
fn background_drag_pans_by_total_delta() {
    let mut s = session(vec![]);
    park_center(&mut s);
    let before = s.viewer.state().transform().offset();
    drive(
        &mut s,
        [
            button(Button::Left, ButtonAction::Press, 100, 100),
            motion(ButtonMask::LEFT, 130, 90),
            button(Button::Left, ButtonAction::Release, 130, 90),
        ],
    );
    let after = s.viewer.state().transform().offset();
    assert_eq!(after - before, vector![30.0, -10.0]);
    assert_eq!(s.viewer.state().drag(), DragState::Idle);
}

#[test]
fn background_drag_without_motion_applies_on_release() {
    let mut s = session(vec![]);
    park_center(&mut s);
    drive(
        &mut s,
        [
            button(Button::Left, ButtonAction::Press, 100, 100),
            button(Button::Left, ButtonAction::Release, 130, 90),
        ],
    );
    assert_eq!(s.viewer.state().transform().offset(), vector![30.0, -10.0]);
}

#[test]
fn motion_without_left_button_does_not_pan() {
    let mut s = session(vec![]);
    park_center(&mut s);
    drive(
        &mut s,
        [
            button(Button::Left, ButtonAction::Press, 100, 100),
            motion(ButtonMask::RIGHT, 300, 300),
        ],
    );
    assert_eq!(s.viewer.state().transform().offset(), vector![0.0, 0.0]);
    assert_eq!(
        s.viewer.state().drag(),
        DragState::Background { anchor: (100, 100) }
    );
}

#[test]
fn dragging_the_center_follows_the_pointer() {
    let mut s = session(vec![]);
    drive(
        &mut s,
        [
            button(Button::Left, ButtonAction::Press, 102, 99),
            motion(ButtonMask::LEFT, 200, 150),
        ],
    );
    assert_eq!(s.viewer.state().drag(), DragState::CenterWindow);
    assert_eq!(s.viewer.state().inversion().center, vector![200.0, 150.0]);
    drive(&mut s, [button(Button::Left, ButtonAction::Release, 210, 160)]);
    assert_eq!(s.viewer.state().inversion().center, vector![210.0, 160.0]);
    assert_eq!(s.viewer.state().drag(), DragState::Idle);
    // view did not move
    assert_eq!(s.viewer.state().transform().offset(), vector![0.0, 0.0]);
}

#[test]
fn center_drag_maps_through_the_view_transform() {
    let mut s = session(vec![]);
    drive(&mut s, [key('h'), key('h')]); // offset (20, 0)
    drive(
        &mut s,
        [
            button(Button::Left, ButtonAction::Press, 120, 100),
            button(Button::Left, ButtonAction::Release, 320, 100),
        ],
    );
    assert_eq!(s.viewer.state().inversion().center, vector![300.0, 100.0]);
}

#[test]
fn secondary_drag_relocates_on_release() {
    let mut s = session(vec![]);
    drive(&mut s, [button(Button::Right, ButtonAction::Press, 100, 100)]);
    assert_eq!(s.viewer.state().drag(), DragState::CenterImage);
    drive(&mut s, [motion(ButtonMask::LEFT, 400, 400)]);
    assert_eq!(s.viewer.state().inversion().center, vector![100.0, 100.0]);
    drive(&mut s, [button(Button::Right, ButtonAction::Release, 300, 250)]);
    assert_eq!(s.viewer.state().inversion().center, vector![300.0, 250.0]);
    assert_eq!(s.viewer.state().drag(), DragState::Idle);
}

#[test]
fn any_release_ends_the_drag() {
    let mut s = session(vec![]);
    park_center(&mut s);
    drive(&mut s, [button(Button::Left, ButtonAction::Press, 50, 50)]);
    assert_eq!(s.viewer.state().drag(), DragState::Background { anchor: (50, 50) });
    drive(&mut s, [button(Button::Right, ButtonAction::Release, 90, 90)]);
    assert_eq!(s.viewer.state().drag(), DragState::Idle);
    assert_eq!(s.viewer.state().transform().offset(), vector![0.0, 0.0]);
}

#[test]
fn secondary_press_off_handle_does_nothing() {
    let mut s = session(vec![]);
    drive(&mut s, [button(Button::Right, ButtonAction::Press, 500, 500)]);
    assert_eq!(s.viewer.state().drag(), DragState::Idle);
}

#[test]
fn any_key_returns_to_idle() {
    for press in [
        button(Button::Left, ButtonAction::Press, 100, 100),
        button(Button::Right, ButtonAction::Press, 100, 100),
        button(Button::Left, ButtonAction::Press, 500, 500),
    ] {
        for k in [key('x'), key('j'), special(Key::Other(42))] {
            let mut s = session(vec![]);
            drive(&mut s, [press]);
            assert_ne!(s.viewer.state().drag(), DragState::Idle);
            drive(&mut s, [k]);
            assert_eq!(s.viewer.state().drag(), DragState::Idle);
        }
    }
}

#[test]
fn wheel_over_handle_scales_radius() {
    let mut s = session(vec![]);
    drive(&mut s, [button(Button::WheelDown, ButtonAction::Press, 100, 100)]);
    assert!((s.viewer.state().inversion().radius - 400.0 * 1.13).abs() < 1e-9);
    drive(&mut s, [button(Button::WheelUp, ButtonAction::Press, 100, 100)]);
    assert!((s.viewer.state().inversion().radius - 400.0).abs() < 1e-9);
    assert_eq!(s.viewer.state().transform().scale(), 1.0);
}

#[test]
fn wheel_elsewhere_zooms_about_pointer() {
    let mut s = session(vec![]);
    drive(&mut s, [button(Button::WheelDown, ButtonAction::Press, 600, 450)]);
    let t = *s.viewer.state().transform();
    assert!((t.scale() - 1.43).abs() < 1e-12);
    assert!((t.to_view(vector![600.0, 450.0]) - vector![600.0, 450.0]).norm() < 1e-9);
    // wheel releases are ignored
    drive(&mut s, [button(Button::WheelDown, ButtonAction::Release, 600, 450)]);
    assert!((s.viewer.state().transform().scale() - 1.43).abs() < 1e-12);
}

#[test]
fn pan_keys_follow_bindings() {
    let mut s = session(vec![]);
    drive(&mut s, [key('h'), key('j')]);
    assert_eq!(s.viewer.state().transform().offset(), vector![10.0, -10.0]);
    drive(&mut s, [special(Key::Left), special(Key::Up)]);
    assert_eq!(s.viewer.state().transform().offset(), vector![110.0, 90.0]);
    drive(&mut s, [key('l'), key('k'), special(Key::Right), special(Key::Down)]);
    assert_eq!(s.viewer.state().transform().offset(), vector![0.0, 0.0]);
}

#[test]
fn toggles_and_interpolation() {
    let mut s = session(vec![]);
    drive(&mut s, [key('d'), key('p'), key('w'), key('.'), key('3')]);
    let d = *s.viewer.state().display();
    assert!(d.show_debug && d.tile_plane && d.show_horizon && d.show_grid_points);
    assert_eq!(d.interpolation, InterpolationOrder::Bicubic);
    drive(&mut s, [key('i'), key('i'), key('9')]);
    assert_eq!(
        s.viewer.state().display().interpolation,
        InterpolationOrder::Linear
    );
    drive(&mut s, [key('d')]);
    assert!(!s.viewer.state().display().show_debug);
}

#[test]
fn recenter_restores_defaults_but_keeps_points() {
    let mut s = session(vec![vector![5.0, 5.0], vector![6.0, 7.0]]);
    drive(
        &mut s,
        [
            key('+'),
            key('h'),
            key('d'),
            button(Button::WheelDown, ButtonAction::Press, 100 * 143 / 100, 100),
        ],
    );
    drive(&mut s, [key('c')]);
    let st = s.viewer.state();
    assert_eq!(*st.transform(), crate::geom::ViewTransform::identity());
    assert_eq!(st.inversion().center, vector![100.0, 100.0]);
    assert_eq!(st.inversion().radius, 400.0);
    assert!(!st.display().show_debug);
    assert_eq!(st.points().len(), 2);
}

#[test]
fn quit_key_stops_the_loop() {
    let mut s = session(vec![]);
    let mut src = ScriptedSource::new([key('h'), key('q'), key('h')]);
    assert_eq!(s.run(&mut src), 0);
    assert_eq!(s.viewer.state().transform().offset(), vector![10.0, 0.0]);
}

#[test]
fn quit_key_also_ends_a_drag() {
    let mut s = session(vec![]);
    park_center(&mut s);
    drive(&mut s, [button(Button::Left, ButtonAction::Press, 50, 50)]);
    assert_ne!(s.viewer.state().drag(), DragState::Idle);
    assert_eq!(s.run(&mut ScriptedSource::new([key('q')])), 0);
    assert_eq!(s.viewer.state().drag(), DragState::Idle);
}

#[test]
fn every_drag_step_repaints() {
    let mut s = session(vec![vector![300.0, 200.0]]);
    park_center(&mut s);
    drive(&mut s, [Event::Expose]);

    let mut src = ScriptedSource::default();
    let mut presented = 0;
    for ev in [
        button(Button::Left, ButtonAction::Press, 50, 50),
        motion(ButtonMask::LEFT, 60, 55),
        motion(ButtonMask::LEFT, 75, 40),
        button(Button::Left, ButtonAction::Release, 80, 40),
    ] {
        src.push(ev);
        s.run(&mut src);
        assert_eq!(src.presented(), presented + 1, "after {ev:?}");
        presented = src.presented();
    }
    assert_eq!(s.viewer.state().transform().offset(), vector![30.0, -10.0]);
}

#[test]
fn motion_without_drag_does_not_repaint() {
    let mut s = session(vec![]);
    park_center(&mut s);
    drive(&mut s, [Event::Expose]);
    let src = drive(
        &mut s,
        [
            motion(ButtonMask::LEFT, 60, 55),
            motion(ButtonMask::NONE, 70, 70),
            motion(ButtonMask::RIGHT | ButtonMask::MIDDLE, 90, 90),
        ],
    );
    assert_eq!(src.presented(), 0);
    assert!(!s.window.is_changed());
}

#[test]
fn frame_layers_single_point() {
    let mut s = session(vec![vector![300.0, 200.0]]);
    drive(&mut s, [Event::Expose]);
    let c = s.window.canvas();
    assert_eq!(c.pixel(300, 200), Some(Rgb::RED));
    assert_eq!(c.pixel(100, 100), Some(Rgb([0, 255, 0])));
    assert_eq!(c.pixel(101, 100), Some(Rgb::DARK_GREEN));
    assert_eq!(c.pixel(100, 500), Some(Rgb::GREEN));
    assert_eq!(c.pixel(500, 100), Some(Rgb::GREEN));
    assert_eq!(c.pixel(700, 20), Some(Rgb::WHITE));
    // a single point has no hull edges
    assert_eq!(s.viewer.hull().edges().count(), 0);
}

#[test]
fn frame_recomputes_inversion_and_hull() {
    let pts = random_points(Distribution::Gaussian, 40, 80.0, vector![400.0, 300.0], 3);
    let mut s = session(pts.clone());
    drive(&mut s, [Event::Expose]);
    let inv = *s.viewer.state().inversion();
    let expected: Vec<Point> = pts
        .iter()
        .map(|&p| invert(InversionMap::Flip, inv.center, inv.radius, p))
        .collect();
    assert_eq!(s.viewer.inverted(), expected.as_slice());
    assert_eq!(*s.viewer.hull(), convex_hull(&expected));
}

#[test]
fn outward_edges_are_blue() {
    let pts = random_points(Distribution::Gaussian, 60, 120.0, vector![380.0, 280.0], 11);
    let mut s = session(pts);
    drive(&mut s, [Event::Expose]);
    let inv = *s.viewer.state().inversion();
    let t = *s.viewer.state().transform();
    let c = t.to_window(inv.center);
    let canvas = s.window.canvas();
    for (a, b) in s.viewer.hull().edges() {
        let p = t.to_window(invert(InversionMap::Flip, inv.center, inv.radius, a));
        let q = t.to_window(invert(InversionMap::Flip, inv.center, inv.radius, b));
        if signed_area(p, q, c) > 0.0 {
            if let Some(px) = canvas.pixel(p.x as i32 as i64, p.y as i32 as i64) {
                assert_eq!(px, Rgb::BLUE);
            }
        }
    }
    assert!(s.viewer.hull().edges().count() >= 3);
}

#[test]
fn debug_display_adds_overlays() {
    let pts = random_points(Distribution::Gaussian, 60, 120.0, vector![380.0, 280.0], 11);
    let lit = |s: &Session| {
        s.window
            .canvas()
            .as_rgb()
            .chunks_exact(3)
            .filter(|px| *px != Rgb::WHITE.0)
            .count()
    };
    let mut plain = session(pts.clone());
    drive(&mut plain, [Event::Expose]);
    let mut debug = session(pts);
    drive(&mut debug, [key('d')]);
    assert!(lit(&debug) >= lit(&plain));
    let overlay = debug
        .window
        .canvas()
        .as_rgb()
        .chunks_exact(3)
        .any(|px| px == Rgb::GRAY.0 || px == Rgb::CYAN.0);
    assert!(overlay);
}

#[test]
fn degenerate_parameters_still_paint() {
    // collinear, duplicated and on-pole points
    let pts = vec![
        vector![100.0, 100.0],
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 0.0],
    ];
    let mut s = session(pts);
    let mut events = vec![key('d')];
    events.extend(std::iter::repeat(key('+')).take(100));
    events.extend(std::iter::repeat(key('-')).take(300));
    drive(&mut s, events);
    assert_eq!(s.viewer.state().transform().scale(), s.viewer.cfg().min_scale);
    drive(&mut s, std::iter::repeat(key('+')).take(400));
    assert_eq!(s.viewer.state().transform().scale(), s.viewer.cfg().max_scale);

    let cfg = s.viewer.cfg().clone();
    s.viewer
        .state_mut()
        .set_inversion(vector![1.0, 0.0], 0.0, &cfg);
    assert_eq!(s.viewer.state().inversion().radius, cfg.min_radius);
    s.paint();
    assert!(s.viewer.inverted().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn radius_never_reaches_zero() {
    let mut s = session(vec![vector![0.0, 0.0]]);
    drive(
        &mut s,
        std::iter::repeat(button(Button::WheelUp, ButtonAction::Press, 100, 100)).take(500),
    );
    let r = s.viewer.state().inversion().radius;
    assert!(r >= s.viewer.cfg().min_radius && r > 0.0);
}

#[test]
fn classic_inversion_is_selectable() {
    let cfg = ViewerCfg {
        inversion: InversionMap::Classic,
        ..ViewerCfg::default()
    };
    let mut s = Session::new(vec![vector![500.0, 100.0]], 800, 600, cfg).unwrap();
    s.paint();
    // r = 400 = R: the classic map fixes points on the circle
    assert!((s.viewer.inverted()[0] - vector![500.0, 100.0]).norm() < 1e-9);
}

#[test]
fn key_action_table() {
    assert_eq!(key_action(Key::Char('q')), Some(Action::Quit));
    assert_eq!(key_action(Key::Escape), Some(Action::Quit));
    assert_eq!(key_action(Key::Up), Some(Action::Pan(0, 1, Step::Large)));
    assert_eq!(
        key_action(Key::Char('2')),
        Some(Action::SetInterpolation(InterpolationOrder::Bilinear))
    );
    assert_eq!(key_action(Key::Char('7')), None);
    assert_eq!(key_action(Key::Char('z')), None);
    assert_eq!(key_action(Key::Other(9)), None);
}

#[test]
fn signed_button_codes() {
    assert_eq!(
        Button::from_signed(1),
        Some((Button::Left, ButtonAction::Press))
    );
    assert_eq!(
        Button::from_signed(-3),
        Some((Button::Right, ButtonAction::Release))
    );
    assert_eq!(
        Button::from_signed(5),
        Some((Button::WheelDown, ButtonAction::Press))
    );
    assert_eq!(Button::from_signed(0), None);
    assert_eq!(Button::from_signed(6), None);
    assert_eq!(Button::WheelUp.code(), 4);
}

#[test]
fn cfg_validation() {
    assert!(ViewerCfg::default().validate().is_ok());
    let bad = ViewerCfg {
        zoom_factor: 0.0,
        ..ViewerCfg::default()
    };
    assert!(matches!(
        bad.validate(),
        Err(CfgError::NotPositive {
            field: "zoom_factor",
            ..
        })
    ));
    let inverted_range = ViewerCfg {
        min_scale: 10.0,
        max_scale: 1.0,
        ..ViewerCfg::default()
    };
    assert!(matches!(
        inverted_range.validate(),
        Err(CfgError::ScaleRange { .. })
    ));
    let huge_marker = ViewerCfg {
        disk_radius: 1e6,
        ..ViewerCfg::default()
    };
    assert!(matches!(huge_marker.validate(), Err(CfgError::TooLarge { .. })));
    let huge_buffer = ViewerCfg {
        max_width: 1 << 20,
        ..ViewerCfg::default()
    };
    assert!(matches!(
        huge_buffer.validate(),
        Err(CfgError::CapacityTooLarge { max: 8192, .. })
    ));
    assert!(Viewer::new(vec![], bad).is_err());
}

#[test]
fn cfg_partial_json_uses_defaults() {
    let cfg: ViewerCfg =
        serde_json::from_str(r#"{"zoom_factor": 2.0, "inversion": "classic"}"#).unwrap();
    assert_eq!(cfg.zoom_factor, 2.0);
    assert_eq!(cfg.inversion, InversionMap::Classic);
    assert_eq!(cfg.disk_radius, 7.3);
    assert_eq!(cfg.max_width, 2000);
}
