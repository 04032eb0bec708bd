//! Input handlers: map host events onto `ViewerState` mutations.
//!
//! Handlers never draw. They mutate state and mark the window changed; the
//! host repaints through `on_expose` before the next event is handled.

use super::input::{Button, ButtonAction, ButtonMask, Key, Modifiers};
use super::state::{DragState, InterpolationOrder};
use super::Viewer;
use crate::host::{EventHandler, Window};

/// Pan step size selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Small,
    Large,
}

/// What a key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Recenter,
    /// Pan by `(dx, dy)` steps of the given size.
    Pan(i8, i8, Step),
    ZoomIn,
    ZoomOut,
    SetInterpolation(InterpolationOrder),
    CycleInterpolation,
    ToggleTilePlane,
    ToggleHorizon,
    ToggleGridPoints,
    ToggleDebug,
}

/// Key bindings.
pub fn key_action(key: Key) -> Option<Action> {
    let action = match key {
        Key::Escape | Key::Char('q') => Action::Quit,
        Key::Char('c') => Action::Recenter,
        Key::Char('j') => Action::Pan(0, -1, Step::Small),
        Key::Char('k') => Action::Pan(0, 1, Step::Small),
        Key::Char('h') => Action::Pan(1, 0, Step::Small),
        Key::Char('l') => Action::Pan(-1, 0, Step::Small),
        Key::Down => Action::Pan(0, -1, Step::Large),
        Key::Up => Action::Pan(0, 1, Step::Large),
        Key::Right => Action::Pan(-1, 0, Step::Large),
        Key::Left => Action::Pan(1, 0, Step::Large),
        Key::Char('+') => Action::ZoomIn,
        Key::Char('-') => Action::ZoomOut,
        Key::Char('i') => Action::CycleInterpolation,
        Key::Char('p') => Action::ToggleTilePlane,
        Key::Char('w') => Action::ToggleHorizon,
        Key::Char('.') => Action::ToggleGridPoints,
        Key::Char('d') => Action::ToggleDebug,
        Key::Char(c) => Action::SetInterpolation(InterpolationOrder::from_digit(c.to_digit(10)?)?),
        _ => return None,
    };
    Some(action)
}

impl Viewer {
    fn apply(&mut self, win: &mut Window, action: Action) {
        let cfg = &self.cfg;
        let state = &mut self.state;
        match action {
            Action::Quit => win.request_exit(0),
            Action::Recenter => state.center_view(cfg),
            Action::Pan(dx, dy, step) => {
                let s = match step {
                    Step::Small => cfg.pan_step_small,
                    Step::Large => cfg.pan_step_large,
                };
                state.pan(dx as f64 * s, dy as f64 * s);
            }
            Action::ZoomIn | Action::ZoomOut => {
                let factor = if action == Action::ZoomIn {
                    cfg.zoom_factor
                } else {
                    1.0 / cfg.zoom_factor
                };
                let cx = (win.width() / 2) as f64;
                let cy = (win.height() / 2) as f64;
                state.zoom_about(cx, cy, factor, cfg);
            }
            Action::SetInterpolation(order) => state.display_mut().interpolation = order,
            Action::CycleInterpolation => {
                let d = state.display_mut();
                d.interpolation = d.interpolation.next();
            }
            Action::ToggleTilePlane => {
                let d = state.display_mut();
                d.tile_plane = !d.tile_plane;
            }
            Action::ToggleHorizon => {
                let d = state.display_mut();
                d.show_horizon = !d.show_horizon;
            }
            Action::ToggleGridPoints => {
                let d = state.display_mut();
                d.show_grid_points = !d.show_grid_points;
            }
            Action::ToggleDebug => {
                let d = state.display_mut();
                d.show_debug = !d.show_debug;
            }
        }
    }
}

impl EventHandler for Viewer {
    fn on_key(&mut self, win: &mut Window, key: Key, _mods: Modifiers, _x: i32, _y: i32) {
        self.state.set_drag(DragState::Idle);
        match key_action(key) {
            Some(Action::Quit) => {
                win.request_exit(0);
                return;
            }
            Some(action) => self.apply(win, action),
            None => {}
        }
        win.mark_changed();
    }

    fn on_button(
        &mut self,
        win: &mut Window,
        button: Button,
        action: ButtonAction,
        _mods: Modifiers,
        x: i32,
        y: i32,
    ) {
        let cfg = &self.cfg;
        let state = &mut self.state;
        let hit = state.hit_center(x as f64, y as f64, cfg);
        match (button, action) {
            (Button::Left, ButtonAction::Press) => {
                state.set_drag(if hit {
                    DragState::CenterWindow
                } else {
                    DragState::Background { anchor: (x, y) }
                });
            }
            (Button::Right, ButtonAction::Press) if hit => state.set_drag(DragState::CenterImage),
            (Button::Left, ButtonAction::Release) => {
                match state.drag() {
                    DragState::CenterWindow => state.move_center_to(x, y),
                    DragState::Background { anchor } => {
                        state.pan(x as f64 - anchor.0 as f64, y as f64 - anchor.1 as f64)
                    }
                    _ => {}
                }
                state.set_drag(DragState::Idle);
            }
            (Button::Right, ButtonAction::Release) => {
                if state.drag() == DragState::CenterImage {
                    state.move_center_to(x, y);
                }
                state.set_drag(DragState::Idle);
            }
            (Button::WheelDown, ButtonAction::Press) => {
                if hit {
                    state.scale_radius(cfg.radius_factor, cfg);
                } else {
                    state.zoom_about(x as f64, y as f64, cfg.zoom_factor, cfg);
                }
            }
            (Button::WheelUp, ButtonAction::Press) => {
                if hit {
                    state.scale_radius(1.0 / cfg.radius_factor, cfg);
                } else {
                    state.zoom_about(x as f64, y as f64, 1.0 / cfg.zoom_factor, cfg);
                }
            }
            _ => {}
        }
        win.mark_changed();
    }

    fn on_motion(&mut self, win: &mut Window, buttons: ButtonMask, _mods: Modifiers, x: i32, y: i32) {
        if !buttons.contains(ButtonMask::LEFT) {
            return;
        }
        match self.state.drag() {
            DragState::CenterWindow => {
                self.state.move_center_to(x, y);
                win.mark_changed();
            }
            DragState::Background { anchor } => {
                self.state
                    .pan(x as f64 - anchor.0 as f64, y as f64 - anchor.1 as f64);
                self.state.set_drag(DragState::Background { anchor: (x, y) });
                win.mark_changed();
            }
            _ => {}
        }
    }

    fn on_resize(&mut self, _win: &mut Window, w: usize, h: usize) {
        tracing::debug!(w, h, "resized");
    }

    fn on_expose(&mut self, win: &mut Window) {
        self.paint(win.canvas_mut());
    }
}
