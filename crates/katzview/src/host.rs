//! Window and event-loop seam.
//!
//! Purpose
//! - `Window` owns the pixel buffer and the loop flags (`changed`, image
//!   update, exit request) that handlers raise.
//! - `EventHandler` is the set of callbacks a window drives; every method has
//!   a no-op default.
//! - `EventSource` is the platform side: it yields events and receives frames.
//!   The library ships `ScriptedSource`, an in-memory queue.
//!
//! Model
//! - Single control thread. `Window::run` takes one event, dispatches it,
//!   then repaints (`on_expose` + `present`) when the event was an expose or
//!   a handler marked the window changed.

use std::collections::VecDeque;

use crate::geom::Point;
use crate::raster::Canvas;
use crate::viewer::{
    Button, ButtonAction, ButtonMask, CfgError, Key, Modifiers, Viewer, ViewerCfg,
};

/// One input notification from the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key {
        key: Key,
        mods: Modifiers,
        x: i32,
        y: i32,
    },
    Button {
        button: Button,
        action: ButtonAction,
        mods: Modifiers,
        x: i32,
        y: i32,
    },
    Motion {
        buttons: ButtonMask,
        mods: Modifiers,
        x: i32,
        y: i32,
    },
    Resize {
        w: usize,
        h: usize,
    },
    Expose,
}

/// Callbacks driven by `Window`.
pub trait EventHandler {
    fn on_key(&mut self, win: &mut Window, key: Key, _mods: Modifiers, _x: i32, _y: i32) {
        if key == Key::Escape {
            win.request_exit(0);
        }
    }

    fn on_button(
        &mut self,
        _win: &mut Window,
        _button: Button,
        _action: ButtonAction,
        _mods: Modifiers,
        _x: i32,
        _y: i32,
    ) {
    }

    fn on_motion(&mut self, _win: &mut Window, _buttons: ButtonMask, _mods: Modifiers, _x: i32, _y: i32) {}

    /// Called after the logical size changed (already clamped to capacity).
    fn on_resize(&mut self, _win: &mut Window, _w: usize, _h: usize) {}

    /// Paint the frame into `win.canvas_mut()`.
    fn on_expose(&mut self, _win: &mut Window) {}
}

/// A finished frame handed to the platform.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Row-major RGB, `width * height * 3` bytes.
    pub rgb: &'a [u8],
    pub width: usize,
    pub height: usize,
    /// The size changed since the last presented frame.
    pub image_update: bool,
}

/// Platform side of the loop.
pub trait EventSource {
    /// Next event; `None` once the source is closed.
    fn next_event(&mut self) -> Option<Event>;

    fn present(&mut self, _frame: Frame<'_>) {}
}

/// Pixel buffer plus loop flags.
#[derive(Clone, Debug)]
pub struct Window {
    canvas: Canvas,
    changed: bool,
    image_update: bool,
    exit: Option<i32>,
}

impl Window {
    /// Allocate the full `max_w × max_h` buffer once; the logical size is clamped to it.
    pub fn new(w: usize, h: usize, max_w: usize, max_h: usize) -> Self {
        Self {
            canvas: Canvas::new(w, h, max_w, max_h),
            changed: true,
            image_update: true,
            exit: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Request a repaint before the next event.
    #[inline]
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Pending size change not yet presented.
    #[inline]
    pub fn image_update_pending(&self) -> bool {
        self.image_update
    }

    /// Stop the loop once the current event is handled.
    #[inline]
    pub fn request_exit(&mut self, code: i32) {
        self.exit = Some(code);
    }

    #[inline]
    pub fn exit_requested(&self) -> Option<i32> {
        self.exit
    }

    /// Apply a platform resize: clamp to capacity, flag the image update and
    /// notify the handler. Same-size notifications are ignored.
    pub fn resize<H: EventHandler + ?Sized>(&mut self, handler: &mut H, w: usize, h: usize) {
        let (cap_w, cap_h) = self.canvas.capacity();
        let (w, h) = (w.min(cap_w), h.min(cap_h));
        if (w, h) == (self.width(), self.height()) {
            return;
        }
        self.canvas.resize(w, h);
        self.image_update = true;
        self.changed = true;
        handler.on_resize(self, w, h);
    }

    /// Route one event to its handler method.
    pub fn dispatch<H: EventHandler + ?Sized>(&mut self, handler: &mut H, event: Event) {
        match event {
            Event::Key { key, mods, x, y } => handler.on_key(self, key, mods, x, y),
            Event::Button {
                button,
                action,
                mods,
                x,
                y,
            } => handler.on_button(self, button, action, mods, x, y),
            Event::Motion { buttons, mods, x, y } => handler.on_motion(self, buttons, mods, x, y),
            Event::Resize { w, h } => self.resize(handler, w, h),
            Event::Expose => {}
        }
    }

    /// Paint through the handler and hand the frame to the source.
    pub fn repaint<H, S>(&mut self, handler: &mut H, source: &mut S)
    where
        H: EventHandler + ?Sized,
        S: EventSource + ?Sized,
    {
        self.changed = false;
        handler.on_expose(self);
        source.present(Frame {
            rgb: self.canvas.as_rgb(),
            width: self.width(),
            height: self.height(),
            image_update: self.image_update,
        });
        self.image_update = false;
    }

    /// Run until a handler requests exit (its code is returned) or the source
    /// closes (returns 0).
    pub fn run<H, S>(&mut self, handler: &mut H, source: &mut S) -> i32
    where
        H: EventHandler + ?Sized,
        S: EventSource + ?Sized,
    {
        self.exit = None;
        loop {
            let Some(event) = source.next_event() else {
                tracing::info!("event source closed");
                return 0;
            };
            self.dispatch(handler, event);
            if let Some(code) = self.exit.take() {
                tracing::info!(code, "exit requested");
                return code;
            }
            if event == Event::Expose || self.changed {
                self.repaint(handler, source);
            }
        }
    }
}

/// In-memory event queue; counts presented frames.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    events: VecDeque<Event>,
    presented: usize,
    last_size: Option<(usize, usize)>,
    image_updates: usize,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    #[inline]
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Size of the last presented frame.
    #[inline]
    pub fn last_size(&self) -> Option<(usize, usize)> {
        self.last_size
    }

    /// Presented frames that carried the image-update flag.
    #[inline]
    pub fn image_updates(&self) -> usize {
        self.image_updates
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn present(&mut self, frame: Frame<'_>) {
        self.presented += 1;
        self.last_size = Some((frame.width, frame.height));
        if frame.image_update {
            self.image_updates += 1;
        }
    }
}

/// A viewer bound to its window.
#[derive(Clone, Debug)]
pub struct Session {
    pub window: Window,
    pub viewer: Viewer,
}

impl Session {
    /// Load `points` into a fresh viewer with a `width × height` window
    /// (buffer capacity from `cfg.max_width × cfg.max_height`).
    pub fn new(points: Vec<Point>, width: usize, height: usize, cfg: ViewerCfg) -> Result<Self, CfgError> {
        let window = Window::new(width, height, cfg.max_width, cfg.max_height);
        let viewer = Viewer::new(points, cfg)?;
        Ok(Self { window, viewer })
    }

    /// Block until exit is requested or the source closes; returns the exit code.
    pub fn run<S: EventSource + ?Sized>(&mut self, source: &mut S) -> i32 {
        self.window.run(&mut self.viewer, source)
    }

    /// Paint once outside the loop (e.g. for a headless snapshot).
    pub fn paint(&mut self) {
        self.viewer.paint(self.window.canvas_mut());
    }
}
