//! Keyboard and mouse translation into game actions

use anyhow::{Context, Result};
use float_along_core::{Action, Point};
use opencv::highgui;
use std::sync::{Arc, Mutex};

const KEY_ENTER: i32 = 13;
const KEY_LINE_FEED: i32 = 10;
const KEY_ESC: i32 = 27;
const KEY_SPACE: i32 = 32;

/// Action bound to a key code as returned by `wait_key`
pub fn key_action(key: i32) -> Option<Action> {
    if key < 0 {
        return None;
    }

    match key & 0xFF {
        KEY_SPACE => Some(Action::TogglePause),
        KEY_ESC => Some(Action::Quit),
        KEY_ENTER | KEY_LINE_FEED => Some(Action::Confirm),
        code => match code as u8 {
            b'q' => Some(Action::Quit),
            b'm' => Some(Action::ToggleMask),
            b'd' => Some(Action::ToggleDevOverlay),
            b'f' => Some(Action::SetupField),
            b'b' => Some(Action::SetupBall),
            b's' => Some(Action::Confirm),
            b'r' => Some(Action::ReshuffleGoal),
            _ => None,
        },
    }
}

#[derive(Debug, Default)]
struct LatchState {
    pressed: bool,
    clicks: Vec<Point>,
}

/// Collects left clicks from the window's mouse callback.
///
/// A held button counts once: further press events are ignored until the
/// button is released. A release outside the window is noticed on the next
/// move event that no longer reports the left button.
#[derive(Debug, Clone, Default)]
pub struct ClickLatch {
    state: Arc<Mutex<LatchState>>,
}

impl ClickLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the mouse events of `window` into this latch
    pub fn install(&self, window: &str) -> Result<()> {
        let latch = self.clone();
        highgui::set_mouse_callback(
            window,
            Some(Box::new(move |event, x, y, flags| latch.on_mouse(event, x, y, flags))),
        )
        .with_context(|| format!("Failed to install mouse callback on {}", window))?;
        Ok(())
    }

    pub fn on_mouse(&self, event: i32, x: i32, y: i32, flags: i32) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        match event {
            highgui::EVENT_LBUTTONDOWN if !state.pressed => {
                state.pressed = true;
                state.clicks.push(Point::new(x, y));
            }
            highgui::EVENT_LBUTTONUP => state.pressed = false,
            highgui::EVENT_MOUSEMOVE if flags & highgui::EVENT_FLAG_LBUTTON == 0 => state.pressed = false,
            _ => {}
        }
    }

    /// Clicks since the last call, oldest first
    pub fn drain(&self) -> Vec<Point> {
        match self.state.lock() {
            Ok(mut state) => std::mem::take(&mut state.clicks),
            Err(_) => Vec::new(),
        }
    }
}
