use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Rows moved per wheel notch.
const WHEEL_STEP: i32 = 3;

/// Events surfaced to the pane driver.
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel movement in rows (positive = toward the bottom)
    Wheel(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Polls crossterm for terminal events with a tick fallback.
pub struct EventPump {
    tick_rate: Duration,
}

impl EventPump {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(wheel_delta(&mouse).map(AppEvent::Wheel)),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn wheel_delta(mouse: &MouseEvent) -> Option<i32> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(-WHEEL_STEP),
        MouseEventKind::ScrollDown => Some(WHEEL_STEP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_wheel_maps_to_row_deltas() {
        assert_eq!(wheel_delta(&mouse(MouseEventKind::ScrollUp)), Some(-WHEEL_STEP));
        assert_eq!(wheel_delta(&mouse(MouseEventKind::ScrollDown)), Some(WHEEL_STEP));
        assert_eq!(wheel_delta(&mouse(MouseEventKind::Down(MouseButton::Left))), None);
    }
}
