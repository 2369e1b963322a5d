use std::io;

use crossterm::event;

use super::event::TuiEvent;

/// Alternates between waiting for input and redrawing.
///
/// There is no tick or frame timer: a render is emitted once at startup and
/// then once after every terminal event, so an idle screen costs nothing.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self { dirty: true }
    }
}

impl EventLoop {
    /// Returns the next event, blocking until input arrives when the screen
    /// is up to date.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::default();
        assert!(events.next().unwrap().is_render());
        assert!(!events.dirty);
    }
}
