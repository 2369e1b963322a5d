use crossterm::event::Event;
use ratatui::Frame;

/// Terminal application driven by [`Runtime::run`](super::Runtime::run).
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles one terminal event (key input, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Draws the whole screen. Only called after the state may have changed.
    fn draw(&self, frame: &mut Frame);
}
