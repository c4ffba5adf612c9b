//! Keyboard shortcuts

use crate::sim::ShapeKind;

/// A user command that does not carry a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start when idle, stop when running
    ToggleRun,
    /// Re-center the ball (idle only)
    Reset,
    /// Switch shape (idle only)
    SelectShape(ShapeKind),
}

/// Map a `KeyboardEvent.code` to a command
pub fn command_for_key(code: &str) -> Option<Command> {
    let command = match code {
        "Space" => Command::ToggleRun,
        "KeyR" => Command::Reset,
        "Digit1" | "Numpad1" => Command::SelectShape(ShapeKind::Circle),
        "Digit2" | "Numpad2" => Command::SelectShape(ShapeKind::Square),
        "Digit3" | "Numpad3" => Command::SelectShape(ShapeKind::Triangle),
        "Digit4" | "Numpad4" => Command::SelectShape(ShapeKind::Hexagon),
        _ => return None,
    };
    Some(command)
}
