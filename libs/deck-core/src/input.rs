//! Keyboard command mapping.

/// Keys the viewer reacts to, parsed from DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            // "Spacebar" is what older browsers report
            " " | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }
}

/// Kind of element holding input focus when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Button,
    TextInput,
    TextArea,
    Other,
}

impl Focus {
    /// Whether space has a native meaning on this element.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::TextInput | Self::TextArea)
    }
}

/// Viewer action triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Previous,
    Next,
    Flip,
}

/// Map a key press to a command. `None` leaves the key to the host.
pub fn command_for_key(key: Key, focus: Focus) -> Option<Command> {
    match key {
        Key::ArrowLeft => Some(Command::Previous),
        Key::ArrowRight => Some(Command::Next),
        Key::Space if focus.is_interactive() => None,
        Key::Space => Some(Command::Flip),
        Key::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("Spacebar"), Key::Space);
        assert_eq!(Key::from_name("Enter"), Key::Other);
    }

    #[test]
    fn arrows_ignore_focus() {
        assert_eq!(command_for_key(Key::ArrowLeft, Focus::Button), Some(Command::Previous));
        assert_eq!(command_for_key(Key::ArrowRight, Focus::TextArea), Some(Command::Next));
    }

    #[test]
    fn space_flips_without_interactive_focus() {
        assert_eq!(command_for_key(Key::Space, Focus::None), Some(Command::Flip));
        assert_eq!(command_for_key(Key::Space, Focus::Other), Some(Command::Flip));
    }

    #[test]
    fn space_on_controls_keeps_native_behaviour() {
        assert_eq!(command_for_key(Key::Space, Focus::Button), None);
        assert_eq!(command_for_key(Key::Space, Focus::TextInput), None);
        assert_eq!(command_for_key(Key::Space, Focus::TextArea), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(command_for_key(Key::Other, Focus::None), None);
    }
}
