use bracket_lib::prelude::VirtualKeyCode;
use common::Action;

use crate::config::KeyBindings;

/// Keyboard controls resolved to key codes.
#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub cast: VirtualKeyCode,
    pub reel: VirtualKeyCode,
    pub confirm: VirtualKeyCode,
    pub select: VirtualKeyCode,
    pub back: VirtualKeyCode,
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub scroll_up: VirtualKeyCode,
    pub scroll_down: VirtualKeyCode,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            cast: Space,
            reel: R,
            confirm: C,
            select: Return,
            back: Escape,
            up: W,
            down: S,
            left: A,
            right: D,
            scroll_up: PageUp,
            scroll_down: PageDown,
        }
    }
}

impl InputConfig {
    /// Resolves configured key names. Unknown names keep the default key.
    pub fn from_bindings(keys: &KeyBindings) -> Self {
        let mut cfg = Self::default();
        let slots = [
            (&keys.cast, &mut cfg.cast, "cast"),
            (&keys.reel, &mut cfg.reel, "reel"),
            (&keys.confirm, &mut cfg.confirm, "confirm"),
            (&keys.select, &mut cfg.select, "select"),
            (&keys.back, &mut cfg.back, "back"),
            (&keys.up, &mut cfg.up, "up"),
            (&keys.down, &mut cfg.down, "down"),
            (&keys.left, &mut cfg.left, "left"),
            (&keys.right, &mut cfg.right, "right"),
            (&keys.scroll_up, &mut cfg.scroll_up, "scroll_up"),
            (&keys.scroll_down, &mut cfg.scroll_down, "scroll_down"),
        ];
        for (name, slot, control) in slots {
            match parse_key(name) {
                Some(kc) => *slot = kc,
                None => log::warn!("Unknown key `{}` for {}, keeping default", name, control),
            }
        }
        cfg
    }

    /// Logical actions triggered by `key`. Arrow keys always steer.
    pub fn actions(&self, key: VirtualKeyCode) -> Vec<Action> {
        use VirtualKeyCode::*;
        let mut out = Vec::new();
        if key == self.cast {
            out.push(Action::Cast);
        }
        if key == self.reel {
            out.push(Action::ReelOrCancel);
        }
        if key == self.confirm {
            out.push(Action::ConfirmChallenge);
        }
        if key == self.select {
            out.push(Action::Select);
        }
        if key == self.back {
            out.push(Action::EscapeBack);
        }
        if key == self.up || key == Up {
            out.extend([Action::MenuUp, Action::MoveUp]);
        }
        if key == self.down || key == Down {
            out.extend([Action::MenuDown, Action::MoveDown]);
        }
        if key == self.left || key == Left {
            out.push(Action::MoveLeft);
        }
        if key == self.right || key == Right {
            out.push(Action::MoveRight);
        }
        out
    }
}

/// Maps a lowercase key name to its key code.
pub fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    let name = name.trim().to_ascii_lowercase();
    let key = match name.as_str() {
        "left" => Left,
        "right" => Right,
        "up" => Up,
        "down" => Down,
        "space" => Space,
        "return" | "enter" => Return,
        "escape" | "esc" => Escape,
        "tab" => Tab,
        "pageup" => PageUp,
        "pagedown" => PageDown,
        "a" => A,
        "b" => B,
        "c" => C,
        "d" => D,
        "e" => E,
        "f" => F,
        "h" => H,
        "i" => I,
        "j" => J,
        "k" => K,
        "l" => L,
        "q" => Q,
        "r" => R,
        "s" => S,
        "w" => W,
        "x" => X,
        "z" => Z,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let cfg = InputConfig::from_bindings(&KeyBindings::default());
        assert_eq!(cfg, InputConfig::default());
    }

    #[test]
    fn unknown_names_keep_defaults() {
        let keys = KeyBindings {
            cast: "X".into(),
            reel: "nonsense".into(),
            ..KeyBindings::default()
        };
        let cfg = InputConfig::from_bindings(&keys);
        assert_eq!(cfg.cast, VirtualKeyCode::X);
        assert_eq!(cfg.reel, VirtualKeyCode::R);
    }

    #[test]
    fn arrows_drive_menus_and_movement() {
        let cfg = InputConfig::default();
        assert_eq!(
            cfg.actions(VirtualKeyCode::Up),
            vec![Action::MenuUp, Action::MoveUp]
        );
        assert_eq!(cfg.actions(VirtualKeyCode::A), vec![Action::MoveLeft]);
        assert_eq!(cfg.actions(VirtualKeyCode::Space), vec![Action::Cast]);
        assert!(cfg.actions(VirtualKeyCode::F).is_empty());
    }

    #[test]
    fn parse_key_is_case_insensitive() {
        assert_eq!(parse_key("PageUp"), Some(VirtualKeyCode::PageUp));
        assert_eq!(parse_key(" Esc "), Some(VirtualKeyCode::Escape));
        assert_eq!(parse_key("f13"), None);
    }
}
