//! Remappable controls
//!
//! Every player action maps to a primary key and an optional alternate.
//! Bindings persist inside `settings.ron` by key name.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the player can do from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    // Movement
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,

    // Combat
    Attack,
    EquipFist,
    EquipSword,

    // Interface
    ReleaseCursor,
}

impl GameAction {
    pub fn description(&self) -> &'static str {
        match self {
            GameAction::MoveForward => "Move Forward",
            GameAction::MoveBackward => "Move Backward",
            GameAction::MoveLeft => "Strafe Left",
            GameAction::MoveRight => "Strafe Right",
            GameAction::Attack => "Attack",
            GameAction::EquipFist => "Equip Fist",
            GameAction::EquipSword => "Equip Sword",
            GameAction::ReleaseCursor => "Release Cursor",
        }
    }

    pub fn all() -> [GameAction; 8] {
        [
            GameAction::MoveForward,
            GameAction::MoveBackward,
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Attack,
            GameAction::EquipFist,
            GameAction::EquipSword,
            GameAction::ReleaseCursor,
        ]
    }
}

/// Keys that can be bound: code, name stored in settings, label shown in UI
const KEY_TABLE: &[(KeyCode, &str, &str)] = &[
    (KeyCode::KeyW, "KeyW", "W"),
    (KeyCode::KeyA, "KeyA", "A"),
    (KeyCode::KeyS, "KeyS", "S"),
    (KeyCode::KeyD, "KeyD", "D"),
    (KeyCode::KeyQ, "KeyQ", "Q"),
    (KeyCode::KeyE, "KeyE", "E"),
    (KeyCode::KeyF, "KeyF", "F"),
    (KeyCode::KeyR, "KeyR", "R"),
    (KeyCode::ArrowUp, "ArrowUp", "↑"),
    (KeyCode::ArrowDown, "ArrowDown", "↓"),
    (KeyCode::ArrowLeft, "ArrowLeft", "←"),
    (KeyCode::ArrowRight, "ArrowRight", "→"),
    (KeyCode::Space, "Space", "SPACE"),
    (KeyCode::Enter, "Enter", "ENTER"),
    (KeyCode::Tab, "Tab", "TAB"),
    (KeyCode::Escape, "Escape", "ESC"),
    (KeyCode::ShiftLeft, "ShiftLeft", "SHIFT"),
    (KeyCode::ControlLeft, "ControlLeft", "CTRL"),
    (KeyCode::Digit1, "Digit1", "1"),
    (KeyCode::Digit2, "Digit2", "2"),
    (KeyCode::Digit3, "Digit3", "3"),
    (KeyCode::Digit4, "Digit4", "4"),
    (KeyCode::Numpad1, "Numpad1", "NUM1"),
    (KeyCode::Numpad2, "Numpad2", "NUM2"),
];

/// Parse a stored key name.
pub fn key_from_name(name: &str) -> Result<KeyCode, String> {
    KEY_TABLE
        .iter()
        .find(|(_, stored, _)| *stored == name)
        .map(|(key, _, _)| *key)
        .ok_or_else(|| format!("Unknown key name: '{}'", name))
}

/// Name a key is stored under, if it can be bound.
pub fn key_to_name(key: KeyCode) -> Option<&'static str> {
    KEY_TABLE
        .iter()
        .find(|(code, _, _)| *code == key)
        .map(|(_, stored, _)| *stored)
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(with = "option_keycode_serde", default)]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key_to_name(*key) {
            Some(name) => serializer.serialize_str(name),
            None => Err(serde::ser::Error::custom(format!("unbindable key {:?}", key))),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        key_from_name(&name).map_err(de::Error::custom)
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key.and_then(key_to_name) {
            Some(name) => serializer.serialize_some(name),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name: Option<String> = Option::deserialize(deserializer)?;
        name.map(|n| key_from_name(&n).map_err(de::Error::custom))
            .transpose()
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize, PartialEq)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    pub fn create_defaults() -> Self {
        let bindings = HashMap::from([
            (
                GameAction::MoveForward,
                KeyBinding::with_secondary(KeyCode::KeyW, KeyCode::ArrowUp),
            ),
            (
                GameAction::MoveBackward,
                KeyBinding::with_secondary(KeyCode::KeyS, KeyCode::ArrowDown),
            ),
            (
                GameAction::MoveLeft,
                KeyBinding::with_secondary(KeyCode::KeyA, KeyCode::ArrowLeft),
            ),
            (
                GameAction::MoveRight,
                KeyBinding::with_secondary(KeyCode::KeyD, KeyCode::ArrowRight),
            ),
            (GameAction::Attack, KeyBinding::new(KeyCode::Space)),
            (GameAction::EquipFist, KeyBinding::new(KeyCode::Digit1)),
            (GameAction::EquipSword, KeyBinding::new(KeyCode::Digit2)),
            (GameAction::ReleaseCursor, KeyBinding::new(KeyCode::Escape)),
        ]);

        Self { bindings }
    }

    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Fill in any action missing from a hand-edited file.
    pub fn fill_missing(&mut self) {
        for (action, binding) in Self::create_defaults().bindings {
            self.bindings.entry(action).or_insert(binding);
        }
    }

    /// Check if an action is currently held
    pub fn action_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|binding| {
            keyboard.pressed(binding.primary)
                || binding.secondary.is_some_and(|key| keyboard.pressed(key))
        })
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|binding| {
            keyboard.just_pressed(binding.primary)
                || binding.secondary.is_some_and(|key| keyboard.just_pressed(key))
        })
    }

    /// Human-readable label for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        KEY_TABLE
            .iter()
            .find(|(code, _, _)| *code == key)
            .map(|(_, _, label)| *label)
            .unwrap_or("???")
    }

    pub fn binding_display(&self, action: GameAction) -> String {
        match self.get(action) {
            Some(binding) => match binding.secondary {
                Some(secondary) => format!(
                    "{} / {}",
                    Self::key_name(binding.primary),
                    Self::key_name(secondary)
                ),
                None => Self::key_name(binding.primary).to_string(),
            },
            None => "Unbound".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_action() {
        let bindings = Keybindings::default();
        for action in GameAction::all() {
            assert!(bindings.get(action).is_some(), "{:?} unbound", action);
        }
        assert_eq!(bindings.binding_display(GameAction::MoveForward), "W / ↑");
        assert_eq!(bindings.binding_display(GameAction::Attack), "SPACE");
    }

    #[test]
    fn test_alternate_key_triggers_action() {
        let bindings = Keybindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ArrowLeft);
        assert!(bindings.action_pressed(GameAction::MoveLeft, &keyboard));
        assert!(bindings.action_just_pressed(GameAction::MoveLeft, &keyboard));
        assert!(!bindings.action_pressed(GameAction::MoveRight, &keyboard));
    }

    #[test]
    fn test_unknown_key_name_is_rejected() {
        assert_eq!(key_from_name("Digit2"), Ok(KeyCode::Digit2));
        assert!(key_from_name("Hyper").is_err());
    }

    #[test]
    fn test_ron_round_trip_keeps_alternates() {
        let mut bindings: Keybindings = ron::from_str(
            r#"(bindings: { Attack: (primary: "KeyF", secondary: Some("Enter")) })"#,
        )
        .unwrap();
        bindings.fill_missing();
        assert_eq!(
            bindings.get(GameAction::Attack),
            Some(&KeyBinding::with_secondary(KeyCode::KeyF, KeyCode::Enter))
        );

        let text = ron::to_string(&bindings).unwrap();
        let loaded: Keybindings = ron::from_str(&text).unwrap();
        assert_eq!(loaded, bindings);
    }

    #[test]
    fn test_fill_missing_restores_defaults() {
        let mut bindings: Keybindings = ron::from_str(
            r#"(bindings: { Attack: (primary: "KeyF", secondary: None) })"#,
        )
        .unwrap();
        bindings.fill_missing();
        assert_eq!(bindings.get(GameAction::Attack).map(|b| b.primary), Some(KeyCode::KeyF));
        assert_eq!(bindings.get(GameAction::EquipSword).map(|b| b.primary), Some(KeyCode::Digit2));
    }
}
