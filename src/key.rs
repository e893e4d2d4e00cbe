//! Type-safe key bindings for the countdown widget.
//!
//! A [`Binding`] couples the physical keys that trigger an action with the
//! help text advertised for it. Components keep their bindings in a keymap
//! struct and test incoming [`KeyMsg`]s with [`Binding::matches`] or the
//! free functions [`matches`] and [`matches_binding`].
//!
//! Bindings are built either directly:
//!
//! ```rust
//! use bubbletea_countdown::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let pause = Binding::new(vec![KeyCode::Char('p')]).with_help("p", "pause");
//! ```
//!
//! or with the functional options used throughout this crate's keymaps:
//!
//! ```rust
//! use bubbletea_countdown::key::{new_binding, with_help, with_keys_str};
//!
//! let quit = new_binding(vec![
//!     with_keys_str(&["q", "ctrl+c"]),
//!     with_help("q", "quit"),
//! ]);
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key chord: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifiers required for the chord, `NONE` for a bare key.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help text for a binding: the key label and a short description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display label for the key, e.g. `"ctrl+c"` or `"enter"`.
    pub key: String,
    /// What the key does, e.g. `"quit"`.
    pub desc: String,
}

/// A key binding: the keys that trigger it, its help text, and whether it is
/// currently enabled. Disabled bindings never match and are skipped by the
/// help component.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given keys with empty help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Marks the binding disabled.
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Replaces the help text in place. Used for labels that derive from
    /// model state, like start/resume.
    pub fn set_help(&mut self, key: impl Into<String>, desc: impl Into<String>) {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether the binding is enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    /// Returns the binding's help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns the keys this binding listens for.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Reports whether a key message triggers this binding.
    ///
    /// Shift is ignored when matching plain character keys: terminals
    /// disagree on whether `?` arrives with the SHIFT modifier set.
    pub fn matches(&self, key: &KeyMsg) -> bool {
        if self.disabled {
            return false;
        }
        self.keys.iter().any(|kp| {
            if kp.code != key.key {
                return false;
            }
            let mut have = key.modifiers;
            let mut want = kp.mods;
            if matches!(kp.code, KeyCode::Char(_)) {
                have.remove(KeyModifiers::SHIFT);
                want.remove(KeyModifiers::SHIFT);
            }
            have == want
        })
    }
}

/// A set of key bindings exposed to the help component.
///
/// Implementors describe which bindings appear in the compact short help view
/// and how bindings are grouped into columns for the expanded full help view.
pub trait KeyMap {
    /// Bindings for the compact single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings for the expanded multi-column help view, one inner vec per
    /// column.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Reports whether the message triggers any of the given bindings.
pub fn matches(key: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(key))
}

/// Reports whether the message triggers one specific binding.
pub fn matches_binding(key: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(key)
}

/// A functional option for [`new_binding`].
pub enum BindingOpt {
    /// Adds key chords to the binding.
    Keys(Vec<KeyPress>),
    /// Sets the binding's help text.
    WithHelp(Help),
    /// Marks the binding disabled.
    Disabled,
}

/// Adds the given keys to a binding.
pub fn with_keys<K: Into<KeyPress>>(keys: Vec<K>) -> BindingOpt {
    BindingOpt::Keys(keys.into_iter().map(Into::into).collect())
}

/// Adds keys described as strings, e.g. `"left"`, `"ctrl+f"`, `"enter"`.
/// Unrecognized descriptions are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().filter_map(|s| parse_key_press(s)).collect())
}

/// Sets the help text of a binding.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    BindingOpt::WithHelp(Help {
        key: key.to_string(),
        desc: desc.to_string(),
    })
}

/// Marks the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

/// Builds a binding from functional options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::new(Vec::<KeyPress>::new());
    for opt in opts {
        match opt {
            BindingOpt::Keys(mut keys) => binding.keys.append(&mut keys),
            BindingOpt::WithHelp(help) => binding.help = help,
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Parses a key description like `"ctrl+u"` or `"backspace"` into a chord.
fn parse_key_press(s: &str) -> Option<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut code = None;

    for part in s.split('+') {
        match part {
            "ctrl" => mods |= KeyModifiers::CONTROL,
            "alt" => mods |= KeyModifiers::ALT,
            "shift" => mods |= KeyModifiers::SHIFT,
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "pgup" => code = Some(KeyCode::PageUp),
            "pgdown" => code = Some(KeyCode::PageDown),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "tab" => code = Some(KeyCode::Tab),
            "space" => code = Some(KeyCode::Char(' ')),
            "backspace" => code = Some(KeyCode::Backspace),
            "delete" => code = Some(KeyCode::Delete),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => code = Some(KeyCode::Char(c)),
                    _ => return None,
                }
            }
        }
    }

    code.map(|code| KeyPress { code, mods })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_msg(code: KeyCode, mods: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: mods,
        }
    }

    #[test]
    fn test_matches_plain_char() {
        let b = Binding::new(vec![KeyCode::Char('p')]);
        assert!(b.matches(&key_msg(KeyCode::Char('p'), KeyModifiers::NONE)));
        assert!(!b.matches(&key_msg(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_matches_requires_modifiers() {
        let b = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
        assert!(b.matches(&key_msg(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&key_msg(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_matches_ignores_shift_on_chars() {
        let b = Binding::new(vec![KeyCode::Char('?')]);
        assert!(b.matches(&key_msg(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(b.matches(&key_msg(KeyCode::Char('?'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_never_matches() {
        let b = Binding::new(vec![KeyCode::Enter]).with_disabled();
        assert!(!b.matches(&key_msg(KeyCode::Enter, KeyModifiers::NONE)));

        let mut b = b;
        b.set_enabled(true);
        assert!(b.matches(&key_msg(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_new_binding_with_options() {
        let b = new_binding(vec![
            with_keys_str(&["q", "ctrl+c"]),
            with_help("q", "quit"),
        ]);
        assert_eq!(b.help().key, "q");
        assert_eq!(b.help().desc, "quit");
        assert!(b.matches(&key_msg(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(b.matches(&key_msg(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_parse_key_press_named_keys() {
        assert_eq!(
            parse_key_press("enter"),
            Some(KeyPress::from(KeyCode::Enter))
        );
        assert_eq!(
            parse_key_press("space"),
            Some(KeyPress::from(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_press("ctrl+u"),
            Some(KeyPress::from((KeyCode::Char('u'), KeyModifiers::CONTROL)))
        );
        assert_eq!(parse_key_press("bogus"), None);
    }

    #[test]
    fn test_matches_any_of() {
        let set = Binding::new(vec![KeyCode::Enter]);
        let quit = Binding::new(vec![KeyCode::Char('q')]);
        let msg = key_msg(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches(&msg, &[&set, &quit]));
        assert!(matches_binding(&msg, &quit));
        assert!(!matches_binding(&msg, &set));
    }
}
