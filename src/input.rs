//! Numeric input field for entering the countdown duration.
//!
//! A single-line input in the textinput mold, specialized to this widget's
//! needs: it accepts ASCII digits only, every other printable character is
//! dropped without comment, and [`Model::parse`] yields the entered value as
//! a number — or `None` when the field is empty or unparseable, which the
//! widget treats as "unset".
//!
//! The cursor is a static reverse-video block rather than a blinking one,
//! so the countdown tick stays the widget's only scheduled callback.

use crate::key::{new_binding, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Key bindings for editing the duration field.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move the cursor one character right.
    pub character_forward: Binding,
    /// Move the cursor one character left.
    pub character_backward: Binding,
    /// Jump to the start of the field.
    pub line_start: Binding,
    /// Jump to the end of the field.
    pub line_end: Binding,
    /// Delete the character before the cursor.
    pub delete_character_backward: Binding,
    /// Delete the character under the cursor.
    pub delete_character_forward: Binding,
    /// Delete everything before the cursor.
    pub delete_before_cursor: Binding,
    /// Delete everything from the cursor to the end.
    pub delete_after_cursor: Binding,
}

/// The default editing bindings, the familiar readline subset.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
        line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        delete_before_cursor: new_binding(vec![with_keys_str(&["ctrl+u"])]),
        delete_after_cursor: new_binding(vec![with_keys_str(&["ctrl+k"])]),
    }
}

/// The duration input model.
pub struct Model {
    /// Prompt rendered before the field.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the entered digits.
    pub text_style: Style,
    /// Text shown while the field is empty.
    pub placeholder: String,
    /// Style for the placeholder text.
    pub placeholder_style: Style,
    /// Style for the cursor block when focused.
    pub cursor_style: Style,
    /// Minimum rendered width of the field contents, 0 for none.
    pub width: i32,
    /// Maximum number of digits accepted, 0 for no limit.
    pub char_limit: i32,
    /// The editing key bindings.
    pub key_map: KeyMap,

    value: Vec<char>,
    pos: usize,
    focus: bool,
}

/// Creates a duration input with default settings, unfocused.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        cursor_style: Style::new().reverse(true),
        width: 0,
        char_limit: 0,
        key_map: default_key_map(),
        value: Vec::new(),
        pos: 0,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Returns the current contents of the field.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the contents of the field. Non-digit characters are
    /// discarded, the same filter typing goes through.
    pub fn set_value(&mut self, s: &str) {
        self.value = s.chars().filter(|c| c.is_ascii_digit()).collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit as usize);
        }
        self.pos = self.value.len();
    }

    /// Parses the field as a duration in seconds.
    ///
    /// `None` for an empty field or a value that does not fit `u32`; the
    /// caller treats both as "unset" and changes nothing.
    pub fn parse(&self) -> Option<u32> {
        if self.value.is_empty() {
            return None;
        }
        self.value().parse().ok()
    }

    /// Moves the cursor to the given position, clamped to the contents.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Handles key messages while focused. Messages arriving while blurred
    /// are ignored entirely.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_movement_keys(key_msg);
            self.handle_deletion_keys(key_msg);
            self.handle_character_input(key_msg);
        }

        None
    }

    /// Renders the field: prompt, then digits (or placeholder) with the
    /// cursor block when focused.
    pub fn view(&self) -> String {
        let mut out = self.prompt_style.clone().inline(true).render(&self.prompt);

        if self.value.is_empty() {
            out.push_str(&self.placeholder_view());
        } else {
            out.push_str(&self.value_view());
        }

        if self.width > 0 {
            let plain_width = if self.value.is_empty() {
                UnicodeWidthStr::width(self.placeholder.as_str()).max(usize::from(self.focus))
            } else {
                // One extra cell when the cursor sits past the last digit.
                self.value.len() + usize::from(self.focus && self.pos == self.value.len())
            };
            let want = self.width as usize;
            if plain_width < want {
                out.push_str(&" ".repeat(want - plain_width));
            }
        }

        out
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) {
        let keys = &self.key_map;
        if keys.character_backward.matches(key_msg) {
            if self.pos > 0 {
                self.pos -= 1;
            }
        } else if keys.character_forward.matches(key_msg) {
            if self.pos < self.value.len() {
                self.pos += 1;
            }
        } else if keys.line_start.matches(key_msg) {
            self.pos = 0;
        } else if keys.line_end.matches(key_msg) {
            self.pos = self.value.len();
        }
    }

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) {
        let keys = &self.key_map;
        if keys.delete_character_backward.matches(key_msg) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if keys.delete_character_forward.matches(key_msg) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if keys.delete_before_cursor.matches(key_msg) {
            self.value.drain(..self.pos);
            self.pos = 0;
        } else if keys.delete_after_cursor.matches(key_msg) {
            self.value.truncate(self.pos);
        }
    }

    // Digits only. Anything else fails to produce an effect, which is the
    // whole of this field's input validation.
    fn handle_character_input(&mut self, key_msg: &KeyMsg) {
        if let KeyCode::Char(ch) = key_msg.key {
            if ch.is_ascii_digit()
                && !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                && !key_msg.modifiers.contains(KeyModifiers::ALT)
            {
                if self.char_limit > 0 && self.value.len() >= self.char_limit as usize {
                    return;
                }
                self.value.insert(self.pos, ch);
                self.pos += 1;
            }
        }
    }

    fn placeholder_view(&self) -> String {
        if self.placeholder.is_empty() {
            if self.focus {
                return self.cursor_style.clone().inline(true).render(" ");
            }
            return String::new();
        }

        if !self.focus {
            return self
                .placeholder_style
                .clone()
                .inline(true)
                .render(&self.placeholder);
        }

        // Cursor rests on the first placeholder character.
        let mut chars = self.placeholder.chars();
        let head = chars.next().map(String::from).unwrap_or_default();
        let tail: String = chars.collect();
        format!(
            "{}{}",
            self.cursor_style.clone().inline(true).render(&head),
            self.placeholder_style.clone().inline(true).render(&tail),
        )
    }

    fn value_view(&self) -> String {
        let text_style = self.text_style.clone().inline(true);

        if !self.focus {
            return text_style.render(&self.value());
        }

        let before: String = self.value[..self.pos].iter().collect();
        let mut out = text_style.clone().render(&before);

        if self.pos < self.value.len() {
            let under = self.value[self.pos].to_string();
            out.push_str(&self.cursor_style.clone().inline(true).render(&under));
            let after: String = self.value[self.pos + 1..].iter().collect();
            out.push_str(&text_style.render(&after));
        } else {
            out.push_str(&self.cursor_style.clone().inline(true).render(" "));
        }

        out
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss::strip_ansi;

    fn press(input: &mut Model, code: KeyCode) {
        press_with(input, code, KeyModifiers::NONE);
    }

    fn press_with(input: &mut Model, code: KeyCode, mods: KeyModifiers) {
        let msg: Msg = Box::new(KeyMsg {
            key: code,
            modifiers: mods,
        });
        input.update(&msg);
    }

    fn type_str(input: &mut Model, s: &str) {
        for ch in s.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_typing_digits() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "90");
        assert_eq!(input.value(), "90");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_non_digits_are_dropped() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "1a2b!3 ");
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_ignored_when_blurred() {
        let mut input = new();
        type_str(&mut input, "42");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_control_chords_do_not_insert() {
        let mut input = new();
        input.focus();
        press_with(&mut input, KeyCode::Char('5'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "123");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "12");

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "2");
    }

    #[test]
    fn test_cursor_movement_and_mid_insert() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "13");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Char('2'));
        assert_eq!(input.value(), "123");
        assert_eq!(input.cursor(), 2);

        press(&mut input, KeyCode::End);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_clear_to_start_and_end() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "12345");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Left);
        press_with(&mut input, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "45");
        assert_eq!(input.cursor(), 0);

        type_str(&mut input, "9");
        press_with(&mut input, KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "9");
    }

    #[test]
    fn test_char_limit() {
        let mut input = new();
        input.char_limit = 3;
        input.focus();
        type_str(&mut input, "12345");
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_parse() {
        let mut input = new();
        input.focus();
        assert_eq!(input.parse(), None);

        type_str(&mut input, "0");
        assert_eq!(input.parse(), Some(0));

        input.set_value("90");
        assert_eq!(input.parse(), Some(90));

        // Too large for u32: treated as unset rather than clamped.
        input.set_value("99999999999");
        assert_eq!(input.parse(), None);
    }

    #[test]
    fn test_set_value_filters() {
        let mut input = new();
        input.set_value("1x2");
        assert_eq!(input.value(), "12");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_view_shows_placeholder_when_empty() {
        let mut input = new();
        input.placeholder = "duration in seconds".to_string();
        let plain = strip_ansi(&input.view());
        assert!(plain.contains("duration in seconds"));

        input.focus();
        let plain = strip_ansi(&input.view());
        assert!(plain.contains("duration in seconds"));
    }

    #[test]
    fn test_view_shows_value() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "75");
        let plain = strip_ansi(&input.view());
        assert!(plain.contains("75"));
        assert!(plain.starts_with("> "));
    }

    #[test]
    fn test_focus_roundtrip() {
        let mut input = new();
        assert!(!input.focused());
        input.focus();
        assert!(input.focused());
        input.blur();
        assert!(!input.focused());
    }
}
