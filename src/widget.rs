//! The assembled countdown timer widget.
//!
//! This module wires the duration [`input`](crate::input), the
//! [`countdown`](crate::countdown) state machine, the
//! [`progress`](crate::progress) bar, and the [`help`](crate::help) footer
//! into a single `bubbletea_rs::Model` ready to run or to embed.
//!
//! Controls: type a number of seconds and press `enter` to set it, `s` (or
//! `space`) to start or resume, `p` to pause, `r` to reset, `?` for the
//! expanded help, `q` to quit. Invalid input — an empty field, zero, digits
//! that overflow — simply does nothing; there is no error display.
//!
//! ```rust
//! use bubbletea_countdown::widget;
//!
//! let timer = widget::new();
//! let frame = timer.view();
//! assert!(frame.contains("00 : 00"));
//! ```

use crate::countdown;
use crate::help;
use crate::input;
use crate::key::{new_binding, with_help, with_keys_str, Binding, KeyMap};
use crate::progress;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::lipgloss::AdaptiveColor;
use lipgloss_extras::prelude::*;

/// Key bindings for the widget's controls.
#[derive(Debug, Clone)]
pub struct ControlKeyMap {
    /// Apply the typed duration.
    pub set: Binding,
    /// Start or resume the countdown.
    pub start: Binding,
    /// Pause the countdown.
    pub pause: Binding,
    /// Reload the countdown from the configured duration.
    pub reset: Binding,
    /// Toggle the expanded help footer.
    pub toggle_help: Binding,
    /// Quit the program.
    pub quit: Binding,
}

/// The default control bindings.
pub fn default_key_map() -> ControlKeyMap {
    ControlKeyMap {
        set: new_binding(vec![
            with_keys_str(&["enter"]),
            with_help("enter", "set duration"),
        ]),
        start: new_binding(vec![with_keys_str(&["s", "space"]), with_help("s", "start")]),
        pause: new_binding(vec![with_keys_str(&["p"]), with_help("p", "pause")]),
        reset: new_binding(vec![with_keys_str(&["r"]), with_help("r", "reset")]),
        toggle_help: new_binding(vec![with_keys_str(&["?"]), with_help("?", "more")]),
        quit: new_binding(vec![with_keys_str(&["q", "ctrl+c"]), with_help("q", "quit")]),
    }
}

// The start control's label is a function of the paused flag, not stored
// state: a paused (or freshly reset) countdown resumes.
fn start_label(paused: bool) -> &'static str {
    if paused {
        "resume"
    } else {
        "start"
    }
}

/// The countdown timer widget model.
pub struct Model {
    /// Style for the title line.
    pub title_style: Style,
    /// Style for the `MM : SS` clock.
    pub clock_style: Style,
    /// Style for the banner shown when the countdown completes.
    pub finished_style: Style,

    input: input::Model,
    clock: countdown::Model,
    bar: progress::Model,
    help: help::Model,
    keys: ControlKeyMap,
}

/// Creates the widget with a focused input field and an unset countdown.
pub fn new() -> Model {
    let mut field = input::new();
    field.placeholder = "duration in seconds".to_string();
    field.char_limit = 6;
    field.focus();

    let bar = progress::new(&[
        progress::with_width(28),
        progress::with_solid_fill("#2ED573".to_string()),
        progress::without_percentage(),
    ]);

    let mut model = Model {
        title_style: Style::new().bold(true),
        clock_style: Style::new().bold(true).foreground(AdaptiveColor {
            Light: "#1A1A1A",
            Dark: "#E2E2E2",
        }),
        finished_style: Style::new().bold(true).foreground(Color::from("#FF3838")),
        input: field,
        clock: countdown::new(),
        bar,
        help: help::Model::new(),
        keys: default_key_map(),
    };
    model.sync_bindings();
    model
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Read access to the countdown state, for embedding models.
    pub fn clock(&self) -> &countdown::Model {
        &self.clock
    }

    /// Read access to the duration field, for embedding models.
    pub fn input(&self) -> &input::Model {
        &self.input
    }

    /// Handles one message. Key messages route to the controls first; keys
    /// no control claims fall through to the input field.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg, msg);
        }

        if let Some(done) = msg.downcast_ref::<countdown::FinishedMsg>() {
            if done.id == self.clock.id() {
                let _ = self.input.focus();
                self.sync_bindings();
            }
            return None;
        }

        let cmd = self.clock.update(msg);
        if cmd.is_some() {
            self.sync_bindings();
        }
        cmd
    }

    /// Renders the widget: title, input, clock, bar, completion banner,
    /// help footer.
    pub fn view(&self) -> String {
        let mut sections = vec![
            self.title_style.clone().render("Countdown Timer"),
            self.input.view(),
            self.clock_style.clone().render(&self.clock.view()),
        ];

        // The bar is meaningless until a duration exists; ratio() is None
        // then, which also keeps the math away from a zero duration.
        if let Some(ratio) = self.clock.ratio() {
            sections.push(self.bar.view_as(ratio));
        }

        if self.clock.is_finished() {
            sections.push(self.finished_style.clone().render("Time's Up!"));
        }

        sections.push(self.help.view(self));
        sections.join("\n\n")
    }

    fn handle_key(&mut self, key_msg: &KeyMsg, msg: &Msg) -> Option<Cmd> {
        if self.keys.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }

        if self.keys.toggle_help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
            return None;
        }

        if self.keys.set.matches(key_msg) {
            // Zero and unparseable input change nothing, silently.
            if let Some(secs) = self.input.parse().filter(|&secs| secs > 0) {
                self.clock.set_duration(secs);
                let _ = self.input.focus();
            }
            self.sync_bindings();
            return None;
        }

        if self.keys.start.matches(key_msg) {
            let cmd = self.clock.start();
            if cmd.is_some() {
                self.input.blur();
            }
            self.sync_bindings();
            return cmd;
        }

        if self.keys.pause.matches(key_msg) {
            self.clock.pause();
            let _ = self.input.focus();
            self.sync_bindings();
            return None;
        }

        if self.keys.reset.matches(key_msg) {
            self.clock.reset();
            let _ = self.input.focus();
            self.sync_bindings();
            return None;
        }

        self.input.update(msg)
    }

    // Presentation state derived from the countdown: the start label and
    // which controls are live right now.
    fn sync_bindings(&mut self) {
        self.keys
            .start
            .set_help("s", start_label(self.clock.is_paused()));
        self.keys
            .start
            .set_enabled(self.clock.time_left() > 0 && !self.clock.is_active());
        self.keys.pause.set_enabled(self.clock.is_active());
    }
}

impl KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.keys.set,
            &self.keys.start,
            &self.keys.pause,
            &self.keys.reset,
            &self.keys.toggle_help,
            &self.keys.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.keys.set, &self.keys.start],
            vec![&self.keys.pause, &self.keys.reset],
            vec![&self.keys.toggle_help, &self.keys.quit],
        ]
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        // Nothing is scheduled until the user starts the countdown.
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(&msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
