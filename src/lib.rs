#![warn(missing_docs)]

//! # bubbletea-countdown
//!
//! A countdown timer widget for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! The user types a duration in seconds, starts, pauses, resumes, and resets
//! the countdown with key bindings, and watches a zero-padded `MM : SS`
//! clock, a proportional progress bar, and a "Time's Up!" banner when the
//! countdown completes. Everything follows the Elm Architecture pattern:
//! each piece is a model with `update()` and `view()` methods, driven by
//! messages from the bubbletea-rs runtime.
//!
//! ## Running the widget
//!
//! The top-level [`widget::Model`] implements `bubbletea_rs::Model` and runs
//! as a program of its own:
//!
//! ```rust,no_run
//! use bubbletea_countdown::widget::Model as CountdownTimer;
//! use bubbletea_rs::Program;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let program = Program::<CountdownTimer>::builder().build()?;
//!     program.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the pieces
//!
//! The sub-components compose into larger models the same way every
//! bubbletea widget does — forward messages, render views:
//!
//! ```rust
//! use bubbletea_countdown::countdown;
//! use bubbletea_rs::{Cmd, Msg};
//!
//! struct App {
//!     clock: countdown::Model,
//! }
//!
//! impl App {
//!     fn update(&mut self, msg: &Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<countdown::FinishedMsg>() {
//!             if done.id == self.clock.id() {
//!                 // countdown expired
//!             }
//!         }
//!         self.clock.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Remaining: {}", self.clock.view())
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `countdown` | The countdown state machine and tick plumbing |
//! | `input` | Numeric entry field for the duration |
//! | `progress` | Proportional progress bar |
//! | `key` | Type-safe key bindings |
//! | `help` | Key-binding footer |
//! | `widget` | The assembled timer, ready to run |
//!
//! ## Resource discipline
//!
//! The countdown schedules at most one tick at a time, and every state
//! change that stops or restarts it invalidates whatever was scheduled
//! before. Nothing else in the crate owns a scheduled callback — the
//! progress bar renders statically and the input cursor does not blink — so
//! a running program has exactly one timer in flight, or none.

pub mod countdown;
pub mod help;
pub mod input;
pub mod key;
pub mod progress;
pub mod widget;

use bubbletea_rs::Cmd;

/// Focus management for components that accept keyboard input.
///
/// The duration field implements this; an embedding model moves focus
/// between its inputs through these methods without caring which component
/// type it holds.
pub trait Component {
    /// Puts the component in focused state. May return a command for
    /// focus-related side effects.
    fn focus(&mut self) -> Option<Cmd>;

    /// Puts the component in blurred state.
    fn blur(&mut self);

    /// Reports whether the component is focused.
    fn focused(&self) -> bool;
}

pub use countdown::{
    format_clock, new as countdown_new, FinishedMsg as CountdownFinishedMsg,
    Model as Countdown, Phase, TickMsg as CountdownTickMsg,
};
pub use help::Model as HelpModel;
pub use input::{
    default_key_map as input_default_key_map, new as input_new, KeyMap as DurationInputKeyMap,
    Model as DurationInput,
};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str,
    Binding, Help as KeyHelp, KeyMap, KeyPress,
};
pub use progress::{new as progress_new, Model as Progress};
pub use widget::{
    default_key_map as widget_default_key_map, new as widget_new, ControlKeyMap,
    Model as CountdownTimer,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let timer = widget_new();
/// assert!(timer.view().contains("00 : 00"));
/// ```
pub mod prelude {
    pub use crate::countdown::{
        format_clock, new as countdown_new, FinishedMsg as CountdownFinishedMsg,
        Model as Countdown, Phase, TickMsg as CountdownTickMsg,
    };
    pub use crate::help::Model as HelpModel;
    pub use crate::input::{
        default_key_map as input_default_key_map, new as input_new,
        KeyMap as DurationInputKeyMap, Model as DurationInput,
    };
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys,
        with_keys_str, Binding, Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::progress::{new as progress_new, Model as Progress};
    pub use crate::widget::{
        default_key_map as widget_default_key_map, new as widget_new, ControlKeyMap,
        Model as CountdownTimer,
    };
    pub use crate::Component;
}
