//! Countdown state machine for the timer widget.
//!
//! The model owns a user-configured duration and the seconds remaining, and
//! moves through [`Phase::Idle`] → [`Phase::Ready`] → [`Phase::Running`] →
//! [`Phase::Paused`]/[`Phase::Finished`] under four user-facing operations
//! plus a once-per-interval [`TickMsg`]. The embedding model forwards
//! messages to [`Model::update`] and reads the clock with [`Model::view`].
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown;
//!
//! let mut clock = countdown::new();
//! clock.set_duration(90);
//! assert_eq!(clock.view(), "01 : 30");
//!
//! let tick_cmd = clock.start(); // schedule the first tick
//! assert!(tick_cmd.is_some());
//! ```
//!
//! # Tick discipline
//!
//! There is at most one live tick generation at any instant. Every operation
//! that starts, stops, or reconfigures the countdown bumps an internal tag,
//! and a `TickMsg` carrying a stale tag (or another instance's id) is
//! rejected on arrival. This is the message-driven equivalent of clearing an
//! interval handle before installing a new one.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management, so several countdowns can coexist in one program.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Formats a second count as a zero-padded `MM : SS` clock string.
///
/// ```rust
/// use bubbletea_countdown::countdown::format_clock;
///
/// assert_eq!(format_clock(65), "01 : 05");
/// assert_eq!(format_clock(0), "00 : 00");
/// ```
pub fn format_clock(secs: u32) -> String {
    format!("{:02} : {:02}", secs / 60, secs % 60)
}

/// Message delivered once per interval while the countdown is running.
///
/// Ticks are filtered by instance id and by generation tag; a tick scheduled
/// before a pause, reset, or re-set of the duration no longer matches and is
/// dropped without touching state.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown instance this tick belongs to.
    pub id: i64,
    tag: i64,
}

/// Message sent once when the countdown reaches zero, so the embedding model
/// can react without polling the flags.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// The countdown instance that expired.
    pub id: i64,
}

/// The lifecycle states of the countdown, derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No duration has been set yet.
    Idle,
    /// A duration is set and the countdown has not started.
    Ready,
    /// The countdown is ticking.
    Running,
    /// The countdown was stopped with time remaining.
    Paused,
    /// The countdown reached zero.
    Finished,
}

/// The countdown model.
///
/// State changes only through [`set_duration`](Model::set_duration),
/// [`start`](Model::start), [`pause`](Model::pause), [`reset`](Model::reset)
/// and the tick handling in [`update`](Model::update). Invalid requests
/// (zero duration, starting an empty clock, pausing while stopped) are
/// silent no-ops.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between ticks. Defaults to one second.
    pub interval: Duration,

    duration: Option<u32>,
    time_left: u32,
    active: bool,
    paused: bool,
    finished: bool,

    id: i64,
    tag: i64,
}

/// Creates a countdown with no duration set and the default 1 s interval.
pub fn new() -> Model {
    new_with_interval(Duration::from_secs(1))
}

/// Creates a countdown with a custom tick interval.
pub fn new_with_interval(interval: Duration) -> Model {
    Model {
        interval,
        duration: None,
        time_left: 0,
        active: false,
        paused: false,
        finished: false,
        id: next_id(),
        tag: 0,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Returns the unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configured total, `None` until a duration has been set.
    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    /// Seconds remaining in the current run.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Reports whether the countdown is ticking.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Reports whether the countdown was explicitly paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reports whether the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The current lifecycle state.
    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.active {
            Phase::Running
        } else if self.paused {
            Phase::Paused
        } else if self.duration.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Fraction of the run remaining, in `0.0..=1.0`. `None` while no
    /// duration is set, so callers never divide by zero.
    pub fn ratio(&self) -> Option<f64> {
        self.duration
            .filter(|&d| d > 0)
            .map(|d| f64::from(self.time_left) / f64::from(d))
    }

    /// Configures a new total duration in seconds.
    ///
    /// Zero is rejected and leaves the state untouched. On success any
    /// scheduled tick is cancelled, `time_left` is reloaded, and all flags
    /// clear: the countdown is Ready regardless of what it was doing.
    pub fn set_duration(&mut self, secs: u32) {
        if secs == 0 {
            return;
        }
        self.cancel();
        self.duration = Some(secs);
        self.time_left = secs;
        self.active = false;
        self.paused = false;
        self.finished = false;
    }

    /// Starts or resumes the countdown, returning the first tick command.
    ///
    /// A no-op returning `None` when nothing remains to count down.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.time_left == 0 {
            return None;
        }
        self.active = true;
        self.paused = false;
        self.finished = false;
        self.cancel();
        Some(self.tick())
    }

    /// Pauses a running countdown, cancelling the scheduled tick.
    /// A no-op unless the countdown is active.
    pub fn pause(&mut self) {
        if !self.active {
            return;
        }
        self.paused = true;
        self.active = false;
        self.cancel();
    }

    /// Reloads `time_left` from the configured duration and stops ticking.
    ///
    /// Always applies, from any state. The countdown lands in the paused
    /// state, so the start control reads "resume" after a reset.
    pub fn reset(&mut self) {
        self.active = false;
        self.paused = true;
        self.finished = false;
        self.time_left = self.duration.unwrap_or(0);
        self.cancel();
    }

    /// Handles tick messages, decrementing the clock and rescheduling.
    ///
    /// Ticks from other instances, stale generations, or a non-running
    /// countdown are ignored. The tick that reaches zero sets `finished`,
    /// clears `active`, and returns a command that emits [`FinishedMsg`]
    /// instead of another tick.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id || tick_msg.tag != self.tag || !self.active {
                return None;
            }

            if self.time_left <= 1 {
                self.time_left = 0;
                self.finished = true;
                self.active = false;
                self.cancel();
                return Some(self.finished_cmd());
            }

            self.time_left -= 1;
            return Some(self.tick());
        }

        None
    }

    /// Renders the remaining time as a `MM : SS` clock string.
    pub fn view(&self) -> String {
        format_clock(self.time_left)
    }

    // Invalidates any scheduled tick. The next scheduled tick (if any) will
    // carry the new tag.
    fn cancel(&mut self) {
        self.tag += 1;
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn finished_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Delivers one well-tagged tick, the way the runtime would.
    fn deliver_tick(clock: &mut Model) -> Option<Cmd> {
        let msg: Msg = Box::new(TickMsg {
            id: clock.id,
            tag: clock.tag,
        });
        clock.update(&msg)
    }

    #[test]
    fn test_new_is_idle() {
        let clock = new();
        assert_eq!(clock.phase(), Phase::Idle);
        assert_eq!(clock.duration(), None);
        assert_eq!(clock.time_left(), 0);
        assert_eq!(clock.interval, Duration::from_secs(1));
        assert!(clock.id() > 0);
    }

    #[test]
    fn test_unique_ids() {
        let a = new();
        let b = new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_set_duration_loads_clock() {
        let mut clock = new();
        clock.set_duration(90);
        assert_eq!(clock.phase(), Phase::Ready);
        assert_eq!(clock.duration(), Some(90));
        assert_eq!(clock.time_left(), 90);
        assert_eq!(clock.view(), format_clock(90));
    }

    #[test]
    fn test_set_duration_zero_is_noop() {
        let mut clock = new();
        clock.set_duration(30);
        clock.set_duration(0);
        assert_eq!(clock.duration(), Some(30));
        assert_eq!(clock.time_left(), 30);
        assert_eq!(clock.phase(), Phase::Ready);
    }

    #[test]
    fn test_set_duration_while_running_cancels_tick() {
        let mut clock = new();
        clock.set_duration(10);
        let _ = clock.start();
        let stale_tag = clock.tag;

        clock.set_duration(20);
        assert_eq!(clock.phase(), Phase::Ready);

        // The tick scheduled before the re-set no longer matches.
        let msg: Msg = Box::new(TickMsg {
            id: clock.id,
            tag: stale_tag,
        });
        assert!(clock.update(&msg).is_none());
        assert_eq!(clock.time_left(), 20);
    }

    #[test]
    fn test_start_with_empty_clock_is_noop() {
        let mut clock = new();
        assert!(clock.start().is_none());
        assert!(!clock.is_active());
        assert_eq!(clock.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_returns_tick_cmd() {
        let mut clock = new();
        clock.set_duration(5);
        assert!(clock.start().is_some());
        assert_eq!(clock.phase(), Phase::Running);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_countdown_runs_to_finish() {
        let mut clock = new();
        clock.set_duration(5);
        let _ = clock.start();

        for _ in 0..4 {
            assert!(deliver_tick(&mut clock).is_some());
        }
        assert_eq!(clock.time_left(), 1);
        assert!(clock.is_active());

        // Final tick drives the clock to zero and stops it.
        assert!(deliver_tick(&mut clock).is_some());
        assert_eq!(clock.time_left(), 0);
        assert!(clock.is_finished());
        assert!(!clock.is_active());
        assert_eq!(clock.phase(), Phase::Finished);
    }

    #[test]
    fn test_pause_stops_decrements() {
        let mut clock = new();
        clock.set_duration(10);
        let _ = clock.start();
        deliver_tick(&mut clock);
        deliver_tick(&mut clock);
        assert_eq!(clock.time_left(), 8);

        let running_tag = clock.tag;
        clock.pause();
        assert_eq!(clock.phase(), Phase::Paused);

        // The tick that was in flight when we paused is stale now.
        let msg: Msg = Box::new(TickMsg {
            id: clock.id,
            tag: running_tag,
        });
        assert!(clock.update(&msg).is_none());
        assert_eq!(clock.time_left(), 8);

        // Resume and count two more: total elapsed equals delivered ticks.
        let _ = clock.start();
        deliver_tick(&mut clock);
        deliver_tick(&mut clock);
        assert_eq!(clock.time_left(), 6);
    }

    #[test]
    fn test_pause_when_not_running_is_noop() {
        let mut clock = new();
        clock.set_duration(10);
        clock.pause();
        assert_eq!(clock.phase(), Phase::Ready);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_reset_restores_duration_from_any_state() {
        let mut clock = new();
        clock.set_duration(3);
        let _ = clock.start();
        deliver_tick(&mut clock);
        deliver_tick(&mut clock);
        deliver_tick(&mut clock);
        assert!(clock.is_finished());

        clock.reset();
        assert_eq!(clock.time_left(), 3);
        assert!(!clock.is_finished());
        assert!(!clock.is_active());
        // Reset lands in Paused: the start control reads "resume" afterwards.
        assert!(clock.is_paused());
        assert_eq!(clock.phase(), Phase::Paused);
    }

    #[test]
    fn test_reset_with_no_duration() {
        let mut clock = new();
        clock.reset();
        assert_eq!(clock.time_left(), 0);
        assert_eq!(clock.phase(), Phase::Paused);
        // Starting from here stays a no-op.
        assert!(clock.start().is_none());
    }

    #[test]
    fn test_stale_tick_after_cancel_mutates_nothing() {
        // The teardown analog: once the tag moved on, a pending tick from a
        // previous generation lands on deaf ears.
        let mut clock = new();
        clock.set_duration(10);
        let _ = clock.start();
        let stale_tag = clock.tag;
        clock.pause();

        let snapshot = clock.time_left();
        let msg: Msg = Box::new(TickMsg {
            id: clock.id,
            tag: stale_tag,
        });
        assert!(clock.update(&msg).is_none());
        assert_eq!(clock.time_left(), snapshot);
        assert_eq!(clock.phase(), Phase::Paused);
    }

    #[test]
    fn test_tick_for_other_instance_ignored() {
        let mut clock = new();
        clock.set_duration(10);
        let _ = clock.start();

        let msg: Msg = Box::new(TickMsg {
            id: clock.id + 999,
            tag: clock.tag,
        });
        assert!(clock.update(&msg).is_none());
        assert_eq!(clock.time_left(), 10);
    }

    #[test]
    fn test_ratio_guards_unset_duration() {
        let mut clock = new();
        assert_eq!(clock.ratio(), None);

        clock.set_duration(4);
        assert_eq!(clock.ratio(), Some(1.0));

        let _ = clock.start();
        deliver_tick(&mut clock);
        assert_eq!(clock.ratio(), Some(0.75));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(65), "01 : 05");
        assert_eq!(format_clock(0), "00 : 00");
        assert_eq!(format_clock(600), "10 : 00");
        assert_eq!(format_clock(59), "00 : 59");
        assert_eq!(format_clock(3599), "59 : 59");
    }

    #[test]
    fn test_active_and_finished_never_both_true() {
        let mut clock = new();
        clock.set_duration(1);
        let _ = clock.start();
        deliver_tick(&mut clock);
        assert!(clock.is_finished());
        assert!(!clock.is_active());

        // Restarting after a finish requires a reset (or new duration).
        assert!(clock.start().is_none());
        clock.reset();
        let _ = clock.start();
        assert!(clock.is_active());
        assert!(!clock.is_finished());
    }
}
