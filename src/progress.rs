//! Proportional progress bar for the countdown widget.
//!
//! The bar renders a fraction in `0.0..=1.0` as filled and empty character
//! runs, with an optional trailing percentage label. Rendering is a pure
//! function of the given fraction — there is no animation and no message
//! handling, so the bar never owns a scheduled callback.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::progress::{new, with_solid_fill, with_width};
//!
//! let bar = new(&[
//!     with_width(30),
//!     with_solid_fill("#2ED573".to_string()),
//! ]);
//! let half = bar.view_as(0.5);
//! ```

use lipgloss_extras::lipgloss::{self, blending::blend_1d};
use lipgloss_extras::prelude::*;

const DEFAULT_WIDTH: i32 = 40;

/// Configuration options for [`new`].
pub enum ProgressOption {
    /// Uses the stock purple-to-pink gradient fill.
    WithDefaultGradient,
    /// Blends the filled portion between two colors, start to end.
    WithGradient(String, String),
    /// Fills with a single solid color.
    WithSolidFill(String),
    /// Overrides the characters for filled and empty cells.
    WithFillCharacters(char, char),
    /// Hides the numeric percentage label.
    WithoutPercentage,
    /// Sets the total width in cells, label included.
    WithWidth(i32),
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithDefaultGradient => {
                m.set_ramp("#5A56E0".to_string(), "#EE6FF8".to_string());
            }
            ProgressOption::WithGradient(color_a, color_b) => {
                m.set_ramp(color_a.clone(), color_b.clone());
            }
            ProgressOption::WithSolidFill(color) => {
                m.full_color = color.clone();
                m.use_ramp = false;
            }
            ProgressOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            ProgressOption::WithoutPercentage => {
                m.show_percentage = false;
            }
            ProgressOption::WithWidth(width) => {
                m.width = *width;
            }
        }
    }
}

/// Uses the stock gradient colors.
pub fn with_default_gradient() -> ProgressOption {
    ProgressOption::WithDefaultGradient
}

/// Blends the filled portion from `color_a` to `color_b`.
pub fn with_gradient(color_a: String, color_b: String) -> ProgressOption {
    ProgressOption::WithGradient(color_a, color_b)
}

/// Fills the bar with a single color.
pub fn with_solid_fill(color: String) -> ProgressOption {
    ProgressOption::WithSolidFill(color)
}

/// Overrides the fill characters, filled then empty.
pub fn with_fill_characters(full: char, empty: char) -> ProgressOption {
    ProgressOption::WithFillCharacters(full, empty)
}

/// Hides the percentage label.
pub fn without_percentage() -> ProgressOption {
    ProgressOption::WithoutPercentage
}

/// Sets the total width in cells.
pub fn with_width(w: i32) -> ProgressOption {
    ProgressOption::WithWidth(w)
}

/// The progress bar model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Total width of the bar, including the percentage label if shown.
    pub width: i32,
    /// Character for filled cells.
    pub full: char,
    /// Color for filled cells.
    pub full_color: String,
    /// Character for empty cells.
    pub empty: char,
    /// Color for empty cells.
    pub empty_color: String,
    /// Whether the numeric percentage label is rendered.
    pub show_percentage: bool,
    /// Style applied to the percentage label.
    pub percentage_style: Style,

    percent: f64,
    use_ramp: bool,
    ramp_color_a: String,
    ramp_color_b: String,
}

/// Creates a progress bar, applying the given options over the defaults.
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model {
        width: DEFAULT_WIDTH,
        full: '█',
        full_color: "#7571F9".to_string(),
        empty: '░',
        empty_color: "#606060".to_string(),
        show_percentage: true,
        percentage_style: Style::new(),
        percent: 0.0,
        use_ramp: false,
        ramp_color_a: String::new(),
        ramp_color_b: String::new(),
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl Model {
    /// Stores a fraction for [`view`](Model::view), clamped to `0.0..=1.0`.
    pub fn set_percent(&mut self, p: f64) {
        self.percent = p.clamp(0.0, 1.0);
    }

    /// Returns the stored fraction.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Renders the bar at the stored fraction.
    pub fn view(&self) -> String {
        self.view_as(self.percent)
    }

    /// Renders the bar at an arbitrary fraction, ignoring the stored one.
    pub fn view_as(&self, percent: f64) -> String {
        let percent_view = self.percentage_view(percent);
        let percent_width = lipgloss::width_visible(&percent_view) as i32;
        let bar_view = self.bar_view(percent, percent_width);

        format!("{}{}", bar_view, percent_view)
    }

    fn bar_view(&self, percent: f64, text_width: i32) -> String {
        let percent = percent.clamp(0.0, 1.0);
        let tw = std::cmp::max(0, self.width - text_width);
        let fw = std::cmp::max(
            0,
            std::cmp::min(tw, ((tw as f64) * percent).round() as i32),
        );

        let mut result = String::new();

        if self.use_ramp {
            let grad_len = std::cmp::max(2, tw) as usize;
            let start = Color::from(self.ramp_color_a.as_str());
            let end = Color::from(self.ramp_color_b.as_str());
            let gradient = blend_1d(grad_len, vec![start, end]);

            for i in 0..fw as usize {
                let color_idx = std::cmp::min(i, grad_len - 1);
                let styled = Style::new()
                    .foreground(gradient[color_idx].clone())
                    .render(&self.full.to_string());
                result.push_str(&styled);
            }
        } else {
            let styled = Style::new()
                .foreground(Color::from(self.full_color.as_str()))
                .render(&self.full.to_string());
            result.push_str(&styled.repeat(fw as usize));
        }

        let empty_styled = Style::new()
            .foreground(Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());
        let n = std::cmp::max(0, tw - fw);
        result.push_str(&empty_styled.repeat(n as usize));

        result
    }

    fn percentage_view(&self, percent: f64) -> String {
        if !self.show_percentage {
            return String::new();
        }

        let percent = percent.clamp(0.0, 1.0);
        let percentage = format!(" {:3.0}%", percent * 100.0);
        self.percentage_style.render(&percentage)
    }

    fn set_ramp(&mut self, color_a: String, color_b: String) {
        self.use_ramp = true;
        self.ramp_color_a = color_a;
        self.ramp_color_b = color_b;
    }
}
