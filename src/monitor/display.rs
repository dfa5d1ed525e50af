//! Countdown urgency categories and the console display that applies them.

use colored::{Color, ColoredString, Colorize};

/// Urgency bucket for a countdown value, from calm (`Six`) to urgent (`One`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Six,
    Five,
    Four,
    Three,
    Two,
    One,
}

/// Lower bounds (exclusive) in descending order; first match wins.
const THRESHOLDS: [(u32, Category); 6] = [
    (51, Category::Six),
    (41, Category::Five),
    (31, Category::Four),
    (21, Category::Three),
    (11, Category::Two),
    (1, Category::One),
];

/// Map seconds remaining to a category.
///
/// Values of 1 and below have no category: the display keeps whatever was
/// last shown.
pub fn category_of(seconds: u32) -> Option<Category> {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| seconds > *bound)
        .map(|(_, category)| *category)
}

impl Category {
    /// Foreground color. Basic ANSI colors only: TrueColor shades are folded
    /// onto this palette when the terminal lacks truecolor support, and
    /// neighbouring shades would then collide.
    pub fn color(self) -> Color {
        match self {
            Category::Six => Color::Magenta,
            Category::Five => Color::Blue,
            Category::Four => Color::Green,
            Category::Three => Color::BrightYellow,
            Category::Two => Color::Yellow,
            Category::One => Color::Red,
        }
    }
}

/// Console display state.
///
/// Holds the category currently in effect. It starts out unset, meaning
/// output uses the terminal's default foreground.
#[derive(Debug, Default)]
pub struct Display {
    current: Option<Category>,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Category> {
        self.current
    }

    /// Apply the category for `seconds`; values without one leave the
    /// current category untouched.
    pub fn update(&mut self, seconds: u32) -> Option<Category> {
        if let Some(category) = category_of(seconds) {
            self.current = Some(category);
        }
        self.current
    }

    /// Format the countdown line in the current category's color.
    pub fn render(&self, seconds: u32) -> ColoredString {
        let line = format!("{seconds} seconds remaining.");
        match self.current {
            Some(category) => line.color(category.color()),
            None => line.normal(),
        }
    }
}
