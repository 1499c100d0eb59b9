// Display-side score handling. The scoring itself happens in the remote service.

pub mod format;

pub use format::{bar_width_percent, color_for, grade_for, humanize_key, ColorTier, Grade};
