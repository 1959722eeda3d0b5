//=========================================================================
// Timer Formatting
//=========================================================================

/// Formats elapsed seconds with two decimal places, e.g. `2.00`.
pub fn format_elapsed(seconds: f64) -> String {
    format!("{:.2}", seconds)
}
