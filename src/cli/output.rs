use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Start a spinner on stderr. Hidden when stderr is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

/// Stop a spinner and replace it with a success line.
pub fn finish_spinner(sp: ProgressBar, msg: &str) {
    sp.finish_and_clear();
    success(msg);
}

/// Stop a spinner without printing anything; the caller reports the error.
pub fn abandon_spinner(sp: ProgressBar) {
    sp.finish_and_clear();
}

/// Horizontal bar scaled so that `peak` fills `width` cells.
/// Any non-zero value gets at least one cell.
pub fn bar(value: u64, peak: u64, width: usize) -> String {
    if value == 0 || peak == 0 {
        return String::new();
    }
    let cells = ((value as f64 / peak as f64) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

/// Share of `value` in `total` as a percentage string.
pub fn percent(value: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_peak() {
        assert_eq!(bar(10, 10, 20).chars().count(), 20);
        assert_eq!(bar(5, 10, 20).chars().count(), 10);
    }

    #[test]
    fn small_values_still_show() {
        assert_eq!(bar(1, 1000, 20), "█");
        assert_eq!(bar(0, 1000, 20), "");
    }

    #[test]
    fn percent_handles_zero_total() {
        assert_eq!(percent(3, 0), "0.0%");
        assert_eq!(percent(1, 4), "25.0%");
    }
}
