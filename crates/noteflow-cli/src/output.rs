//! Console output helpers for CLI commands.

use serde::Serialize;

use noteflow_entity::export::ExportJobView;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{}", json);
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

/// Print one progress line for an export job
pub fn print_progress(job: &ExportJobView) {
    let filled = usize::from(job.progress / 5);
    println!(
        "  [{:<20}] {:>3}% {}",
        "#".repeat(filled),
        job.progress,
        job.status
    );
}
