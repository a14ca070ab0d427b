use owo_colors::OwoColorize;
use summarist_core::Delivery;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Summarist".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Hand a CMS article to an AI chat for summarizing\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Print what the action delivered
pub fn print_delivery_details(delivery: &Delivery) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Delivery Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Source:".dimmed(), delivery.source.as_str().bright_white());
    eprintln!(
        "  {} {}",
        "Chat URL length:".dimmed(),
        delivery.chat_url.as_str().len().to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "URL text truncated:".dimmed(),
        yes_no(delivery.url_truncated).bright_white()
    );
    eprintln!(
        "  {} {}",
        "Clipboard text truncated:".dimmed(),
        yes_no(delivery.clipboard_truncated).bright_white()
    );
    eprintln!(
        "  {} {}\n",
        "Clipboard:".dimmed(),
        delivery.clipboard.as_str().bright_white()
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
