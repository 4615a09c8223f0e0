use colored::*;
use tracing::info;

pub const TOTAL_WIDTH: usize = 64;

/// Events under this target bypass the symbol formatter and reach the
/// terminal verbatim.
pub const RAW_TARGET: &str = "mrcli::print";

/// Emits terminal output through the tracing pipeline so it interleaves
/// cleanly with log lines.
pub fn print(msg: &str) {
    info!(target: "mrcli::print", raw_msg = msg);
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".bright_black();
    print(&format!("{} {}", prefix, msg.as_ref()));
}

/// Prints a rendered result body verbatim, line by line.
pub fn body(text: &str) {
    for line in text.lines() {
        print(line);
    }
}
