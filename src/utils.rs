//! User-facing messages
//!
//! Every notice convcom prints outside of the menus goes through the helpers
//! in this module, so errors, warnings and confirmations share one layout:
//! an emoji-prefixed, colored title followed by the details.

use console::{Style, style};

/// # `MessageType`
/// Trait for message types.
trait MessageType {
    /// The emoji prefix for each message type (e.g., "🚨 ERROR")
    const PREFIX: &'static str;

    /// Whether to output to stderr (true) or stdout (false)
    const TO_STDERR: bool = false;

    /// Style applied to the prefix and title.
    fn style() -> Style;
}

struct Error;
struct Warning;
struct Success;
struct Info;

impl MessageType for Error {
    const PREFIX: &'static str = "🚨 ERROR";
    const TO_STDERR: bool = true;

    fn style() -> Style {
        Style::new().red().bold()
    }
}

impl MessageType for Warning {
    const PREFIX: &'static str = "⚠️ WARNING";

    fn style() -> Style {
        Style::new().yellow().bold()
    }
}

impl MessageType for Success {
    const PREFIX: &'static str = "✅ SUCCESS";

    fn style() -> Style {
        Style::new().green().bold()
    }
}

impl MessageType for Info {
    const PREFIX: &'static str = "ℹ️ INFO";

    fn style() -> Style {
        Style::new().cyan()
    }
}

/// # `format_message`
/// Formats a message, appending the suggestion when there is one.
///
/// ## Arguments
/// * `title` - The title of the message.
/// * `details` - The details of the message.
/// * `suggestion` - An optional hint on how to resolve the situation.
///
/// ## Returns
/// * String - The formatted message.
fn format_message<T: MessageType>(title: &str, details: &str, suggestion: Option<&str>) -> String {
    let header = T::style().apply_to(format!("{}: {title}", T::PREFIX));

    match suggestion {
        Some(suggestion) => format!("{header}\n\n{details}\n\n{}", style(suggestion).dim()),
        None => format!("{header}\n\n{details}"),
    }
}

fn print_message<T: MessageType>(title: &str, details: &str, suggestion: Option<&str>) {
    let message = format_message::<T>(title, details, suggestion);

    if T::TO_STDERR {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

/// # `print_error`
/// Prints an error message with a consistent format for user-friendly display.
///
/// ## Arguments
/// - `title`: The title of the error message.
/// - `details`: The details of the error message.
/// - `suggestion`: The suggestion for resolving the error.
pub fn print_error(title: &str, details: &str, suggestion: &str) {
    print_message::<Error>(title, details, Some(suggestion));
}

/// # `print_warning`
/// Prints a warning message with a consistent format for user-friendly display.
pub fn print_warning(title: &str, details: &str) {
    print_message::<Warning>(title, details, None);
}

/// # `print_success`
/// Prints a success message with a consistent format for user-friendly display.
pub fn print_success(title: &str, details: &str) {
    print_message::<Success>(title, details, None);
}

/// # `print_info`
/// Prints an informational message with a consistent format for user-friendly display.
pub fn print_info(title: &str, details: &str) {
    print_message::<Info>(title, details, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_without_suggestion() {
        console::set_colors_enabled(false);

        let message = format_message::<Success>("Config created", "convcom.json", None);
        assert_eq!(message, "✅ SUCCESS: Config created\n\nconvcom.json");
    }

    #[test]
    fn test_format_message_with_suggestion() {
        console::set_colors_enabled(false);

        let message = format_message::<Error>(
            "Configuration file not found",
            "convcom.json is missing",
            Some("Run `convcom -init` first"),
        );
        assert_eq!(
            message,
            "🚨 ERROR: Configuration file not found\n\nconvcom.json is missing\n\nRun `convcom -init` first"
        );
    }
}
