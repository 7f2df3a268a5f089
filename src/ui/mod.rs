//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_banner, display_cleanup_warning, display_command, display_conflict_guidance,
    display_error, display_status, display_success, display_warning, format_conflict_guidance,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_from(prompt, &mut stdin.lock(), &mut io::stdout())
}

/// [confirm_action] over arbitrary streams.
pub fn confirm_from<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "\n{} (y/N): ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(is_affirmative(&line))
}

fn is_affirmative(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative("  yes  "));
    }

    #[test]
    fn test_default_is_no() {
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_confirm_from_writes_prompt() {
        let mut input = Cursor::new(b"y\n".to_vec());
        let mut output = Vec::new();

        let confirmed = confirm_from("Reset Development?", &mut input, &mut output).unwrap();

        assert!(confirmed);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Reset Development? (y/N): "));
    }

    #[test]
    fn test_confirm_from_eof_declines() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert!(!confirm_from("Continue?", &mut input, &mut output).unwrap());
    }
}
