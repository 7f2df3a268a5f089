//! Pure formatting functions for UI output.
//!
//! Progress narration goes to stdout, warnings and errors to stderr.

use console::style;

use crate::warning::CleanupWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the start or end marker of a workflow.
pub fn display_banner(message: &str) {
    println!("{}", style(format!("--- {} ---", message)).bold());
}

/// Echo a backend command line before it runs.
pub fn display_command(command_line: &str) {
    println!("{} {}", style("Executing:").dim(), style(command_line).cyan());
}

/// Print a free-form warning.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Display a non-fatal cleanup warning.
pub fn display_cleanup_warning(warning: &CleanupWarning) {
    display_warning(&warning.to_string());
}

/// Steps for resolving a conflicted merge or pull by hand.
///
/// # Arguments
/// * `remote` - Remote the resolved branch is pushed to
/// * `branch` - Branch that holds the conflicted merge
pub fn format_conflict_guidance(remote: &str, branch: &str) -> String {
    format!(
        "Merge conflict resolution instructions:\n\
         1. Run `git status` to view conflicting files\n\
         2. Manually edit files (remove conflict markers)\n\
         3. Run `git add .` to mark conflicts as resolved\n\
         4. Run `git commit -m \"fix: Resolve merge conflicts\"`\n\
         5. Run `git push {} {}`",
        remote, branch
    )
}

/// Print the manual conflict resolution steps.
pub fn display_conflict_guidance(remote: &str, branch: &str) {
    println!("\n{}", format_conflict_guidance(remote, branch));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_guidance_names_push_target() {
        let guidance = format_conflict_guidance("origin", "Development");
        assert!(guidance.contains("git status"));
        assert!(guidance.contains("git add ."));
        assert!(guidance.contains("git commit"));
        assert!(guidance.ends_with("`git push origin Development`"));
    }

    #[test]
    fn test_conflict_guidance_has_five_steps() {
        let guidance = format_conflict_guidance("upstream", "Nightly");
        assert_eq!(guidance.lines().count(), 6);
        assert!(guidance.lines().nth(5).unwrap().starts_with("5."));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        // Visual verification test - output is printed to stdout/stderr
        display_status("test status");
        display_success("test success");
        display_error("test error");
        display_banner("test banner");
        display_command("git status");
    }
}
