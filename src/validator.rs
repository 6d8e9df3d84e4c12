//! Syntactic sanity check for generated commands.
//!
//! The check only looks at the shape of the text. It does not parse flags or
//! subcommands, so plenty of semantically wrong commands pass; whether a
//! command really works is decided by running it.

/// Program name every generated command must start with.
pub const TARGET_CLI: &str = "podman";

/// Returns true when `command` looks like a single `podman` invocation with at
/// least one argument.
pub fn is_valid_command(command: &str) -> bool {
    if command.contains('\n') || command.contains('\r') {
        return false;
    }

    let mut tokens = command.split_whitespace();
    match tokens.next() {
        Some(program) if program == TARGET_CLI => tokens.next().is_some(),
        _ => false,
    }
}
