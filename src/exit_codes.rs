//! Stable exit codes for the `podman-ai` binary.

/// A command was generated and run through (including a declined confirmation
/// or a command that itself failed).
pub const OK: u8 = 0;
/// No query was supplied, or no valid command could be generated after the retry.
pub const FAILED: u8 = 1;
/// The configuration file exists but is malformed or missing required keys.
pub const CONFIG: u8 = 2;
