//! Prompt construction for the generation backend.

/// Maximum number of characters of CLI help included in a prompt.
pub const HELP_CONTEXT_LIMIT: usize = 2000;

/// Appended to help text that was cut at [`HELP_CONTEXT_LIMIT`].
pub const CONTINUATION_MARKER: &str = "...";

/// Label introducing the request section. Always the last section of a prompt.
pub const REQUEST_LABEL: &str = "### Request:";

/// Label introducing the optional CLI help section.
pub const HELP_LABEL: &str = "### podman help:";

const EXAMPLE: &str = "### Example:\n\
Request: Run an Alpine container interactively with a terminal.\n\
Response: podman run -it alpine /bin/sh\n\n";

const INSTRUCTIONS: &str = "You are a CLI assistant. You convert plain language instructions into Podman commands.\n\
You must return ONLY one single valid Podman command. No explanations.\n\
If unsure, refer to the podman CLI help below.\n";

/// Builds the prompt sent to the generation backend.
///
/// The result is the worked example, the instructions, the optional help
/// context (truncated to [`HELP_CONTEXT_LIMIT`] characters) and finally the
/// request. Empty help text is treated as absent.
pub fn build_prompt(request: &str, help_context: Option<&str>) -> String {
    let mut prompt = String::with_capacity(EXAMPLE.len() + INSTRUCTIONS.len() + request.len() + 64);
    prompt.push_str(EXAMPLE);
    prompt.push_str(INSTRUCTIONS);

    if let Some(help) = help_context.filter(|h| !h.is_empty()) {
        prompt.push('\n');
        prompt.push_str(HELP_LABEL);
        prompt.push('\n');
        prompt.push_str(&truncate_help(help));
    }

    prompt.push_str("\n\n");
    prompt.push_str(REQUEST_LABEL);
    prompt.push(' ');
    prompt.push_str(request);
    prompt
}

/// Cuts help text to [`HELP_CONTEXT_LIMIT`] characters. The continuation
/// marker always follows, whether or not anything was cut.
fn truncate_help(help: &str) -> String {
    let kept = match help.char_indices().nth(HELP_CONTEXT_LIMIT) {
        Some((byte_index, _)) => &help[..byte_index],
        None => help,
    };
    format!("{}{}", kept, CONTINUATION_MARKER)
}

/// Recovers the request from a prompt built by [`build_prompt`].
pub fn request_from_prompt(prompt: &str) -> Option<&str> {
    prompt
        .rsplit_once(REQUEST_LABEL)
        .map(|(_, request)| request.trim())
}

/// Whether a prompt built by [`build_prompt`] carries a help section.
pub fn has_help_context(prompt: &str) -> bool {
    prompt.contains(HELP_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let help = "Manage pods, containers and images";
        let first = build_prompt("list running containers", Some(help));
        let second = build_prompt("list running containers", Some(help));
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_contains_example_and_instructions() {
        let prompt = build_prompt("list images", None);
        assert!(prompt.starts_with("### Example:"));
        assert!(prompt.contains("Response: podman run -it alpine /bin/sh"));
        assert!(prompt.contains("ONLY one single valid Podman command"));
    }

    #[test]
    fn test_prompt_ends_with_request() {
        let prompt = build_prompt("stop the web container", None);
        assert!(prompt.ends_with("### Request: stop the web container"));
    }

    #[test]
    fn test_prompt_without_help_has_no_help_section() {
        let prompt = build_prompt("list images", None);
        assert!(!has_help_context(&prompt));
    }

    #[test]
    fn test_empty_help_is_treated_as_absent() {
        assert_eq!(build_prompt("list images", Some("")), build_prompt("list images", None));
    }

    #[test]
    fn test_help_section_precedes_request() {
        let prompt = build_prompt("list images", Some("Available Commands: images, ps"));
        let help_at = prompt.find(HELP_LABEL).unwrap();
        let request_at = prompt.find(REQUEST_LABEL).unwrap();
        assert!(help_at < request_at);
        assert!(prompt.contains("Available Commands: images, ps"));
    }

    #[test]
    fn test_short_help_is_included_whole_with_marker() {
        let help = "x".repeat(HELP_CONTEXT_LIMIT);
        let prompt = build_prompt("list images", Some(&help));
        assert!(prompt.contains(&format!("{}\n{}{}\n\n{}", HELP_LABEL, help, CONTINUATION_MARKER, REQUEST_LABEL)));
    }

    #[test]
    fn test_marker_follows_tiny_help() {
        let prompt = build_prompt("list images", Some("ps  List containers"));
        assert!(prompt.contains("ps  List containers...\n\n"));
    }

    #[test]
    fn test_long_help_is_truncated_to_limit_with_marker() {
        let help = format!("{}{}", "a".repeat(HELP_CONTEXT_LIMIT), "Z".repeat(500));
        let prompt = build_prompt("list images", Some(&help));

        let expected = format!("{}\n{}{}\n\n", HELP_LABEL, "a".repeat(HELP_CONTEXT_LIMIT), CONTINUATION_MARKER);
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains('Z'));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let help = "é".repeat(HELP_CONTEXT_LIMIT + 10);
        let truncated = truncate_help(&help);
        assert_eq!(truncated.chars().count(), HELP_CONTEXT_LIMIT + CONTINUATION_MARKER.len());
        assert!(truncated.ends_with(CONTINUATION_MARKER));
    }

    #[test]
    fn test_request_from_prompt_round_trips_request() {
        let prompt = build_prompt("remove all containers", Some("help text"));
        assert_eq!(request_from_prompt(&prompt), Some("remove all containers"));
        assert!(has_help_context(&prompt));
    }
}
