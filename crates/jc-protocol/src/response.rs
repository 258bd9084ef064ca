//! Command output extraction

/// Strip console framing from the text received after a command was sent.
///
/// Every occurrence of `ready_prompt` is removed, then the first literal
/// occurrence of the echoed `command`, and the remainder is trimmed. Line
/// endings are normalized to `\n` first so a multi-line command still
/// matches its CRLF echo.
///
/// Output that legitimately contains the ready prompt text loses it too.
pub fn extract_response(region: &str, ready_prompt: &str, command: &str) -> String {
    let text = normalize_newlines(region);
    let mut text = if ready_prompt.is_empty() {
        text
    } else {
        text.replace(ready_prompt, "")
    };

    let echo = normalize_newlines(command);
    if !echo.is_empty() {
        if let Some(pos) = text.find(echo.as_str()) {
            text.replace_range(pos..pos + echo.len(), "");
        }
    }

    text.trim().to_string()
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}
