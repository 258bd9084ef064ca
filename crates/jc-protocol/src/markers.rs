//! Console prompt markers
//!
//! The jcli console has no message framing. Login progress and the end of a
//! command's output are recognised purely by literal substrings in the text
//! it prints, so these strings are tied to the console build being driven.

use serde::{Deserialize, Serialize};

/// Default text preceding a username request
pub const DEFAULT_USERNAME_PROMPT: &str = "Username:";
/// Default text preceding a password request
pub const DEFAULT_PASSWORD_PROMPT: &str = "Password:";
/// Default banner printed after a successful login
pub const DEFAULT_WELCOME_BANNER: &str = "Welcome to Jasmin console";
/// Default prompt printed when the console is idle
pub const DEFAULT_READY_PROMPT: &str = "jcli :";
/// Default text printed when the credentials are rejected
pub const DEFAULT_AUTH_FAILURE: &str = "Incorrect Username/Password";

/// Literal substrings used to follow the console's login and command flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptMarkers {
    /// Text the console prints before asking for a login name
    pub username_prompt: String,

    /// Text the console prints before asking for a password
    pub password_prompt: String,

    /// Banner that confirms the login succeeded
    pub welcome_banner: String,

    /// Idle prompt. Marks the end of a command's output and is stripped
    /// from the returned text.
    pub ready_prompt: String,

    /// Text that signals rejected credentials. When unset, a bad login
    /// simply stalls until the session times out.
    pub auth_failure: Option<String>,
}

impl Default for PromptMarkers {
    fn default() -> Self {
        Self {
            username_prompt: DEFAULT_USERNAME_PROMPT.to_string(),
            password_prompt: DEFAULT_PASSWORD_PROMPT.to_string(),
            welcome_banner: DEFAULT_WELCOME_BANNER.to_string(),
            ready_prompt: DEFAULT_READY_PROMPT.to_string(),
            auth_failure: Some(DEFAULT_AUTH_FAILURE.to_string()),
        }
    }
}

impl PromptMarkers {
    /// Name of the first marker that is empty, if any.
    ///
    /// An empty marker matches every buffer, which would skip the matching
    /// protocol step entirely.
    pub fn first_empty(&self) -> Option<&'static str> {
        if self.username_prompt.is_empty() {
            Some("username_prompt")
        } else if self.password_prompt.is_empty() {
            Some("password_prompt")
        } else if self.welcome_banner.is_empty() {
            Some("welcome_banner")
        } else if self.ready_prompt.is_empty() {
            Some("ready_prompt")
        } else if self.auth_failure.as_deref() == Some("") {
            Some("auth_failure")
        } else {
            None
        }
    }
}
