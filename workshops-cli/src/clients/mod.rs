//! Thin blocking HTTP clients for the two external services.
//!
//! Both share one response-mapping convention: 404 → [`HostError::NotFound`],
//! 409 → [`HostError::Conflict`], other non-2xx → [`HostError::Status`].

pub mod github;
pub mod sheets;

use serde::de::DeserializeOwned;
use workshops_sync::HostError;

const USER_AGENT: &str = concat!("workshops/", env!("CARGO_PKG_VERSION"));

pub(crate) fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new().user_agent(USER_AGENT).build()
}

/// Map a ureq call result onto [`HostError`].
pub(crate) fn send(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response, HostError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(code, response)) => {
            let message = error_message(response);
            Err(match code {
                404 => HostError::NotFound(message),
                409 => HostError::Conflict(message),
                _ => HostError::Status { code, message },
            })
        }
        Err(ureq::Error::Transport(transport)) => Err(HostError::Transport(transport.to_string())),
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, HostError> {
    response
        .into_json()
        .map_err(|e| HostError::Decode(e.to_string()))
}

/// GitHub puts the message at `message`; Google APIs at `error.message`.
fn error_message(response: ureq::Response) -> String {
    let status_text = response.status_text().to_string();
    let Ok(body) = response.into_json::<serde_json::Value>() else {
        return status_text;
    };
    message_from_body(&body).unwrap_or(status_text)
}

fn message_from_body(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error").and_then(|e| e.get("message")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn github_error_message() {
        let body = json!({ "message": "Not Found", "documentation_url": "https://docs.github.com" });
        assert_eq!(message_from_body(&body).as_deref(), Some("Not Found"));
    }

    #[test]
    fn google_error_message() {
        let body = json!({ "error": { "code": 401, "message": "Request had invalid authentication credentials." } });
        assert_eq!(
            message_from_body(&body).as_deref(),
            Some("Request had invalid authentication credentials.")
        );
    }

    #[test]
    fn unknown_body_has_no_message() {
        assert!(message_from_body(&json!({ "oops": true })).is_none());
    }
}
