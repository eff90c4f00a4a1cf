//! Best-effort extraction of subject/body from raw model text.
//!
//! Models are asked for a JSON object but frequently wrap it in Markdown
//! fences, add a preamble, or answer with a `Subject:` line instead.

use super::{BackendError, GeneratedContent};
use serde_json::{Map, Value};

const SUBJECT_KEYS: &[&str] = &["subject", "title"];
const BODY_KEYS: &[&str] = &["body", "content", "text"];

/// Extract a non-empty subject and body from model output.
///
/// Tried in order: the whole text as JSON, the text inside a code fence, the
/// span from the first `{` to the last `}`, and finally a `Subject:` header
/// line followed by the body. A candidate that parses as JSON but lacks a
/// usable subject or body does not stop the search.
pub fn extract_content(raw: &str) -> Result<GeneratedContent, BackendError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BackendError::Malformed);
    }

    let mut candidates: Vec<&str> = vec![trimmed];
    if let Some(fenced) = strip_code_fence(trimmed) {
        candidates.push(fenced);
    }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            candidates.push(&trimmed[start..=end]);
        }
    }

    for candidate in candidates {
        let Ok(Value::Object(object)) = serde_json::from_str::<Value>(candidate) else {
            continue;
        };
        if let Some(content) = from_object(&object) {
            return Ok(content);
        }
        // Wrapped one level down, e.g. {"email": {"subject": ..., "body": ...}}
        if let Some(content) = object.values().filter_map(Value::as_object).find_map(from_object) {
            return Ok(content);
        }
    }

    parse_subject_header(trimmed)
}

fn from_object(object: &Map<String, Value>) -> Option<GeneratedContent> {
    validate(field(object, SUBJECT_KEYS), field(object, BODY_KEYS)).ok()
}

/// First non-blank string under any of `names`, compared case-insensitively.
fn field(object: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        object
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .filter_map(|(_, value)| value.as_str())
            .find(|value| !value.trim().is_empty())
            .map(str::to_string)
    })
}

fn validate(
    subject: Option<String>,
    body: Option<String>,
) -> Result<GeneratedContent, BackendError> {
    let subject = subject.map(|s| s.trim().to_string()).unwrap_or_default();
    let body = body.map(|b| b.trim().to_string()).unwrap_or_default();
    if subject.is_empty() || body.is_empty() {
        return Err(BackendError::Malformed);
    }
    Ok(GeneratedContent { subject, body })
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // Skip an optional language tag such as ```json
    let content_start = after.find('\n')? + 1;
    let content = &after[content_start..];
    let end = content.find("```")?;
    Some(content[..end].trim())
}

fn parse_subject_header(text: &str) -> Result<GeneratedContent, BackendError> {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().trim();
    let subject = first
        .strip_prefix("Subject:")
        .or_else(|| first.strip_prefix("subject:"))
        .or_else(|| first.strip_prefix("**Subject:**"))
        .ok_or(BackendError::Malformed)?;

    let body = lines.collect::<Vec<_>>().join("\n");
    let body = body
        .trim_start()
        .strip_prefix("Body:")
        .unwrap_or(&body)
        .to_string();

    validate(Some(subject.to_string()), Some(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_json() {
        let content = extract_content(r#"{"subject": "Hello", "body": "World"}"#).unwrap();
        assert_eq!(content.subject, "Hello");
        assert_eq!(content.body, "World");
    }

    #[test]
    fn test_extract_fenced_json() {
        let raw = "```json\n{\"subject\": \"Ship it\", \"body\": \"Hi {user}\"}\n```";
        let content = extract_content(raw).unwrap();
        assert_eq!(content.subject, "Ship it");
        assert_eq!(content.body, "Hi {user}");
    }

    #[test]
    fn test_extract_json_with_preamble() {
        let raw = "Sure! Here is your email:\n{\"subject\": \"S\", \"body\": \"B\"}\nEnjoy.";
        let content = extract_content(raw).unwrap();
        assert_eq!(content.subject, "S");
        assert_eq!(content.body, "B");
    }

    #[test]
    fn test_extract_subject_header() {
        let raw = "Subject: Your streak misses you\n\nHi {user},\nCome back.";
        let content = extract_content(raw).unwrap();
        assert_eq!(content.subject, "Your streak misses you");
        assert_eq!(content.body, "Hi {user},\nCome back.");
    }

    #[test]
    fn test_extract_missing_body_is_malformed() {
        assert!(matches!(
            extract_content(r#"{"subject": "Only a subject"}"#),
            Err(BackendError::Malformed)
        ));
    }

    #[test]
    fn test_extract_empty_fields_are_malformed() {
        assert!(matches!(
            extract_content(r#"{"subject": "  ", "body": "text"}"#),
            Err(BackendError::Malformed)
        ));
    }

    #[test]
    fn test_extract_nested_message_object() {
        let content =
            extract_content(r#"{"email": {"subject": "S", "body": "B"}}"#).unwrap();
        assert_eq!(content.subject, "S");
        assert_eq!(content.body, "B");
    }

    #[test]
    fn test_extract_duplicate_keys_in_different_case() {
        let raw = r#"{"subject": "S", "Subject": "S2", "body": "B"}"#;
        let content = extract_content(raw).unwrap();
        assert!(content.subject == "S" || content.subject == "S2");
        assert_eq!(content.body, "B");

        let raw = r#"{"Subject": "", "subject": "Real", "Body": "B"}"#;
        assert_eq!(extract_content(raw).unwrap().subject, "Real");
    }

    #[test]
    fn test_unusable_json_falls_through_to_subject_header() {
        // The brace span parses as JSON but carries no message
        let raw = "Subject: Heads up\nBody: {\"not\": \"a message\"}";
        let content = extract_content(raw).unwrap();
        assert_eq!(content.subject, "Heads up");
        assert_eq!(content.body, r#"{"not": "a message"}"#);
    }

    #[test]
    fn test_extract_free_text_is_malformed() {
        assert!(matches!(
            extract_content("I cannot help with that."),
            Err(BackendError::Malformed)
        ));
        assert!(matches!(extract_content(""), Err(BackendError::Malformed)));
    }
}
