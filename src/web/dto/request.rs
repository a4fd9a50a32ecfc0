//! Request DTOs for the mail API.

use serde::Deserialize;
use utoipa::ToSchema;

/// Welcome email send request.
///
/// The validation link is accepted under two spellings; both are kept as
/// written so a body carrying both is not rejected, and
/// [`SendEmailRequest::canonical_validation_url`] resolves the one to use.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendEmailRequest {
    /// Recipient address.
    #[serde(default)]
    pub to: Option<String>,
    /// Validation link (canonical spelling).
    #[serde(default, rename = "validationUrl")]
    pub validation_url: Option<String>,
    /// Validation link (lower-cased alias).
    #[serde(default, rename = "validationurl")]
    pub validation_url_alias: Option<String>,
}

impl SendEmailRequest {
    /// Recipient, if present and non-empty.
    pub fn recipient(&self) -> Option<&str> {
        self.to.as_deref().filter(|s| !s.is_empty())
    }

    /// The first non-empty validation URL, preferring the canonical spelling.
    pub fn canonical_validation_url(&self) -> Option<&str> {
        self.validation_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.validation_url_alias.as_deref().filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SendEmailRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_body_parses() {
        let req = parse("{}");
        assert!(req.recipient().is_none());
        assert!(req.canonical_validation_url().is_none());
    }

    #[test]
    fn test_canonical_spelling() {
        let req = parse(r#"{"to":"a@b.com","validationUrl":"https://x/y"}"#);
        assert_eq!(req.recipient(), Some("a@b.com"));
        assert_eq!(req.canonical_validation_url(), Some("https://x/y"));
    }

    #[test]
    fn test_lowercase_alias() {
        let req = parse(r#"{"to":"a@b.com","validationurl":"https://x/z"}"#);
        assert_eq!(req.canonical_validation_url(), Some("https://x/z"));
    }

    #[test]
    fn test_canonical_spelling_wins_over_alias() {
        let req = parse(r#"{"validationUrl":"https://canonical","validationurl":"https://alias"}"#);
        assert_eq!(req.canonical_validation_url(), Some("https://canonical"));
    }

    #[test]
    fn test_empty_canonical_falls_back_to_alias() {
        let req = parse(r#"{"validationUrl":"","validationurl":"https://alias"}"#);
        assert_eq!(req.canonical_validation_url(), Some("https://alias"));
    }

    #[test]
    fn test_empty_strings_treated_as_missing() {
        let req = parse(r#"{"to":"","validationUrl":""}"#);
        assert!(req.recipient().is_none());
        assert!(req.canonical_validation_url().is_none());
    }
}
