//! Outbound message construction and the welcome email template.

/// Subject line stamped on every welcome email.
pub const WELCOME_SUBJECT: &str = "Welcome to Unify";

/// Fixed portal link included next to the validation link.
const PORTAL_URL: &str = "https://app.unify.example/login";

/// A fully rendered outbound message.
///
/// Built once per request, never mutated, discarded after the send attempt.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html: String,
}

impl OutboundEmail {
    /// Build the welcome email for `to`, embedding the validation link.
    pub fn welcome(from: &str, to: &str, validation_url: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            html: render_welcome_html(validation_url),
        }
    }
}

/// Render the fixed welcome HTML body around the validation link.
///
/// The validation URL is interpolated as-is; recipients get a call-to-action
/// link for account validation plus a fixed link to the portal.
pub fn render_welcome_html(validation_url: &str) -> String {
    format!(
        r#"<div style="background-color:#1a2942;padding:30px;border-radius:10px;font-family:sans-serif;color:#fff;max-width:500px;margin:auto;">
  <h2 style="color:#fff;margin-top:0;">Welcome to <span style="color:#bfc9d9;">Unify</span></h2>
  <p style="font-size:16px;color:#fff;">Thanks for signing up! We are glad to have you with us.</p>
  <div style="background:#fff;padding:20px;border-radius:8px;margin:20px 0;">
    <p style="color:#1a2942;font-size:15px;margin:0 0 10px 0;">To validate your account, click the link below:</p>
    <a href="{validation_url}" target="_blank" rel="noopener noreferrer" style="display:inline-block;background-color:#1a2942;color:#fff;padding:10px 20px;border-radius:5px;text-decoration:none;font-weight:bold;">Validate account</a>
    <br/>
    <a href="{PORTAL_URL}" target="_blank" rel="noopener noreferrer" style="display:inline-block;background-color:#1a2942;color:#fff;padding:10px 20px;border-radius:5px;text-decoration:none;font-weight:bold;margin-top:10px;">Go to the portal</a>
  </div>
  <p style="font-size:13px;color:#bfc9d9;">If you did not request this registration, you can ignore this email.</p>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_validation_url() {
        let html = render_welcome_html("https://validation.example.com/validate/abcd1234");
        assert!(html.contains(r#"href="https://validation.example.com/validate/abcd1234""#));
    }

    #[test]
    fn test_render_includes_portal_link() {
        let html = render_welcome_html("https://x/y");
        assert!(html.contains(PORTAL_URL));
    }

    #[test]
    fn test_welcome_email_fields() {
        let email = OutboundEmail::welcome("noreply@example.com", "user@example.com", "https://x/y");

        assert_eq!(email.from, "noreply@example.com");
        assert_eq!(email.to, "user@example.com");
        assert_eq!(email.subject, WELCOME_SUBJECT);
        assert!(email.html.contains("https://x/y"));
    }
}
