//! Mailer trait and SMTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::config::SmtpConfig;
use crate::{Result, UnimailError};

use super::{DeliveryError, DeliveryErrorKind, OutboundEmail};

/// Receipt returned by a successful delivery.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    /// Message-ID header stamped on the outbound message.
    pub message_id: String,
}

/// Async email delivery capability.
///
/// The web layer only depends on this trait; tests inject a stub instead of
/// a live SMTP transport.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Attempt delivery of a single message. One attempt, no retries.
    async fn send(&self, email: &OutboundEmail) -> std::result::Result<DeliveryReceipt, DeliveryError>;
}

/// SMTP-based mailer using lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a mailer from SMTP configuration.
    ///
    /// The transport uses STARTTLS and keeps its own connection pool; build
    /// it once at startup and share it across requests.
    pub fn from_config(config: &SmtpConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| UnimailError::Transport(e.to_string()))?
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }

    /// Build a lettre Message from our OutboundEmail type.
    ///
    /// Returns the message together with the generated Message-ID.
    fn build_message(
        &self,
        email: &OutboundEmail,
    ) -> std::result::Result<(Message, String), DeliveryError> {
        let from: Mailbox = email.from.parse().map_err(|_| {
            DeliveryError::new(
                DeliveryErrorKind::Other,
                format!("invalid sender address: {}", email.from),
            )
        })?;

        let to: Mailbox = email.to.parse().map_err(|_| {
            DeliveryError::new(
                DeliveryErrorKind::Other,
                format!("invalid recipient address: {}", email.to),
            )
        })?;

        // SMTP returns no message id of its own; stamp one so callers get a
        // stable reference to the delivery.
        let message_id = format!("<{}@unimail>", Uuid::new_v4());

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .message_id(Some(message_id.clone()))
            .singlepart(SinglePart::html(email.html.clone()))
            .map_err(|e| DeliveryError::new(DeliveryErrorKind::Other, e.to_string()))?;

        Ok((message, message_id))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        email: &OutboundEmail,
    ) -> std::result::Result<DeliveryReceipt, DeliveryError> {
        let (message, message_id) = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::new(classify(&e), e.to_string()))?;

        Ok(DeliveryReceipt { message_id })
    }
}

/// Classify a lettre SMTP error into a delivery error kind.
///
/// Total over its input: anything unrecognized falls through to
/// [`DeliveryErrorKind::Other`].
fn classify(err: &lettre::transport::smtp::Error) -> DeliveryErrorKind {
    if err.is_timeout() {
        return DeliveryErrorKind::Timeout;
    }

    // Credential rejections come back as permanent negative responses (the
    // 53x family, 535 being the usual one). lettre does not expose the full
    // 3-digit reply code, so recognize the reply text the server attaches,
    // which lettre carries in the error display and source chain.
    if err.is_permanent() {
        let text = error_chain_text(err);
        if text.contains("auth") || text.contains("credential") || text.contains("password") {
            return DeliveryErrorKind::Auth;
        }
        return DeliveryErrorKind::Other;
    }

    // Resolution and connect failures surface as io errors in the source chain.
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return match io.kind() {
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                    DeliveryErrorKind::Timeout
                }
                std::io::ErrorKind::NotFound => DeliveryErrorKind::HostNotFound,
                _ if io.to_string().contains("lookup address") => DeliveryErrorKind::HostNotFound,
                _ => DeliveryErrorKind::Other,
            };
        }
        source = cause.source();
    }

    DeliveryErrorKind::Other
}

/// Lower-cased display text of an error and its whole source chain.
fn error_chain_text(err: &lettre::transport::smtp::Error) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer".to_string(),
            password: "secret".to_string(),
            from: "noreply@example.com".to_string(),
            timeout_secs: 10,
        }
    }

    #[tokio::test]
    async fn test_from_config() {
        let mailer = SmtpMailer::from_config(&test_config());
        assert!(mailer.is_ok());
    }

    #[tokio::test]
    async fn test_build_message_generates_message_id() {
        let mailer = SmtpMailer::from_config(&test_config()).unwrap();
        let email = OutboundEmail::welcome("noreply@example.com", "user@example.com", "https://x/y");

        let (_, message_id) = mailer.build_message(&email).unwrap();
        assert!(message_id.starts_with('<'));
        assert!(message_id.ends_with("@unimail>"));
    }

    #[tokio::test]
    async fn test_build_message_unique_message_ids() {
        let mailer = SmtpMailer::from_config(&test_config()).unwrap();
        let email = OutboundEmail::welcome("noreply@example.com", "user@example.com", "https://x/y");

        let (_, first) = mailer.build_message(&email).unwrap();
        let (_, second) = mailer.build_message(&email).unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_build_message_invalid_recipient() {
        let mailer = SmtpMailer::from_config(&test_config()).unwrap();
        let email = OutboundEmail::welcome("noreply@example.com", "not an address", "https://x/y");

        let err = mailer.build_message(&email).unwrap_err();
        assert_eq!(err.kind, DeliveryErrorKind::Other);
        assert!(err.message.contains("invalid recipient address"));
    }

    // ========================================================================
    // Classification tests
    //
    // These harvest real lettre errors from scripted local listeners instead
    // of hand-built values, since lettre does not expose error constructors.
    // ========================================================================

    use std::net::SocketAddr;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    fn sample_message() -> Message {
        let mailer = SmtpMailer::from_config(&test_config()).unwrap();
        let email = OutboundEmail::welcome("noreply@example.com", "user@example.com", "https://x/y");
        let (message, _) = mailer.build_message(&email).unwrap();
        message
    }

    fn plaintext_transport(host: &str, port: u16) -> AsyncSmtpTransport<Tokio1Executor> {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .timeout(Some(Duration::from_millis(500)))
            .credentials(Credentials::new("mailer".to_string(), "wrong".to_string()))
            .build()
    }

    /// Minimal SMTP listener that advertises AUTH and rejects every attempt
    /// with a 535 reply.
    async fn spawn_auth_rejecting_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let (read, mut write) = socket.split();
                let mut lines = BufReader::new(read).lines();

                write.write_all(b"220 test ESMTP\r\n").await.ok();

                while let Ok(Some(line)) = lines.next_line().await {
                    let command = line.to_uppercase();
                    if command.starts_with("EHLO") || command.starts_with("HELO") {
                        write
                            .write_all(b"250-test greets you\r\n250 AUTH PLAIN LOGIN\r\n")
                            .await
                            .ok();
                    } else if command.starts_with("AUTH") {
                        write
                            .write_all(b"535 5.7.8 authentication credentials invalid\r\n")
                            .await
                            .ok();
                    } else if command.starts_with("QUIT") {
                        write.write_all(b"221 bye\r\n").await.ok();
                        break;
                    } else {
                        write.write_all(b"250 ok\r\n").await.ok();
                    }
                }
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_classify_auth_rejection() {
        let addr = spawn_auth_rejecting_server().await;
        let transport = plaintext_transport("127.0.0.1", addr.port());

        let err = transport.send(sample_message()).await.unwrap_err();
        assert_eq!(classify(&err), DeliveryErrorKind::Auth);
    }

    #[tokio::test]
    async fn test_classify_timeout() {
        // Accept the connection but never send the SMTP greeting.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _socket = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let transport = plaintext_transport("127.0.0.1", addr.port());

        let err = transport.send(sample_message()).await.unwrap_err();
        assert_eq!(classify(&err), DeliveryErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_classify_host_not_found() {
        // The .invalid TLD is reserved and never resolves.
        let transport = plaintext_transport("smtp.does-not-exist.invalid", 2525);

        let err = transport.send(sample_message()).await.unwrap_err();
        assert_eq!(classify(&err), DeliveryErrorKind::HostNotFound);
    }

    #[tokio::test]
    async fn test_classify_connection_refused_is_other() {
        // Grab a free port, then drop the listener so nothing answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = plaintext_transport("127.0.0.1", port);

        let err = transport.send(sample_message()).await.unwrap_err();
        assert_eq!(classify(&err), DeliveryErrorKind::Other);
    }
}
