use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::SmtpConfig;
use crate::domain::models::mail::OutgoingMail;
use crate::domain::models::user::EmailAccount;
use crate::domain::services::mailer::{Mailer, MailerError};

/// Opens an authenticated relay connection per delivery, since every
/// sending account logs in with its own app password.
pub struct SmtpMailer {
    relay: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            relay: config.relay.to_owned(),
            port: config.port,
        }
    }

    fn transport(
        &self,
        sender: &EmailAccount,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let credentials = Credentials::new(sender.email.clone(), sender.app_password.clone());

        Ok(AsyncSmtpTransport::<Tokio1Executor>::relay(&self.relay)
            .map_err(|err| MailerError::Transport(err.to_string()))?
            .port(self.port)
            .credentials(credentials)
            .build())
    }
}

pub fn build_message(sender: &EmailAccount, mail: &OutgoingMail) -> Result<Message, MailerError> {
    let mut builder = Message::builder()
        .from(sender.email.parse::<Mailbox>()?)
        .subject(mail.subject.as_str());

    for to in &mail.to {
        builder = builder.to(to.parse::<Mailbox>()?);
    }

    for bcc in &mail.bcc {
        builder = builder.bcc(bcc.parse::<Mailbox>()?);
    }

    let message = match (&mail.text, &mail.html) {
        (Some(text), Some(html)) => {
            builder.multipart(MultiPart::alternative_plain_html(text.clone(), html.clone()))?
        }
        (None, Some(html)) => builder.header(ContentType::TEXT_HTML).body(html.clone())?,
        (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text.clone())?,
        (None, None) => builder.header(ContentType::TEXT_PLAIN).body(String::new())?,
    };

    Ok(message)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, sender: &EmailAccount, mail: &OutgoingMail) -> Result<(), MailerError> {
        let message = build_message(sender, mail)?;

        let response = self
            .transport(sender)?
            .send(message)
            .await
            .map_err(|err| MailerError::Transport(err.to_string()))?;

        tracing::info!(
            sender = %sender.email,
            recipients = mail.to.len() + mail.bcc.len(),
            code = %response.code(),
            "mail delivered"
        );

        Ok(())
    }
}
