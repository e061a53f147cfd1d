use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    error::{AppError, AppResult},
    models::mail::OutgoingMail,
    repositories::user::UserRepository,
    services::{mail::MailService, mailer::Mailer},
};

pub struct MailServiceImpl {
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
}

impl MailServiceImpl {
    pub fn new(users: Arc<dyn UserRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self { users, mailer }
    }
}

#[async_trait]
impl MailService for MailServiceImpl {
    #[tracing::instrument(skip(self, mail), fields(from = %mail.from))]
    async fn send(&self, user_id: &str, mail: OutgoingMail) -> AppResult<()> {
        if !mail.has_recipients() {
            return Err(AppError::BadRequest("Recipient is required"));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found"))?;

        let sender = user
            .sending_account(&mail.from)
            .ok_or_else(|| AppError::NotFound("Sender email is not linked to your account"))?;

        if let Err(error) = self.mailer.deliver(sender, &mail).await {
            tracing::warn!(%error, "mail delivery failed");
            return Err(error.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Mutex;

    use super::*;
    use crate::domain::models::user::{EmailAccount, User};
    use crate::infrastructure::mailers::smtp::mock::SmtpMailer;
    use crate::infrastructure::repositories::user::mock::UserRepositoryImpl;
    use rstest::*;

    #[fixture]
    fn users() -> Arc<UserRepositoryImpl> {
        Arc::new(UserRepositoryImpl {
            users: Mutex::new(vec![User {
                id: "1".to_string(),
                full_name: "Test".to_string(),
                email: "test_user@mailer.com".to_string(),
                password: String::new(),
                email_accounts: vec![EmailAccount {
                    email: "sender@gmail.com".to_string(),
                    app_password: "abcd efgh ijkl mnop".to_string(),
                }],
            }]),
        })
    }

    fn mail(from: &str) -> OutgoingMail {
        OutgoingMail {
            from: from.to_string(),
            to: vec![],
            bcc: vec!["a@mail.com".to_string(), "b@mail.com".to_string()],
            subject: "Hello".to_string(),
            text: Some("This is a test email".to_string()),
            html: Some("<b>This is a test email</b>".to_string()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_send_to_group(users: Arc<UserRepositoryImpl>) {
        let mailer = Arc::new(SmtpMailer::default());
        let service = MailServiceImpl::new(users, mailer.clone());

        service.send("1", mail("Sender@Gmail.com")).await.unwrap();

        let delivered = mailer.delivered.lock().await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, "sender@gmail.com");
        assert_eq!(delivered[0].1.bcc.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_send_from_unlinked_sender(users: Arc<UserRepositoryImpl>) {
        let service = MailServiceImpl::new(users, Arc::new(SmtpMailer::default()));

        assert_eq!(
            service.send("1", mail("other@gmail.com")).await.unwrap_err(),
            AppError::NotFound("Sender email is not linked to your account")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_send_without_recipients(users: Arc<UserRepositoryImpl>) {
        let service = MailServiceImpl::new(users, Arc::new(SmtpMailer::default()));

        let result = service
            .send(
                "1",
                OutgoingMail {
                    bcc: vec![],
                    ..mail("sender@gmail.com")
                },
            )
            .await;

        assert_eq!(
            result.unwrap_err(),
            AppError::BadRequest("Recipient is required")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_send_transport_failure(users: Arc<UserRepositoryImpl>) {
        let mailer = Arc::new(SmtpMailer {
            failure: Some("535 5.7.8 Username and Password not accepted".to_string()),
            ..Default::default()
        });
        let service = MailServiceImpl::new(users, mailer);

        let error = service
            .send("1", mail("sender@gmail.com"))
            .await
            .unwrap_err();

        assert_eq!(error.code, 500);
        assert_eq!(
            error.message,
            "535 5.7.8 Username and Password not accepted"
        );
    }
}
