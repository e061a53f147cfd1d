pub mod group;
pub mod jsonwebtoken;
pub mod mail;
pub mod mailer;
pub mod user;
