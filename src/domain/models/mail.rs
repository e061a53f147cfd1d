#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
}

impl OutgoingMail {
    pub fn has_recipients(&self) -> bool {
        !self.to.is_empty() || !self.bcc.is_empty()
    }
}
