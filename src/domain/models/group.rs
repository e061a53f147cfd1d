#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailGroup {
    pub name: String,
    pub emails: Vec<String>,
}

/// All groups owned by one user, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBook {
    pub groups: Vec<EmailGroup>,
}

#[derive(Debug, Clone)]
pub struct AddEmail {
    pub group_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ImportEmails {
    pub group_name: Option<String>,
    pub content: String,
}
