//! Admission rules for adding recipient addresses to a user's groups.
//!
//! Every quota is derived from the group list itself on each check, so there
//! is no stored counter that could drift from the data.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::models::group::{EmailGroup, GroupBook};

pub const DEFAULT_GROUP: &str = "General";
pub const MAX_EMAILS_PER_GROUP: usize = 500;
pub const MAX_GROUPS_PER_USER: usize = 5;
pub const MAX_EMAILS_PER_USER: usize = 1000;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Email already exists in one of your groups!")]
    DuplicateEmail,
    #[error("{}", total_quota_message(.batch))]
    TotalQuotaExceeded { batch: bool },
    #[error("Not enough space in group \"{group}\". Max {} allowed.", MAX_EMAILS_PER_GROUP)]
    GroupQuotaExceeded { group: String },
    #[error("Maximum {} groups allowed!", MAX_GROUPS_PER_USER)]
    GroupLimitExceeded,
    #[error("File exceeds {} emails limit.", MAX_EMAILS_PER_GROUP)]
    FileTooLarge,
}

fn total_quota_message(batch: &bool) -> String {
    if *batch {
        format!("Adding these would exceed the {MAX_EMAILS_PER_USER} total email limit.")
    } else {
        format!("Total {MAX_EMAILS_PER_USER} emails limit reached!")
    }
}

/// Result of a successful bulk admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
    pub group: String,
    pub added: usize,
    pub skipped: usize,
    pub group_size: usize,
}

pub fn normalize_group_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_GROUP.to_string(),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Pulls every address-looking token out of free-form text, lowercased and
/// deduplicated in first-seen order.
pub fn extract_candidates(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    EMAIL_PATTERN
        .find_iter(content)
        .map(|found| found.as_str().to_lowercase())
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

impl GroupBook {
    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.emails.len()).sum()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.emails.iter().any(|known| known == email))
    }

    pub fn find(&self, name: &str) -> Option<&EmailGroup> {
        self.position(name).map(|index| &self.groups[index])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();

        self.groups
            .iter()
            .position(|group| group.name.to_lowercase() == name)
    }

    /// Admits a single address, failing on any duplicate across all groups.
    ///
    /// `email` and `group_name` are expected to be normalized already.
    pub fn add_one(&mut self, group_name: &str, email: String) -> Result<&EmailGroup, CapacityError> {
        if self.contains(&email) {
            return Err(CapacityError::DuplicateEmail);
        }

        if self.total() >= MAX_EMAILS_PER_USER {
            return Err(CapacityError::TotalQuotaExceeded { batch: false });
        }

        let index = match self.position(group_name) {
            Some(index) => {
                if self.groups[index].emails.len() >= MAX_EMAILS_PER_GROUP {
                    return Err(CapacityError::GroupQuotaExceeded {
                        group: self.groups[index].name.clone(),
                    });
                }
                index
            }
            None => self.create(group_name)?,
        };

        self.groups[index].emails.push(email);

        Ok(&self.groups[index])
    }

    /// Admits a batch of addresses. Candidates already present in any group
    /// are skipped rather than rejected; every other breach rejects the
    /// whole batch and leaves the book untouched.
    pub fn add_many(
        &mut self,
        group_name: &str,
        candidates: Vec<String>,
    ) -> Result<Admitted, CapacityError> {
        if candidates.len() > MAX_EMAILS_PER_GROUP {
            return Err(CapacityError::FileTooLarge);
        }

        let existing: HashSet<&str> = self
            .groups
            .iter()
            .flat_map(|group| group.emails.iter().map(String::as_str))
            .collect();

        let mut seen = HashSet::new();
        let new_emails: Vec<String> = candidates
            .iter()
            .filter(|email| !existing.contains(email.as_str()))
            .filter(|email| seen.insert(email.as_str()))
            .cloned()
            .collect();

        let skipped = candidates.len() - new_emails.len();

        if self.total() + new_emails.len() > MAX_EMAILS_PER_USER {
            return Err(CapacityError::TotalQuotaExceeded { batch: true });
        }

        let index = match self.position(group_name) {
            Some(index) => {
                let group = &self.groups[index];
                if group.emails.len() + new_emails.len() > MAX_EMAILS_PER_GROUP {
                    return Err(CapacityError::GroupQuotaExceeded {
                        group: group.name.clone(),
                    });
                }
                index
            }
            None => self.create(group_name)?,
        };

        let added = new_emails.len();
        let group = &mut self.groups[index];
        group.emails.extend(new_emails);

        Ok(Admitted {
            group: group.name.clone(),
            added,
            skipped,
            group_size: group.emails.len(),
        })
    }

    fn create(&mut self, name: &str) -> Result<usize, CapacityError> {
        if self.groups.len() >= MAX_GROUPS_PER_USER {
            return Err(CapacityError::GroupLimitExceeded);
        }

        self.groups.push(EmailGroup {
            name: name.to_string(),
            emails: Vec::new(),
        });

        Ok(self.groups.len() - 1)
    }
}
