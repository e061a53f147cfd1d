use serde::{Deserialize, Serialize};

use crate::domain::models::group::{EmailGroup, GroupBook};

#[derive(Debug, Deserialize)]
pub struct SurrealGroupBook {
    #[serde(default)]
    groups: Vec<SurrealGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurrealGroup {
    name: String,
    #[serde(default)]
    emails: Vec<String>,
}

#[derive(Serialize)]
pub struct SurrealGroupBookContent {
    groups: Vec<SurrealGroup>,
}

impl From<GroupBook> for SurrealGroupBookContent {
    fn from(book: GroupBook) -> Self {
        SurrealGroupBookContent {
            groups: book
                .groups
                .into_iter()
                .map(|group| SurrealGroup {
                    name: group.name,
                    emails: group.emails,
                })
                .collect(),
        }
    }
}

impl From<SurrealGroupBook> for GroupBook {
    fn from(book: SurrealGroupBook) -> Self {
        GroupBook {
            groups: book
                .groups
                .into_iter()
                .map(|group| EmailGroup {
                    name: group.name,
                    emails: group.emails,
                })
                .collect(),
        }
    }
}
