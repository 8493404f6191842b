use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub item_id: i64,
    pub author_id: i64,
    /// Author's name at the time of writing
    pub author_name: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub item_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub text: String,
    pub created: DateTime<Utc>,
}
