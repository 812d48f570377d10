use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Login input: the backend accepts either the username or the e-mail.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username_or_email: String,
    pub password: String,
}
