use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user as resolved by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DirectoryUser {
    pub id: String,
    pub username: String,
    pub is_bot: bool,
}

/// A potential partner enumerated from a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: String,
    pub is_bot: bool,
}

impl Candidate {
    pub fn new(id: impl Into<String>, is_bot: bool) -> Self {
        Self { id: id.into(), is_bot }
    }
}

impl From<DirectoryUser> for Candidate {
    fn from(user: DirectoryUser) -> Self {
        Self { id: user.id, is_bot: user.is_bot }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Online,
    Away,
    DoNotDisturb,
    Offline,
    Unknown,
}

impl UserStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" => UserStatus::Online,
            "away" => UserStatus::Away,
            "dnd" | "do_not_disturb" => UserStatus::DoNotDisturb,
            "offline" => UserStatus::Offline,
            _ => UserStatus::Unknown,
        }
    }

    /// Offline and unresolvable users cannot be paired.
    pub fn is_reachable(self) -> bool {
        !matches!(self, UserStatus::Offline | UserStatus::Unknown)
    }
}
