use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: RoleFlags,
    pub status: UserStatus,
    pub join_date: NaiveDate,
}

/// Capabilities derived from the free-text role once, at the data boundary.
/// The flags are independent: "Admin / Employee" sets both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_employee: bool,
}

impl RoleFlags {
    /// Case-insensitive substring match on "admin" and "employee".
    pub fn from_role(role: &str) -> Self {
        let lower = role.to_lowercase();
        Self {
            is_admin: lower.contains("admin"),
            is_employee: lower.contains("employee"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Other(String),
}

impl From<String> for UserStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => UserStatus::Active,
            "inactive" => UserStatus::Inactive,
            "pending" => UserStatus::Pending,
            _ => UserStatus::Other(s),
        }
    }
}

impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        UserStatus::from(s.to_string())
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => "active".to_string(),
            UserStatus::Inactive => "inactive".to_string(),
            UserStatus::Pending => "pending".to_string(),
            UserStatus::Other(s) => s,
        }
    }
}
