//! Caller-side boundary for the analytics engine: accepts the upstream
//! session and user payloads in whichever shape they arrive and resolves them
//! into `demotrack_core` models.

pub mod envelope;
pub mod error;
pub mod records;

use std::path::Path;

use demotrack_core::{Session, User};

pub use envelope::{Collection, Page};
pub use error::IngestError;
pub use records::{
    parse_calendar_date, parse_timestamp, resolve_session, resolve_sessions, resolve_user,
    resolve_users, RawId, RawSession, RawUser,
};

pub fn parse_sessions(json: &str) -> Result<Vec<Session>, IngestError> {
    let collection: Collection<RawSession> = serde_json::from_str(json)?;
    resolve_sessions(collection.into_items())
}

pub fn parse_users(json: &str) -> Result<Vec<User>, IngestError> {
    let collection: Collection<RawUser> = serde_json::from_str(json)?;
    resolve_users(collection.into_items())
}

pub fn load_sessions(path: &Path) -> Result<Vec<Session>, IngestError> {
    let raw = std::fs::read_to_string(path)?;
    let sessions = parse_sessions(&raw)?;
    tracing::info!("Loaded {} sessions from {}", sessions.len(), path.display());
    Ok(sessions)
}

pub fn load_users(path: &Path) -> Result<Vec<User>, IngestError> {
    let raw = std::fs::read_to_string(path)?;
    let users = parse_users(&raw)?;
    tracing::info!("Loaded {} users from {}", users.len(), path.display());
    Ok(users)
}
