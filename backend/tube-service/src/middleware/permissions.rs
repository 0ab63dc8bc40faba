/// Ownership checks for routes that report a non-owner explicitly (403).
///
/// Comments and playlists never reach these: their writes are conditional on
/// (id, owner) in SQL and a miss is reported as 404.
use crate::error::{AppError, Result};
use uuid::Uuid;

pub fn ensure_owner(user_id: Uuid, owner_id: Uuid, message: &str) -> Result<()> {
    if user_id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}
