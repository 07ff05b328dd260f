//! Users: demo-style registration (get or create by email) and lookup.

use crate::models::{BracketError, User, UserId};
use crate::store::StoreTx;

/// Return the user registered under `email`, creating it if needed.
pub fn register_user(tx: &mut dyn StoreTx, name: &str, email: &str) -> Result<User, BracketError> {
    let name = name.trim();
    let email = email.trim().to_ascii_lowercase();
    if name.is_empty() || email.is_empty() {
        return Err(BracketError::EmptyName);
    }
    if let Some(existing) = tx.find_user_by_email(&email)? {
        return Ok(existing);
    }
    let user = User::new(name, email);
    tx.insert_user(&user)?;
    log::info!("Registered user {} ({})", user.name, user.id);
    Ok(user)
}

pub fn get_user(tx: &mut dyn StoreTx, id: UserId) -> Result<User, BracketError> {
    tx.get_user(id)?.ok_or(BracketError::UserNotFound(id))
}

/// Display name for `id`, if the user is known.
pub(crate) fn display_name(tx: &mut dyn StoreTx, id: UserId) -> Result<Option<String>, BracketError> {
    Ok(tx.get_user(id)?.map(|u| u.name))
}
