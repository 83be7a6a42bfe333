//! Well-known role name constants.
//!
//! These must match the seed data in `0001_create_accounts_table.sql`.

pub const ROLE_PLAYER: &str = "player";
pub const ROLE_GAME_MASTER: &str = "game_master";
pub const ROLE_ADMIN: &str = "admin";

/// Whether a role grants access to staff-only endpoints (bans, news
/// management, etc.). Admin-only endpoints check [`ROLE_ADMIN`] directly.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_GAME_MASTER
}

/// Whether a role name is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_PLAYER | ROLE_GAME_MASTER | ROLE_ADMIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_roles() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_GAME_MASTER));
        assert!(!is_staff(ROLE_PLAYER));
        assert!(!is_staff("moderator"));
    }

    #[test]
    fn role_validity() {
        assert!(is_valid_role("player"));
        assert!(is_valid_role("admin"));
        assert!(!is_valid_role("root"));
    }
}
