use stockroom_auth::UserRole;

/// Authenticated caller for a request, derived from verified token claims.
///
/// Immutable and present on every protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    user_id: u32,
    role: UserRole,
}

impl CurrentUser {
    pub fn new(user_id: u32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}
