//! Mock gateway identity for HTTP tests.
//!
//! Services behind the gateway receive `x-foodgram-user-id` + `x-foodgram-user-role` headers
//! injected by the gateway. In tests, `MockAuth` produces these headers directly so no real
//! gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use foodgram_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use foodgram_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: i32,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: i32, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn user(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Normal)
    }

    pub fn staff(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Staff)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from(self.user_id),
        );
        map.insert(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(self.user_role.as_u8())),
        );
        map
    }
}
