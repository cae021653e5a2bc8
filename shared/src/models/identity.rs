//! Caller identity supplied by the authentication layer

use serde::{Deserialize, Serialize};

/// Who is driving an ordering session
///
/// `user_id` is absent for walk-in diners and for staff ordering on a
/// diner's behalf without an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Option<i64>,
    pub is_staff: bool,
}

impl Identity {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn diner(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            is_staff: false,
        }
    }

    pub fn staff(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            is_staff: true,
        }
    }
}
