use std::fmt;

use serde::Deserialize;

use crate::models::Cart;

/// Registered user. Owns exactly one cart by value.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub cart: Cart,
}

// The stored hash is masked so it never shows up in logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"***")
            .field("cart", &self.cart)
            .finish()
    }
}

/// NewUser model for inserting new records.
///
/// `password_hash` is already hashed; the store never sees the plain secret.
#[derive(Deserialize, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password_hash", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            cart: Cart::new(1, 1),
        };

        let rendered = format!("{:?}", user);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("argon2id"));
    }
}
