//! User record - the domain entity projected from the `users` table

use serde::{Deserialize, Serialize};

/// A single row of the `users` table.
///
/// Values are request-scoped: decoded from a store row, handed to the
/// resolver, and dropped once the response is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the store, never duplicated
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub profession: String,
    pub friendly: bool,
}

impl User {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        age: i32,
        profession: impl Into<String>,
        friendly: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            profession: profession.into(),
            friendly,
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}, {}, friendly: {})",
            self.id, self.name, self.age, self.profession, self.friendly
        )
    }
}
