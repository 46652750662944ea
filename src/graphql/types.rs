use async_graphql::SimpleObject;

use crate::User;

/// A user record as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub profession: String,
    pub friendly: bool,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            profession: user.profession,
            friendly: user.friendly,
        }
    }
}
