//! GraphQL schema for user records.
//!
//! ```graphql
//! { usersByName(name: "Ann") { id name age profession friendly } }
//! ```
//!
//! The schema is assembled once at startup with the store handle as context
//! data and shared read-only by every request.

pub mod query;
pub mod types;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::storage::SharedStore;

pub use query::{QueryRoot, FETCH_FAILED};
pub use types::UserObject;

/// The usergql GraphQL schema type
pub type UserSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with the store as resolver context
pub fn build_schema(store: SharedStore, max_depth: usize) -> UserSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(store)
        .limit_depth(max_depth)
        .finish()
}

/// Schema definition language for the query surface
pub fn sdl() -> String {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .finish()
        .sdl()
}
