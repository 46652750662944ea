use async_graphql::{Context, Error, Object, Result};

use super::types::UserObject;
use crate::storage::SharedStore;

/// Message sent to clients when the store cannot answer. Driver details stay
/// in the server log.
pub const FETCH_FAILED: &str = "failed to fetch users";

/// Note: Converted to GraphQL schema as `Query`.
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Users whose name matches exactly. Order follows the store and is not
    /// stable across calls.
    async fn users_by_name(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> Result<Option<Vec<UserObject>>> {
        let store = ctx.data::<SharedStore>()?;

        match store.find_by_name(&name).await {
            Ok(users) => {
                tracing::debug!("usersByName matched {} row(s)", users.len());
                Ok(Some(users.into_iter().map(UserObject::from).collect()))
            }
            Err(e) => {
                tracing::error!("usersByName fetch failed: {}", e);
                Err(Error::new(FETCH_FAILED))
            }
        }
    }
}
