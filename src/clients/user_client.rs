use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{Caller, User, UserCreate, UserId};
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(UserError::from)
    }

    /// Resolves the identity a request acts as. `None` for unknown ids.
    #[instrument(skip(self))]
    pub async fn authenticate(&self, id: UserId) -> Result<Option<Caller>, UserError> {
        Ok(self.get_user(id).await?.as_ref().map(Caller::from))
    }
}
