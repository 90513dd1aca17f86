use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserId};
use super::error::UserError;

impl Entity for User {
    type Id = UserId;
    type CreateParams = UserCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    /// Creates a new User from creation parameters.
    ///
    /// # Errors
    /// Rejects blank names and emails without an `@`.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("name must not be empty".to_string()));
        }
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!("invalid email: {}", params.email)));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
        })
    }

    /// Profile edits are not exposed; updates are no-ops.
    fn on_update(&mut self, _patch: ()) -> Result<(), UserError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
