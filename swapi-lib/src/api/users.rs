//! Internal users.

use std::fmt::Display;

use super::Resource;
use super::resource::resource_handle;

resource_handle!(
    /// Internal users (`/api/user_users`).
    Users
);

impl<'a> Users<'a> {
    /// User attribute definitions (`/api/user_attributes`).
    pub fn attributes(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/user_attributes")
    }

    /// Change history of one user (`/api/user_users/{id}/histories`).
    pub fn histories(&self, user_id: impl Display) -> Resource<'a> {
        self.nested(user_id, "histories")
    }
}
