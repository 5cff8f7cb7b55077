//! Places (service locations).

use super::Resource;
use super::resource::resource_handle;

resource_handle!(
    /// Places (`/api/places`).
    Places
);

impl<'a> Places<'a> {
    /// Place attribute definitions (`/api/place_attributes`).
    pub fn attributes(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/place_attributes")
    }
}
