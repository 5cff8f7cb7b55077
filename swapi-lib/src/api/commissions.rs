//! Commissions (service orders) and their dictionaries.

use super::Resource;
use super::resource::resource_handle;

resource_handle!(
    /// Commissions (`/api/commissions`).
    Commissions
);

impl<'a> Commissions<'a> {
    /// Commission attribute definitions (`/api/commission_attributes`).
    pub fn attributes(&self) -> CommissionAttributes<'a> {
        CommissionAttributes::new(self.client(), "/api/commission_attributes")
    }

    /// Workflow phases (`/api/commission_phases`).
    pub fn phases(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/commission_phases")
    }

    /// Scope types (`/api/commission_scope_types`).
    pub fn scope_types(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/commission_scope_types")
    }

    /// Saved shortcuts (`/api/commission_shortcuts`).
    pub fn shortcuts(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/commission_shortcuts")
    }

    /// Users assigned to commissions (`/api/commission_users`).
    pub fn users(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/commission_users")
    }
}

resource_handle!(
    /// Commission attribute definitions (`/api/commission_attributes`).
    CommissionAttributes
);

impl<'a> CommissionAttributes<'a> {
    /// Attribute criteria (`/api/commission_attribute_criterias`).
    pub fn criterias(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/commission_attribute_criterias")
    }

    /// Attribute relations (`/api/commission_attribute_relations`).
    pub fn relations(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/commission_attribute_relations")
    }
}
