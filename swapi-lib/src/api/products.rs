//! Products and serviced products.

use std::fmt::Display;

use reqwest::Method;
use serde_json::Value;

use super::Resource;
use super::resource::resource_handle;
use crate::error::Error;
use crate::query::Query;

/// `GET {path}/{id}/pdf?template_id=...`
async fn generate_pdf(resource: &Resource<'_>, id: impl Display, template_id: u32) -> Result<Value, Error> {
    let query = Query::new().param("template_id", template_id);
    resource.item_action(Method::GET, id, "pdf", &query).await
}

resource_handle!(
    /// Products (`/api/products`).
    Products
);

impl<'a> Products<'a> {
    /// Product attribute definitions (`/api/product_attributes`).
    pub fn attributes(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/product_attributes")
    }

    /// Product categories (`/api/product_categories`).
    pub fn categories(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/product_categories")
    }

    /// Product templates (`/api/product_templates`).
    pub fn templates(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/product_templates")
    }

    /// Renders a product card with the given template (0 for the default one)
    /// through `GET {path}/{id}/pdf`.
    ///
    /// The generic `POST .../generate/pdf` stays reachable through
    /// [`resource()`](Self::resource).
    pub async fn generate_pdf(&self, product_id: impl Display, template_id: u32) -> Result<Value, Error> {
        generate_pdf(self, product_id, template_id).await
    }
}

resource_handle!(
    /// Products installed at customers (`/api/serviced_products`).
    ServicedProducts
);

impl<'a> ServicedProducts<'a> {
    /// Serviced product attribute definitions (`/api/serviced_product_attributes`).
    pub fn attributes(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/serviced_product_attributes")
    }

    /// Renders a serviced product card with the given template (0 for the default one)
    /// through `GET {path}/{id}/pdf`.
    ///
    /// The generic `POST .../generate/pdf` stays reachable through
    /// [`resource()`](Self::resource).
    pub async fn generate_pdf(&self, product_id: impl Display, template_id: u32) -> Result<Value, Error> {
        generate_pdf(self, product_id, template_id).await
    }
}
