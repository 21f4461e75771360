use reqwest::Method;
use shared::{
    domain::{Home, HomeId},
    protocol::{CreateHomeRequest, DataEnvelope},
};
use tracing::info;

use crate::{
    error::ClientResult,
    transport::{IdentityMode, ServiceClient},
};

#[derive(Clone)]
pub struct HomesClient {
    service: ServiceClient,
}

impl HomesClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    pub async fn list_homes(&self) -> ClientResult<Vec<Home>> {
        let request = self
            .service
            .request(Method::GET, "/homes", IdentityMode::Omit);
        self.service
            .send_json::<DataEnvelope<Vec<Home>>>(request, "Failed to fetch homes")
            .await
            .map(DataEnvelope::into_inner)
    }

    pub async fn create_home(&self, name: &str) -> ClientResult<Home> {
        let request = self
            .service
            .request(Method::POST, "/homes", IdentityMode::Attach)
            .json(&CreateHomeRequest {
                name: name.to_string(),
            });
        let home = self
            .service
            .send_json::<DataEnvelope<Home>>(request, "Failed to create home")
            .await?
            .into_inner();
        info!(home_id = %home.id, "home created");
        Ok(home)
    }

    pub async fn delete_home(&self, id: HomeId) -> ClientResult<()> {
        let request = self.service.request(
            Method::DELETE,
            &format!("/homes/{id}"),
            IdentityMode::Attach,
        );
        self.service
            .send_empty(request, "Failed to delete home")
            .await?;
        info!(home_id = %id, "home deleted");
        Ok(())
    }
}
