pub mod api;

use std::sync::Arc;

use crate::domain::models::GatewayBox;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get() -> GatewayBox {
        return Arc::new(api::ApiGateway::default());
    }
}
