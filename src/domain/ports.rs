use crate::domain::model::{LiveDataset, ReferenceDataset};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the two turnout datasets come from.
#[async_trait]
pub trait TurnoutSource: Send + Sync {
    async fn fetch_live(&self) -> Result<LiveDataset>;
    async fn fetch_reference(&self) -> Result<ReferenceDataset>;
}

pub trait ConfigProvider: Send + Sync {
    fn live_endpoint(&self) -> &str;
    fn reference_endpoint(&self) -> &str;
}
