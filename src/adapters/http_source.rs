use crate::domain::model::{LiveDataset, ReferenceDataset};
use crate::domain::ports::{ConfigProvider, TurnoutSource};
use crate::utils::error::{DatasetKind, LookupError, Result};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Fetches the turnout datasets over HTTP.
///
/// Every request carries a no-store cache directive so intermediaries
/// never serve stale turnout numbers.
pub struct HttpTurnoutSource<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpTurnoutSource<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str, dataset: DatasetKind) -> Result<T> {
        tracing::debug!(%url, %dataset, "fetching dataset");
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, %dataset, "dataset response");
        if !status.is_success() {
            return Err(LookupError::Retrieval { dataset, status });
        }

        // Read as text and parse separately so transport errors and
        // malformed payloads stay distinct in the error taxonomy.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl<C: ConfigProvider> TurnoutSource for HttpTurnoutSource<C> {
    async fn fetch_live(&self) -> Result<LiveDataset> {
        self.fetch_json(self.config.live_endpoint(), DatasetKind::Live)
            .await
    }

    async fn fetch_reference(&self) -> Result<ReferenceDataset> {
        self.fetch_json(self.config.reference_endpoint(), DatasetKind::Reference)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        live: String,
        reference: String,
    }

    impl ConfigProvider for MockConfig {
        fn live_endpoint(&self) -> &str {
            &self.live
        }

        fn reference_endpoint(&self) -> &str {
            &self.reference
        }
    }

    fn source_for(server: &MockServer) -> HttpTurnoutSource<MockConfig> {
        HttpTurnoutSource::new(MockConfig {
            live: server.url("/data/live_turnout.json"),
            reference: server.url("/data/kv2021_turnout.json"),
        })
    }

    #[tokio::test]
    async fn fetch_live_parses_and_sends_no_store() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/data/live_turnout.json")
                .header("cache-control", "no-store");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "timestamp": "2025-11-18T14:02:00Z",
                    "kommuner": {"101": {"navn": "København", "stemmeprocent": 55.2}}
                }));
        });

        let source = source_for(&server);
        let dataset = source.fetch_live().await.unwrap();

        mock.assert();
        assert_eq!(dataset.kommuner.len(), 1);
        assert_eq!(dataset.kommuner[0].kode, "101");
    }

    #[tokio::test]
    async fn non_success_status_is_a_retrieval_error_naming_the_dataset() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/live_turnout.json");
            then.status(500);
        });

        let source = source_for(&server);
        let err = source.fetch_live().await.unwrap_err();

        assert!(matches!(
            err,
            LookupError::Retrieval {
                dataset: DatasetKind::Live,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn reference_fetch_failure_names_reference() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/kv2021_turnout.json");
            then.status(404);
        });

        let source = source_for(&server);
        let err = source.fetch_reference().await.unwrap_err();

        assert!(matches!(
            err,
            LookupError::Retrieval {
                dataset: DatasetKind::Reference,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/live_turnout.json");
            then.status(200).body("not json at all");
        });

        let source = source_for(&server);
        let err = source.fetch_live().await.unwrap_err();

        assert!(matches!(err, LookupError::Serialization(_)));
    }
}
