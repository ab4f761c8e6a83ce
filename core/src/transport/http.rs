use super::{Backend, HttpReply};
use crate::config::ClientConfig;
use crate::domain::{Chart, PredictionRequest};
use crate::prelude::{ClientError, ClientResult};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

/// [`Backend`] over HTTP, talking to the prediction service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read(response: reqwest::Response) -> ClientResult<HttpReply> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!("received {} bytes with status {}", body.len(), status);
        Ok(HttpReply::new(status, body.to_vec()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn predict(&self, request: &PredictionRequest) -> ClientResult<HttpReply> {
        let response = self
            .client
            .post(self.endpoint("predict"))
            .json(request)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn chart(&self, chart: Chart) -> ClientResult<HttpReply> {
        let response = self
            .client
            .get(self.endpoint("generate_graph"))
            .query(&[("plot_type", chart.title())])
            .send()
            .await?;
        Self::read(response).await
    }

    async fn health(&self) -> ClientResult<HttpReply> {
        let response = self.client.get(self.endpoint("")).send().await?;
        Self::read(response).await
    }
}
