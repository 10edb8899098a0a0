use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    client::MetricsClient,
    config::CassandraConfig,
    error::{CassandraError, Result},
};

const VALUES_OPERATION: &str = "values";

#[derive(Debug, Serialize)]
struct ExecRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    mbean: &'a str,
    operation: &'static str,
}

#[derive(Debug, Deserialize)]
struct ExecResponse {
    status: u16,
    #[serde(default)]
    value: Option<Vec<f64>>,
    #[serde(default)]
    error: Option<String>,
}

impl ExecResponse {
    fn into_values(self, mbean: &str) -> Result<Vec<f64>> {
        match (self.status, self.value) {
            (200, Some(values)) => Ok(values),
            (status, _) => Err(CassandraError::Jolokia {
                mbean: mbean.to_owned(),
                status,
                error: self
                    .error
                    .unwrap_or_else(|| "response carries no values".to_owned()),
            }),
        }
    }
}

/// Reads histograms through a node's Jolokia agent.
#[derive(Debug, Clone)]
pub struct JolokiaClient {
    http: reqwest::Client,
    url: String,
}

impl JolokiaClient {
    pub fn new(config: &CassandraConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            url: config.url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MetricsClient for JolokiaClient {
    async fn histogram_values(&self, mbean: &str) -> Result<Vec<f64>> {
        let request = ExecRequest {
            kind: "exec",
            mbean,
            operation: VALUES_OPERATION,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ExecResponse>()
            .await?;

        response.into_values(mbean)
    }
}
