//! Blocking HTTP consumer for the event-stream endpoints.

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::DecoderOptions;
use crate::event::{MazeEvent, TspEvent};
use crate::request::{MazeRequest, TspRequest};
use crate::stream::EventReader;
use crate::traits::SearchEvent;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout, body included. Paced runs need headroom.
    pub timeout_secs: u64,
    /// Read size used when pulling the response body.
    pub chunk_size: usize,
    pub decoder: DecoderOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 60,
            chunk_size: 4 * 1024,
            decoder: DecoderOptions::default(),
        }
    }
}

/// Failure to obtain an event stream. All variants are connectivity errors
/// from the consumer's point of view; none are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach search server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    config: ClientConfig,
    client: reqwest::blocking::Client,
}

impl SearchClient {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Starts a maze run and returns its events as they arrive.
    pub fn stream_maze(
        &self,
        request: &MazeRequest,
    ) -> Result<EventReader<reqwest::blocking::Response, MazeEvent>, ClientError> {
        self.stream("maze", request)
    }

    /// Starts a TSP run and returns its events as they arrive.
    pub fn stream_tsp(
        &self,
        request: &TspRequest,
    ) -> Result<EventReader<reqwest::blocking::Response, TspEvent>, ClientError> {
        self.stream("tsp", request)
    }

    fn stream<B, E>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<EventReader<reqwest::blocking::Response, E>, ClientError>
    where
        B: Serialize,
        E: SearchEvent,
    {
        let url = format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        );
        debug!(%url, "requesting event stream");

        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "<no body>".to_string());
            return Err(ClientError::Status { status, body });
        }

        Ok(EventReader::with_options(
            response,
            self.config.chunk_size,
            self.config.decoder,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.chunk_size > 0);
        assert_eq!(config.decoder.max_line_bytes, 1024 * 1024);
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        let client = SearchClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ClientConfig::default()
        })
        .unwrap();
        let request = TspRequest {
            cities: vec![crate::tsp::City::new(0, 0.0, 0.0)],
        };
        let err = client.stream_tsp(&request).err().unwrap();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
