//! HTTP client for the Aptos faucet service.
//!
//! The faucet exposes `POST /fund` taking `{ "address": "0x...", "amount": <octas> }`
//! and answers with a JSON document (typically `{ "txn_hashes": [...] }`). The
//! response is relayed to the caller untouched.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use crate::chain::types::Address;

/// Errors that can occur while talking to the faucet.
#[derive(Debug, thiserror::Error)]
pub enum FaucetError {
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP error: {context}: {source}")]
    Http {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Faucet rejected request with status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Serialize)]
struct FundRequest<'a> {
    address: &'a Address,
    amount: u64,
}

#[derive(Debug, Clone)]
pub struct FaucetClient {
    base_url: Url,
    fund_url: Url,
    client: Client,
}

impl FaucetClient {
    /// Constructs a client for the faucet at `base_url`; `./fund` is resolved relative to it.
    pub fn try_new(base_url: Url) -> Result<Self, FaucetError> {
        let mut normalized = base_url.to_string().trim_end_matches('/').to_string();
        normalized.push('/');
        let base_url = Url::parse(&normalized).map_err(|e| FaucetError::UrlParse {
            context: "Failed to normalize faucet base url",
            source: e,
        })?;
        let fund_url = base_url.join("./fund").map_err(|e| FaucetError::UrlParse {
            context: "Failed to construct ./fund URL",
            source: e,
        })?;
        Ok(Self {
            base_url,
            fund_url,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn fund_url(&self) -> &Url {
        &self.fund_url
    }

    /// Asks the faucet to credit `amount` octas to `address`.
    #[tracing::instrument(name = "faucet.fund", skip(self, address), fields(address = %address), err)]
    pub async fn fund(
        &self,
        address: &Address,
        amount: u64,
    ) -> Result<serde_json::Value, FaucetError> {
        let context = "POST /fund";
        let http_response = self
            .client
            .post(self.fund_url.clone())
            .json(&FundRequest { address, amount })
            .send()
            .await
            .map_err(|e| FaucetError::Http { context, source: e })?;

        let status = http_response.status();
        if status.is_success() {
            http_response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| FaucetError::JsonDeserialization { context, source: e })
        } else {
            let body = http_response
                .text()
                .await
                .map_err(|e| FaucetError::ResponseBodyRead { context, source: e })?;
            Err(FaucetError::HttpStatus { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn address() -> Address {
        "0xcafe".parse().unwrap()
    }

    #[test]
    fn fund_url_is_relative_to_base() {
        let client = FaucetClient::try_new("https://faucet.devnet.aptoslabs.com".parse().unwrap())
            .unwrap();
        assert_eq!(
            client.fund_url().as_str(),
            "https://faucet.devnet.aptoslabs.com/fund"
        );
        let client = FaucetClient::try_new("http://localhost:8081/faucet/".parse().unwrap())
            .unwrap();
        assert_eq!(client.fund_url().as_str(), "http://localhost:8081/faucet/fund");
    }

    #[tokio::test]
    async fn fund_posts_address_and_amount_and_relays_response() {
        let mock_server = MockServer::start().await;
        let faucet_response = json!({ "txn_hashes": ["0xabc"] });

        Mock::given(method("POST"))
            .and(path("/fund"))
            .and(body_json(json!({
                "address": address().to_string(),
                "amount": 100_000_000u64,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&faucet_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FaucetClient::try_new(mock_server.uri().parse().unwrap()).unwrap();
        let response = client.fund(&address(), 100_000_000).await.unwrap();
        assert_eq!(response, faucet_response);
    }

    #[tokio::test]
    async fn fund_surfaces_rejection_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fund"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Account is rate limited"))
            .mount(&mock_server)
            .await;

        let client = FaucetClient::try_new(mock_server.uri().parse().unwrap()).unwrap();
        let err = client.fund(&address(), 1).await.unwrap_err();
        match err {
            FaucetError::HttpStatus { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "Account is rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
