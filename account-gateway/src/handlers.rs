//! HTTP endpoints of the account gateway.
//!
//! Every endpoint is a `POST` with a JSON body and replies with either the
//! upstream JSON (faucet response, committed transaction) or `{ "error": ... }`.
//! Field names follow the browser client: `privateKey`, `recipientAddress`,
//! `tokenId`. Numeric fields accept a JSON number or a decimal string.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use playground_aptos::chain::{AccountCredential, Address, AptosPrivateKey};
use playground_types::error::{ApiError, require, require_str};
use playground_types::extract::ApiJson;
use serde::Deserialize;
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::gateway::AccountGateway;

pub fn routes() -> Router<Arc<AccountGateway>> {
    Router::new()
        .route("/generate-account", post(post_generate_account))
        .route("/fund-account", post(post_fund_account))
        .route("/init-module", post(post_init_module))
        .route("/hello", post(post_hello))
        .route("/mint-nft", post(post_mint_nft))
        .route("/mint-token", post(post_mint_token))
        .route("/transfer-token", post(post_transfer_token))
        .route("/transfer-nft", post(post_transfer_nft))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundAccountRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
}

/// Body shared by every transaction endpoint; each reads the fields it needs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub recipient_address: Option<String>,
    #[serde(default)]
    pub token_id: Option<Amount>,
}

/// A `u64` sent either as a JSON number or as a decimal string.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Amount(#[serde_as(as = "PickFirst<(_, DisplayFromStr)>")] pub u64);

impl TransactionRequest {
    fn private_key(&self) -> Result<AptosPrivateKey, ApiError> {
        parse_field(self.private_key.clone(), "privateKey")
    }

    fn recipient(&self) -> Result<Address, ApiError> {
        parse_field(self.recipient_address.clone(), "recipientAddress")
    }
}

/// Presence is checked here; a value that fails to parse is reported like any
/// other SDK failure.
fn parse_field<T>(value: Option<String>, name: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    require_str(value, name)?
        .parse()
        .map_err(|e| ApiError::Upstream(e.to_string()))
}

/// `POST /generate-account`: a fresh `{ address, privateKey }`. The body is ignored.
#[instrument(skip_all)]
pub async fn post_generate_account(
    State(gateway): State<Arc<AccountGateway>>,
) -> Result<Json<AccountCredential>, ApiError> {
    Ok(Json(gateway.generate_account()?))
}

/// `POST /fund-account`: relays the faucet's response.
#[instrument(skip_all)]
pub async fn post_fund_account(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<FundAccountRequest>,
) -> Result<Json<Value>, ApiError> {
    let address: Address = parse_field(body.address, "address")?;
    let amount = require(body.amount, "amount")?.0;
    Ok(Json(gateway.fund_account(&address, amount).await?))
}

#[instrument(skip_all)]
pub async fn post_init_module(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let private_key = body.private_key()?;
    Ok(Json(gateway.init_module(&private_key).await?))
}

#[instrument(skip_all)]
pub async fn post_hello(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let private_key = body.private_key()?;
    Ok(Json(gateway.hello(&private_key).await?))
}

#[instrument(skip_all)]
pub async fn post_mint_nft(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let private_key = body.private_key()?;
    let uri = require_str(body.uri, "uri")?;
    Ok(Json(gateway.mint_nft(&private_key, uri).await?))
}

#[instrument(skip_all)]
pub async fn post_mint_token(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let private_key = body.private_key()?;
    let amount = require(body.amount, "amount")?.0;
    Ok(Json(gateway.mint_token(&private_key, amount).await?))
}

#[instrument(skip_all)]
pub async fn post_transfer_token(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let private_key = body.private_key()?;
    let recipient = body.recipient()?;
    let amount = require(body.amount, "amount")?.0;
    Ok(Json(
        gateway
            .transfer_token(&private_key, recipient, amount)
            .await?,
    ))
}

#[instrument(skip_all)]
pub async fn post_transfer_nft(
    State(gateway): State<Arc<AccountGateway>>,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let private_key = body.private_key()?;
    let recipient = body.recipient()?;
    let token_id = require(body.token_id, "tokenId")?.0;
    Ok(Json(
        gateway
            .transfer_nft(&private_key, recipient, token_id)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::{Recorded, StubProvider, gateway, module_address};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use playground_aptos::chain::{AptosAccount, EntryArgument};
    use playground_types::error::ErrorResponse;
    use serde_json::json;
    use tower::ServiceExt;

    fn app(provider: Arc<StubProvider>) -> Router {
        routes().with_state(Arc::new(gateway(provider)))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, body.to_string()).await
    }

    async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn function_id(name: &str) -> String {
        format!("{}::main::{}", module_address(), name)
    }

    #[tokio::test]
    async fn generate_account_returns_credentials() {
        let (status, body) = post_json(
            app(Arc::new(StubProvider::default())),
            "/generate-account",
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let credential: AccountCredential = serde_json::from_value(body.clone()).unwrap();
        assert!(body["address"].as_str().unwrap().starts_with("0x"));
        assert!(body["privateKey"].as_str().unwrap().starts_with("0x"));
        assert_eq!(
            AptosAccount::from_private_key(&credential.private_key)
                .unwrap()
                .address(),
            credential.address
        );
    }

    #[tokio::test]
    async fn fund_account_relays_faucet_json() {
        let provider = Arc::new(StubProvider::default());
        let (status, body) = post_json(
            app(provider.clone()),
            "/fund-account",
            json!({ "address": "0x2", "amount": "100000000" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "txn_hashes": ["0xabc"] }));
        assert_eq!(
            provider.calls(),
            [Recorded::Fund {
                address: "0x2".parse().unwrap(),
                amount: 100_000_000
            }]
        );
    }

    #[tokio::test]
    async fn transaction_endpoints_call_documented_functions() {
        let sender = AptosAccount::generate().unwrap();
        let key = sender.credential().private_key.to_hex();
        let recipient: Address = "0x2".parse().unwrap();

        let cases = [
            ("/init-module", json!({ "privateKey": key }), "init", vec![]),
            ("/hello", json!({ "privateKey": key }), "hello", vec![]),
            (
                "/mint-nft",
                json!({ "privateKey": key, "uri": "ipfs://nft" }),
                "mint_nft",
                vec![EntryArgument::String("ipfs://nft".to_string())],
            ),
            (
                "/mint-token",
                json!({ "privateKey": key, "amount": 500 }),
                "mint_token",
                vec![EntryArgument::U64(500)],
            ),
            (
                "/transfer-token",
                json!({ "privateKey": key, "recipientAddress": "0x2", "amount": "25" }),
                "transfer_token",
                vec![EntryArgument::Address(recipient), EntryArgument::U64(25)],
            ),
            (
                "/transfer-nft",
                json!({ "privateKey": key, "recipientAddress": "0x2", "tokenId": 3 }),
                "transfer_nft",
                vec![EntryArgument::Address(recipient), EntryArgument::U64(3)],
            ),
        ];

        for (uri, body, function, args) in cases {
            let provider = Arc::new(StubProvider::default());
            let (status, response) = post_json(app(provider.clone()), uri, body).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(response["hash"], "0xfeed", "{uri}");
            assert_eq!(
                provider.calls(),
                [Recorded::Submit {
                    sender: sender.address(),
                    function_id: function_id(function),
                    args,
                }],
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_the_provider() {
        let key = AptosAccount::generate().unwrap().credential().private_key.to_hex();
        let cases = [
            ("/hello", json!({}), "Missing required field: privateKey"),
            ("/mint-nft", json!({ "privateKey": key }), "Missing required field: uri"),
            ("/mint-token", json!({ "privateKey": key }), "Missing required field: amount"),
            (
                "/transfer-token",
                json!({ "privateKey": key, "amount": 1 }),
                "Missing required field: recipientAddress",
            ),
            (
                "/transfer-nft",
                json!({ "privateKey": key, "recipientAddress": "0x2" }),
                "Missing required field: tokenId",
            ),
            ("/fund-account", json!({ "amount": 1 }), "Missing required field: address"),
        ];

        for (uri, body, message) in cases {
            let provider = Arc::new(StubProvider::default());
            let (status, response) = post_json(app(provider.clone()), uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let error: ErrorResponse = serde_json::from_value(response).unwrap();
            assert_eq!(error.error, message);
            assert!(provider.calls().is_empty(), "{uri}");
        }
    }

    #[tokio::test]
    async fn unparseable_key_is_upstream_and_malformed_body_is_400() {
        let provider = Arc::new(StubProvider::default());
        let (status, response) = post_json(
            app(provider.clone()),
            "/hello",
            json!({ "privateKey": "not-a-key" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response["error"].as_str().unwrap().is_empty());
        assert!(provider.calls().is_empty());

        let (status, response) = post_raw(
            app(Arc::new(StubProvider::default())),
            "/mint-token",
            "{\"privateKey\":".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].is_string());

        let (status, _) = post_json(
            app(Arc::new(StubProvider::default())),
            "/mint-token",
            json!({ "privateKey": "0x01", "amount": "lots" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unparseable_fund_address_is_upstream() {
        let provider = Arc::new(StubProvider::default());
        let (status, response) = post_json(
            app(provider.clone()),
            "/fund-account",
            json!({ "address": "nope", "amount": 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response["error"].is_string());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_failures_are_500_with_message() {
        let key = AptosAccount::generate().unwrap().credential().private_key.to_hex();
        let provider = Arc::new(StubProvider::failing("Account not found by Address"));
        let (status, response) =
            post_json(app(provider), "/hello", json!({ "privateKey": key })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, json!({ "error": "Account not found by Address" }));
    }
}
