use crate::{
    api::{
        error::ApiError,
        response::{created, ApiResponse},
    },
    models::{AccountBalance, AccountNetwork, BlockHeader, DataSource, NetworkIdentity, Transaction},
    state::AppState,
    validation::{validate_required, ValidationError},
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

// Network identity carried in the query string of every read endpoint
#[derive(Deserialize)]
pub struct NetworkQuery {
    family: String,
    chain_id: String,
    network: String,
}

impl NetworkQuery {
    fn into_identity(self) -> Result<NetworkIdentity, ValidationError> {
        NetworkIdentity::new(self.family.parse()?, self.chain_id, self.network)
    }
}

// GET /balances/latest query parameters
#[derive(Deserialize)]
pub struct BalanceQuery {
    account: String,
    asset: String,
}

// POST /transactions body
#[derive(Deserialize)]
pub struct TransactionBody {
    transaction: Transaction,
    data_source: DataSource,
}

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts).post(add_account).put(replace_accounts))
        .route("/blocks", post(add_block))
        .route("/blocks/latest", get(latest_block))
        .route("/blocks/{hash}", get(get_block))
        .route("/transactions", post(add_or_update_transaction))
        .route("/transactions/{hash}", get(get_transaction))
        .route("/balances", post(record_balance))
        .route("/balances/latest", get(latest_balance))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// GET /accounts handler
async fn list_accounts(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let accounts = state.store.list_accounts().await?;
    Ok(ApiResponse::new(accounts).into_response())
}

// POST /accounts handler
async fn add_account(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<AccountNetwork>,
) -> Result<Response, ApiError> {
    state.store.add_account(&entry).await?;
    info!("Tracking {} on {}", entry.account, entry.network);
    Ok(created(entry))
}

// PUT /accounts handler
async fn replace_accounts(
    State(state): State<Arc<AppState>>,
    Json(entries): Json<Vec<AccountNetwork>>,
) -> Result<Response, ApiError> {
    state.store.replace_accounts(&entries).await?;
    Ok(ApiResponse::new(entries).into_response())
}

// POST /blocks handler
async fn add_block(
    State(state): State<Arc<AppState>>,
    Json(header): Json<BlockHeader>,
) -> Result<Response, ApiError> {
    state.store.add_block(&header).await?;
    Ok(created(header))
}

// GET /blocks/latest handler
async fn latest_block(
    State(state): State<Arc<AppState>>,
    Query(network): Query<NetworkQuery>,
) -> Result<Response, ApiError> {
    let network = network.into_identity()?;

    match state.store.get_latest_block(&network).await? {
        Some(header) => Ok(ApiResponse::new(header).into_response()),
        None => Err(ApiError::NotFound(format!("No recent block for {}", network.name))),
    }
}

// GET /blocks/{hash} handler
async fn get_block(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
    Query(network): Query<NetworkQuery>,
) -> Result<Response, ApiError> {
    let network = network.into_identity()?;

    match state.store.get_block(&network, &hash).await? {
        Some(header) => Ok(ApiResponse::new(header).into_response()),
        None => Err(ApiError::NotFound(format!("Block {} on {}", hash, network.name))),
    }
}

// POST /transactions handler
async fn add_or_update_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TransactionBody>,
) -> Result<Response, ApiError> {
    let outcome = state
        .store
        .add_or_update_transaction(&body.transaction, body.data_source)
        .await?;

    Ok(ApiResponse::new(json!({
        "hash": body.transaction.hash,
        "outcome": outcome,
    }))
    .into_response())
}

// GET /transactions/{hash} handler
async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
    Query(network): Query<NetworkQuery>,
) -> Result<Response, ApiError> {
    let network = network.into_identity()?;

    match state.store.get_transaction(&network, &hash).await? {
        Some(record) => Ok(ApiResponse::new(record).into_response()),
        None => Err(ApiError::NotFound(format!("Transaction {} on {}", hash, network.name))),
    }
}

// POST /balances handler
async fn record_balance(
    State(state): State<Arc<AppState>>,
    Json(balance): Json<AccountBalance>,
) -> Result<Response, ApiError> {
    let id = state.store.record_balance(&balance).await?;
    Ok(created(json!({ "id": id })))
}

// GET /balances/latest handler
async fn latest_balance(
    State(state): State<Arc<AppState>>,
    Query(network): Query<NetworkQuery>,
    Query(params): Query<BalanceQuery>,
) -> Result<Response, ApiError> {
    let network = network.into_identity()?;
    validate_required("account", &params.account)?;
    validate_required("asset", &params.asset)?;

    match state
        .store
        .get_latest_balance(&params.account, &network, &params.asset)
        .await?
    {
        Some(balance) => Ok(ApiResponse::new(balance).into_response()),
        None => Err(ApiError::NotFound(format!(
            "No fresh {} balance for {} on {}",
            params.asset, params.account, network.name
        ))),
    }
}
