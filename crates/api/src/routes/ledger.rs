//! Ledger operation routes: deposit, withdraw, transfer.
//!
//! Amounts travel as decimal strings and are parsed exactly at this
//! boundary; everything that is not a positive two-decimal number is an
//! `INVALID_AMOUNT` before the ledger is ever involved.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use crate::middleware::AuthSession;
use crate::response::{failure, ledger_failure, operation_failure, success};
use granary_core::ledger::LedgerError;
use granary_shared::types::{AccountRef, CardNumber, parse_amount};
use rust_decimal::Decimal;

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/deposit", post(deposit))
        .route("/ledger/withdraw", post(withdraw))
        .route("/ledger/transfer", post(transfer))
}

/// Request body for deposit and withdrawal.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount as a decimal string, e.g. `"50.00"`.
    pub amount: String,
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Receiver's 16-digit card number.
    pub card_number: String,
    /// Amount as a decimal string.
    pub amount: String,
}

fn parse_request_amount(raw: &str) -> Result<Decimal, LedgerError> {
    parse_amount(raw).map_err(LedgerError::InvalidAmount)
}

/// POST /ledger/deposit - Pay grain into the caller's account.
async fn deposit(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let amount = match parse_request_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(e) => return ledger_failure(&e),
    };

    let reference = AccountRef::ByOwner(session.owner().to_string());
    match state.ledger.deposit(&reference, amount) {
        Ok(account) => success(StatusCode::OK, account),
        Err(e) => operation_failure(&e),
    }
}

/// POST /ledger/withdraw - Take grain out of the caller's account.
async fn withdraw(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let amount = match parse_request_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(e) => return ledger_failure(&e),
    };

    let reference = AccountRef::ByOwner(session.owner().to_string());
    match state.ledger.withdraw(&reference, amount) {
        Ok(account) => success(StatusCode::OK, account),
        Err(e) => operation_failure(&e),
    }
}

/// POST /ledger/transfer - Pay another pigeon by card number.
///
/// Returns the updated sender account; the receiver is updated as a side
/// effect.
async fn transfer(
    State(state): State<AppState>,
    session: AuthSession,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    let amount = match parse_request_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(e) => return ledger_failure(&e),
    };

    let Ok(card_number) = payload.card_number.trim().parse::<CardNumber>() else {
        return failure(
            StatusCode::BAD_REQUEST,
            "INVALID_CARD_NUMBER",
            "Card number must be exactly 16 digits",
        );
    };

    let reference = AccountRef::ByOwner(session.owner().to_string());
    match state.ledger.transfer(&reference, &card_number, amount) {
        Ok(account) => {
            info!(owner = session.owner(), receiver_card = %card_number, "transfer completed");
            success(StatusCode::OK, account)
        }
        Err(e) => operation_failure(&e),
    }
}
