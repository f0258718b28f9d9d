//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{CreateRecordRequest, ErrorResponse, HealthResponse};
use common::ServiceError;
use envelope::{EnvelopeError, Record};
use tracing::{debug, error, info, warn};

use super::state::AppState;

/// `POST /records` — encrypt a payload and store the resulting record.
///
/// Responds `201 Created` with the record. Missing or empty `partyId`, a
/// missing `payload`, or a payload that is not a JSON object yield `400`.
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(&ServiceError::BadRequest(rejection.body_text())),
    };

    let party_id = match req.party_id.filter(|p| !p.is_empty()) {
        Some(p) => p,
        None => return error_response(&ServiceError::BadRequest("partyId is required".into())),
    };
    let payload = match req.payload {
        Some(p) => p,
        None => return error_response(&ServiceError::BadRequest("payload is required".into())),
    };

    let record = match state
        .codec
        .encrypt(&party_id, &payload, state.master_key.as_bytes())
    {
        Ok(r) => r,
        Err(e) => return error_response(&classify(e)),
    };

    info!(record_id = %record.id, "record created");
    state.store.put(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

/// `GET /records/:id` — return a stored record unchanged.
pub async fn get_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => error_response(&record_not_found(&id)),
    }
}

/// `POST /records/:id/decrypt` — decrypt a stored record.
pub async fn decrypt_stored(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(record) = state.store.get(&id) else {
        return error_response(&record_not_found(&id));
    };
    open(&state, &record)
}

/// `POST /decrypt` — decrypt a record supplied in the request body.
///
/// The record is untrusted input; it passes the same validation gate as a
/// stored record before any key is used.
pub async fn decrypt_record(
    State(state): State<AppState>,
    body: Result<Json<Record>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(record)) => open(&state, &record),
        Err(rejection) => error_response(&ServiceError::BadRequest(rejection.body_text())),
    }
}

/// `GET /health` — liveness check.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        records: state.store.len(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(state: &AppState, record: &Record) -> Response {
    match state.codec.decrypt(record, state.master_key.as_bytes()) {
        Ok(opened) => {
            info!(record_id = %opened.id, "record decrypted");
            (StatusCode::OK, Json(opened)).into_response()
        }
        Err(e) => error_response(&classify(e)),
    }
}

fn record_not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("record {id}"))
}

/// Map a codec failure onto the public error taxonomy.
///
/// Both authentication layers collapse into [`ServiceError::DecryptionFailed`];
/// the distinguishing kind is only logged.
fn classify(err: EnvelopeError) -> ServiceError {
    match err {
        EnvelopeError::InvalidInput(_)
        | EnvelopeError::MalformedRecord { .. }
        | EnvelopeError::UnsupportedAlgorithm(_)
        | EnvelopeError::UnsupportedKeyVersion(_) => {
            debug!(kind = err.kind(), "rejected envelope input");
            ServiceError::BadRequest(err.to_string())
        }
        EnvelopeError::DekUnwrapFailure | EnvelopeError::PayloadDecryptFailure => {
            warn!(kind = err.kind(), "record failed authentication");
            ServiceError::DecryptionFailed
        }
        EnvelopeError::InvalidKeyLength(_) | EnvelopeError::InternalInconsistency(_) => {
            error!(kind = err.kind(), error = %err, "envelope operation failed");
            ServiceError::Internal("envelope operation failed".into())
        }
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}
