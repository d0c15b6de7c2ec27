// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod background;
mod gates;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use parkd_api::{
    AccessGrant, AccessRequest, ApiError, AuthRequest, AuthResponse, BookRequest, BookResponse,
    BookingHistoryResponse, BookingListResponse, CancelRequest, CancelResponse, DriveUpOutcome,
    EmergencyGrant, EmergencyOpenRequest, ExportQuery, GateStatusResponse, OccupancyReport,
    PayRequest, PayResponse, PeakHoursResponse, RevenueResponse, SensorBatchRequest,
    SensorBatchResponse, SlotListResponse, SlotStatusUpdateRequest, SlotStatusUpdateResponse,
    SlotUtilizationResponse, UserStatsResponse,
};
use parkd_core::GateSnapshot;
use parkd_domain::{LotStatus, now_utc};
use parkd_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::gates::SharedGates;

/// How long any single store operation may take before the request is
/// rejected as unavailable.
const OP_TIMEOUT: Duration = Duration::from_secs(5);

/// parkd server - HTTP backend for the smart parking facility
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer. One lock serializes all store access.
    persistence: Arc<Mutex<Persistence>>,
    /// The transient gate bank.
    gates: SharedGates,
    /// The cached advisory lot status, refreshed by the monitor loop.
    lot_status: Arc<Mutex<LotStatus>>,
}

impl AppState {
    fn new(mut persistence: Persistence) -> Self {
        // Seed the cache from the store so a full lot is reported as
        // full before the first monitor tick.
        let initial: LotStatus = persistence.free_slot_count().map_or_else(
            |err| {
                error!(error = %err, "failed to read free slot count at startup");
                LotStatus::Available
            },
            |free| LotStatus::from_free_count(usize::try_from(free).unwrap_or(0)),
        );
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            gates: SharedGates::new(),
            lot_status: Arc::new(Mutex::new(initial)),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: String::from("The facility store is busy. Try again shortly."),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } | ApiError::AccessWindowViolation { .. } => {
                StatusCode::FORBIDDEN
            }
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Runs one operation against the locked store, bounded by
/// [`OP_TIMEOUT`].
async fn with_store<T, F>(state: &AppState, operation: F) -> Result<T, HttpError>
where
    F: FnOnce(&mut Persistence) -> Result<T, ApiError>,
{
    let outcome: Result<T, ApiError> = tokio::time::timeout(OP_TIMEOUT, async {
        let mut store = state.persistence.lock().await;
        operation(&mut store)
    })
    .await
    .map_err(|_| HttpError::unavailable())?;
    outcome.map_err(HttpError::from)
}

/// Health response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok` while the process is serving.
    status: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn auth_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, HttpError> {
    let response: AuthResponse = with_store(&state, move |store| {
        parkd_api::authenticate(store, &request, now_utc())
    })
    .await?;
    Ok(Json(response))
}

async fn list_slots_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<SlotListResponse>, HttpError> {
    let response: SlotListResponse = with_store(&state, parkd_api::list_slots).await?;
    Ok(Json(response))
}

async fn list_bookings_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<BookingListResponse>, HttpError> {
    let response: BookingListResponse = with_store(&state, parkd_api::list_bookings).await?;
    Ok(Json(response))
}

async fn booking_history_handler(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<BookingHistoryResponse>, HttpError> {
    let response: BookingHistoryResponse =
        with_store(&state, move |store| parkd_api::booking_history(store, user_id)).await?;
    Ok(Json(response))
}

async fn book_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<BookRequest>,
) -> Result<Json<BookResponse>, HttpError> {
    let response: BookResponse = with_store(&state, move |store| {
        parkd_api::book_slot(store, &request, now_utc())
    })
    .await?;
    Ok(Json(response))
}

async fn cancel_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CancelRequest>,
) -> Result<Json<CancelResponse>, HttpError> {
    let response: CancelResponse = with_store(&state, move |store| {
        parkd_api::cancel_booking(store, &request, now_utc())
    })
    .await?;
    Ok(Json(response))
}

async fn request_access_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<AccessRequest>,
) -> Result<Json<AccessGrant>, HttpError> {
    let grant: AccessGrant = with_store(&state, move |store| {
        parkd_api::request_access(store, &request, now_utc())
    })
    .await?;
    state.gates.open(grant.gate, grant.open_seconds).await;
    Ok(Json(grant))
}

async fn drive_up_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DriveUpOutcome>, HttpError> {
    let outcome: DriveUpOutcome =
        with_store(&state, |store| parkd_api::drive_up_request(store, now_utc())).await?;
    if let (Some(gate), Some(open_seconds)) = (outcome.gate, outcome.open_seconds) {
        state.gates.open(gate, open_seconds).await;
    }
    Ok(Json(outcome))
}

async fn gate_status_handler(
    AxumState(state): AxumState<AppState>,
) -> Json<GateStatusResponse> {
    let snapshot: GateSnapshot = state.gates.snapshot().await;
    let lot_status: LotStatus = *state.lot_status.lock().await;
    Json(GateStatusResponse {
        entrance: snapshot.entrance,
        exit: snapshot.exit,
        lot_status,
    })
}

async fn emergency_open_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<EmergencyOpenRequest>,
) -> Result<Json<EmergencyGrant>, HttpError> {
    let grant: EmergencyGrant = with_store(&state, move |store| {
        parkd_api::emergency_open(store, &request, now_utc())
    })
    .await?;
    state.gates.open(grant.gate, grant.open_seconds).await;
    Ok(Json(grant))
}

async fn update_slots_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SensorBatchRequest>,
) -> Result<Json<SensorBatchResponse>, HttpError> {
    let response: SensorBatchResponse = with_store(&state, move |store| {
        parkd_api::apply_sensor_batch(store, &request, now_utc())
    })
    .await?;
    Ok(Json(response))
}

async fn update_status_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SlotStatusUpdateRequest>,
) -> Result<Json<SlotStatusUpdateResponse>, HttpError> {
    let response: SlotStatusUpdateResponse = with_store(&state, move |store| {
        parkd_api::update_slot_status(store, &request, now_utc())
    })
    .await?;
    Ok(Json(response))
}

async fn pay_handler(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<PayRequest>,
) -> Result<Json<PayResponse>, HttpError> {
    let response: PayResponse =
        with_store(&state, move |store| parkd_api::pay(store, &request, now_utc())).await?;
    Ok(Json(response))
}

async fn export_handler(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, HttpError> {
    let document: String = with_store(&state, move |store| {
        parkd_api::export_bookings_csv(store, &query)
    })
    .await?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        document,
    )
        .into_response())
}

async fn revenue_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<RevenueResponse>, HttpError> {
    let response: RevenueResponse = with_store(&state, parkd_api::revenue_report).await?;
    Ok(Json(response))
}

async fn occupancy_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<OccupancyReport>, HttpError> {
    let response: OccupancyReport =
        with_store(&state, |store| parkd_api::occupancy_report(store, now_utc())).await?;
    Ok(Json(response))
}

async fn peak_hours_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<PeakHoursResponse>, HttpError> {
    let response: PeakHoursResponse = with_store(&state, parkd_api::peak_hours_report).await?;
    Ok(Json(response))
}

async fn user_stats_handler(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserStatsResponse>, HttpError> {
    let response: UserStatsResponse =
        with_store(&state, move |store| parkd_api::user_stats(store, user_id)).await?;
    Ok(Json(response))
}

async fn slot_utilization_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<SlotUtilizationResponse>, HttpError> {
    let response: SlotUtilizationResponse =
        with_store(&state, parkd_api::slot_utilization).await?;
    Ok(Json(response))
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/auth", post(auth_handler))
        .route("/api/slots", get(list_slots_handler))
        .route("/api/bookings", get(list_bookings_handler))
        .route(
            "/api/users/{user_id}/booking-history",
            get(booking_history_handler),
        )
        .route("/api/book", post(book_handler))
        .route("/api/cancel", post(cancel_handler))
        .route("/api/requestAccess", post(request_access_handler))
        .route("/api/driveUpRequest", post(drive_up_handler))
        .route("/api/gate/status", get(gate_status_handler))
        .route("/api/gate/emergency-open", post(emergency_open_handler))
        .route("/api/updateSlots", post(update_slots_handler))
        .route("/api/slots/updateStatus", post(update_status_handler))
        .route("/api/payments/pay", post(pay_handler))
        .route("/api/export/bookings", get(export_handler))
        .route("/api/analytics/revenue", get(revenue_handler))
        .route("/api/analytics/occupancy", get(occupancy_handler))
        .route("/api/analytics/peak-hours", get(peak_hours_handler))
        .route("/api/analytics/users/{user_id}/stats", get(user_stats_handler))
        .route(
            "/api/analytics/slot-utilization",
            get(slot_utilization_handler),
        )
        .with_state(state)
}

async fn shutdown_signal(token: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
    token.cancel();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();
    let persistence: Persistence = match args.database.as_deref() {
        Some(path) => {
            info!(path, "opening database file");
            Persistence::new_with_file(path)?
        }
        None => {
            info!("using in-memory database");
            Persistence::new_in_memory()?
        }
    };

    let state: AppState = AppState::new(persistence);
    let shutdown: CancellationToken = CancellationToken::new();
    let sweeper = background::spawn_auto_cancel(
        Arc::clone(&state.persistence),
        shutdown.clone(),
    );
    let monitor = background::spawn_lot_monitor(
        Arc::clone(&state.persistence),
        Arc::clone(&state.lot_status),
        shutdown.clone(),
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!(port = args.port, "parkd server listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    let (sweeper_result, monitor_result) = tokio::join!(sweeper, monitor);
    sweeper_result?;
    monitor_result?;
    Ok(())
}
