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

//! API boundary layer for the parkd facility backend.
//!
//! This crate owns the API contract: request/response DTOs, the
//! credential check, error translation, and the operation handlers
//! that tie validation, the rule engine, and persistence together.
//! It knows nothing about HTTP; the server crate maps these handlers
//! onto routes and actuates gates from the grant responses.

pub mod analytics;
pub mod auth;
pub mod error;
pub mod export;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use analytics::{occupancy_report, peak_hours_report, slot_utilization, user_stats};
pub use auth::{authenticate, require_admin};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use export::{ExportError, export_bookings_csv};
pub use handlers::{
    apply_sensor_batch, book_slot, booking_history, cancel_booking, drive_up_request,
    emergency_open, list_bookings, list_slots, pay, request_access, revenue_report,
    update_slot_status,
};
pub use request_response::{
    AccessGrant, AccessRequest, AuthRequest, AuthResponse, BookRequest, BookResponse,
    BookingHistoryResponse, BookingListResponse, BookingView, CancelRequest, CancelResponse,
    DriveUpOutcome, EmergencyGrant, EmergencyOpenRequest, ExportQuery, GateStatusResponse,
    HistoryEntry, OccupancyPoint, OccupancyReport, PayRequest, PayResponse, PaymentView, PeakHour,
    PeakHoursResponse, RevenueResponse, SensorBatchRequest, SensorBatchResponse, SensorReading,
    SensorSlotResult, SlotListResponse, SlotStatusUpdateRequest, SlotStatusUpdateResponse,
    SlotUtilizationResponse, SlotUtilizationRow, SlotView, UserStatsResponse,
};
