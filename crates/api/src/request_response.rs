// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Timestamps cross the API boundary as RFC 3339 strings; DTOs are
//! distinct from domain types and represent the API contract.

use parkd_domain::{
    Booking, BookingStatus, GateId, GateState, LotStatus, Payment, PaymentStatus, Role, Slot,
    SlotStatus, format_rfc3339,
};
use time::OffsetDateTime;

use crate::error::{ApiError, translate_domain_error};

fn fmt_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    format_rfc3339(value).map_err(translate_domain_error)
}

fn fmt_optional(value: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    value.map(fmt_timestamp).transpose()
}

/// API request to authenticate a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthRequest {
    /// The login name.
    pub username: String,
    /// The plaintext password to verify.
    pub password: String,
}

/// API response for a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthResponse {
    /// The authenticated user's identifier.
    pub id: i64,
    /// The authenticated user's login name.
    pub username: String,
    /// The authenticated user's role.
    pub role: Role,
}

/// Serializable view of one parking slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotView {
    /// The slot identifier.
    pub id: String,
    /// The slot's coordinated status.
    pub status: SlotStatus,
    /// The slot category.
    pub category: String,
    /// Whether the slot is under an administrative maintenance hold.
    pub is_under_maintenance: bool,
    /// The last sensor update (RFC 3339), if any.
    pub last_sensor_update: Option<String>,
}

impl SlotView {
    /// Builds a view from the domain slot.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_domain(slot: &Slot) -> Result<Self, ApiError> {
        Ok(Self {
            id: slot.id.clone(),
            status: slot.status,
            category: slot.category.clone(),
            is_under_maintenance: slot.is_under_maintenance,
            last_sensor_update: fmt_optional(slot.last_sensor_update)?,
        })
    }
}

/// Serializable view of one booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingView {
    /// The booking identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The reserved slot.
    pub slot_id: String,
    /// The reserved window start (RFC 3339).
    pub start_time: String,
    /// The reserved window end (RFC 3339, exclusive).
    pub end_time: String,
    /// The actual check-in time (RFC 3339), if entered.
    pub entry_time: Option<String>,
    /// The actual exit time (RFC 3339), if completed.
    pub exit_time: Option<String>,
    /// The lifecycle status.
    pub status: BookingStatus,
    /// The vehicle registration, if supplied.
    pub vehicle_number: Option<String>,
    /// The contact phone number, if supplied.
    pub phone_number: Option<String>,
    /// The creation timestamp (RFC 3339).
    pub created_at: String,
}

impl BookingView {
    /// Builds a view from the domain booking.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_domain(booking: &Booking) -> Result<Self, ApiError> {
        Ok(Self {
            id: booking.id,
            user_id: booking.user_id,
            slot_id: booking.slot_id.clone(),
            start_time: fmt_timestamp(booking.start_time)?,
            end_time: fmt_timestamp(booking.end_time)?,
            entry_time: fmt_optional(booking.entry_time)?,
            exit_time: fmt_optional(booking.exit_time)?,
            status: booking.status,
            vehicle_number: booking.vehicle_number.clone(),
            phone_number: booking.phone_number.clone(),
            created_at: fmt_timestamp(booking.created_at)?,
        })
    }
}

/// Serializable view of one payment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentView {
    /// The payment identifier.
    pub id: i64,
    /// The booking this payment settles.
    pub booking_id: i64,
    /// The owning user.
    pub user_id: i64,
    /// The charged amount in integer cents.
    pub amount_cents: i64,
    /// The settlement status.
    pub status: PaymentStatus,
    /// The creation timestamp (RFC 3339).
    pub created_at: String,
}

impl PaymentView {
    /// Builds a view from the domain payment.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_domain(payment: &Payment) -> Result<Self, ApiError> {
        Ok(Self {
            id: payment.id,
            booking_id: payment.booking_id,
            user_id: payment.user_id,
            amount_cents: payment.amount_cents,
            status: payment.status,
            created_at: fmt_timestamp(payment.created_at)?,
        })
    }
}

/// API response listing all slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotListResponse {
    /// All slots ordered by identifier.
    pub slots: Vec<SlotView>,
}

/// API response listing all bookings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingListResponse {
    /// All bookings ordered by identifier.
    pub bookings: Vec<BookingView>,
}

/// One entry of a user's booking history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    /// The booking.
    pub booking: BookingView,
    /// The payment created at exit, if the booking completed.
    pub payment: Option<PaymentView>,
}

/// API response for a user's booking history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingHistoryResponse {
    /// The user the history belongs to.
    pub user_id: i64,
    /// Bookings joined with their payments, newest first.
    pub entries: Vec<HistoryEntry>,
}

/// API request to reserve a slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookRequest {
    /// The user making the reservation.
    pub user_id: i64,
    /// The slot to reserve.
    pub slot_id: String,
    /// The reserved window start (RFC 3339).
    pub start_time: String,
    /// The reservation length in minutes.
    pub duration_minutes: i64,
    /// The vehicle registration, if supplied.
    pub vehicle_number: Option<String>,
    /// The contact phone number, if supplied.
    pub phone_number: Option<String>,
}

/// API response for a successful reservation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookResponse {
    /// The created booking.
    pub booking: BookingView,
    /// A success message.
    pub message: String,
}

/// API request to cancel a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelRequest {
    /// The booking to cancel.
    pub booking_id: i64,
}

/// API response for a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelResponse {
    /// The cancelled booking.
    pub booking: BookingView,
    /// A success message.
    pub message: String,
}

/// API request for gate access against a reservation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccessRequest {
    /// The booking presenting at the entrance gate.
    pub booking_id: i64,
}

/// API response granting gate access.
///
/// The server actuates the named gate for `open_seconds` after a grant.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccessGrant {
    /// The booking the grant belongs to.
    pub booking_id: i64,
    /// The gate to open.
    pub gate: GateId,
    /// How long the gate stays open.
    pub open_seconds: i64,
    /// A success message.
    pub message: String,
}

/// API response for a drive-up request at the entrance gate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DriveUpOutcome {
    /// Whether access was granted.
    pub granted: bool,
    /// The gate to open, when granted.
    pub gate: Option<GateId>,
    /// How long the gate stays open, when granted.
    pub open_seconds: Option<i64>,
    /// A human-readable outcome message.
    pub message: String,
}

/// API request to open a gate with the emergency duration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmergencyOpenRequest {
    /// The gate to open (`entrance` or `exit`).
    pub gate: String,
}

/// API response for an emergency gate open.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmergencyGrant {
    /// The gate to open.
    pub gate: GateId,
    /// How long the gate stays open.
    pub open_seconds: i64,
    /// A success message.
    pub message: String,
}

/// API response for the combined gate and lot status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GateStatusResponse {
    /// The entrance gate state.
    pub entrance: GateState,
    /// The exit gate state.
    pub exit: GateState,
    /// The advisory facility-wide availability.
    pub lot_status: LotStatus,
}

/// One occupancy reading from a slot sensor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SensorReading {
    /// The reporting slot.
    pub slot_id: String,
    /// Whether the sensor detects a vehicle.
    pub occupied: bool,
}

/// API request carrying a batch of sensor readings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SensorBatchRequest {
    /// The readings, applied in order, best-effort per slot.
    pub readings: Vec<SensorReading>,
}

/// The per-slot outcome of one applied sensor reading.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SensorSlotResult {
    /// The reporting slot.
    pub slot_id: String,
    /// One of `ignored`, `occupied`, `exit`, `exit_unmatched`, or
    /// `skipped`.
    pub outcome: String,
}

/// API response for a sensor batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SensorBatchResponse {
    /// Per-reading outcomes, in request order.
    pub results: Vec<SensorSlotResult>,
}

/// API request to force a slot status (admin only).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotStatusUpdateRequest {
    /// The administrator performing the override.
    pub user_id: i64,
    /// The target slot.
    pub slot_id: String,
    /// The status to force (`free`, `booked`, `occupied`, `maintenance`).
    pub status: String,
}

/// API response for a forced slot status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotStatusUpdateResponse {
    /// The target slot.
    pub slot_id: String,
    /// The status now in effect.
    pub status: SlotStatus,
    /// How many live bookings were force-cancelled (forcing `free` only).
    pub cancelled_bookings: usize,
    /// A success message.
    pub message: String,
}

/// API request to settle a pending payment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PayRequest {
    /// The payment to settle.
    pub payment_id: i64,
    /// The paying user; must own the payment.
    pub user_id: i64,
}

/// API response for a settled payment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PayResponse {
    /// The settled payment.
    pub payment: PaymentView,
    /// A success message.
    pub message: String,
}

/// API response summarizing settled revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevenueResponse {
    /// Sum of settled payment amounts in integer cents.
    pub total_cents: i64,
    /// Number of settled payments.
    pub payment_count: i64,
}

/// One point of the recent occupancy trend.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupancyPoint {
    /// The minute the point belongs to (RFC 3339, truncated to minutes).
    pub time: String,
    /// How many slots were occupied during that minute.
    pub occupied: i64,
}

/// API response for the occupancy report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupancyReport {
    /// Total slots in the registry.
    pub total_slots: usize,
    /// Slots currently occupied.
    pub occupied: i64,
    /// Per-minute occupancy history, oldest first, current minute last.
    pub trend: Vec<OccupancyPoint>,
}

/// Booking count for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeakHour {
    /// The hour of day (0-23).
    pub hour: u8,
    /// How many non-cancelled bookings start in this hour.
    pub bookings: usize,
    /// Display label (`"08:00"`).
    pub label: String,
}

/// API response for the peak-hours report; always 24 entries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeakHoursResponse {
    /// One entry per hour of day, in order.
    pub hours: Vec<PeakHour>,
}

/// API response summarizing one user's bookings and spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserStatsResponse {
    /// The user the summary belongs to.
    pub user_id: i64,
    /// All bookings the user ever made.
    pub total_bookings: usize,
    /// Bookings that ran to completion.
    pub completed_bookings: usize,
    /// Sum of the user's settled payments in integer cents.
    pub total_spent_cents: i64,
    /// Mean stay in whole minutes over completed visits, if any.
    pub average_stay_minutes: Option<i64>,
}

/// Utilization summary for one slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotUtilizationRow {
    /// The slot.
    pub slot_id: String,
    /// All bookings ever made on the slot.
    pub total_bookings: usize,
    /// Bookings that ran to completion.
    pub completed_bookings: usize,
    /// Bookings that were cancelled.
    pub cancelled_bookings: usize,
    /// Mean stay in whole minutes over completed visits, if any.
    pub average_stay_minutes: Option<i64>,
}

/// API response for the slot-utilization report, busiest slots first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotUtilizationResponse {
    /// One row per slot.
    pub slots: Vec<SlotUtilizationRow>,
}

/// Query parameters for the booking export.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportQuery {
    /// Keep bookings starting at or after this instant (RFC 3339).
    pub start_date: Option<String>,
    /// Keep bookings starting at or before this instant (RFC 3339).
    pub end_date: Option<String>,
}
