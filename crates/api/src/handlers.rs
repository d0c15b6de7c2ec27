// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation handlers for the facility API.
//!
//! Each handler validates its request, delegates the check-then-write
//! to the persistence layer, and translates errors into the API
//! contract. Handlers never touch gate hardware; a grant response tells
//! the server which gate to actuate and for how long.

use parkd_core::{EMERGENCY_OPEN_DURATION, GATE_OPEN_DURATION, evaluate_access_window};
use parkd_domain::{
    Booking, GateId, Payment, SlotStatus, compute_end_time, parse_rfc3339,
    validate_booking_request,
};
use parkd_events::{LogLevel, SystemEvent, tags};
use parkd_persistence::{Persistence, RevenueSummary, SensorOutcome};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::require_admin;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AccessGrant, AccessRequest, BookRequest, BookResponse, BookingHistoryResponse,
    BookingListResponse, BookingView, CancelRequest, CancelResponse, DriveUpOutcome,
    EmergencyGrant, EmergencyOpenRequest, HistoryEntry, PayRequest, PayResponse, PaymentView,
    RevenueResponse, SensorBatchRequest, SensorBatchResponse, SensorSlotResult, SlotListResponse,
    SlotStatusUpdateRequest, SlotStatusUpdateResponse, SlotView,
};

/// Lists all slots in the registry.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub fn list_slots(persistence: &mut Persistence) -> Result<SlotListResponse, ApiError> {
    let slots: Vec<SlotView> = persistence
        .list_slots()
        .map_err(translate_persistence_error)?
        .iter()
        .map(SlotView::from_domain)
        .collect::<Result<_, _>>()?;
    Ok(SlotListResponse { slots })
}

/// Lists all bookings in the ledger.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub fn list_bookings(persistence: &mut Persistence) -> Result<BookingListResponse, ApiError> {
    let bookings: Vec<BookingView> = persistence
        .list_bookings()
        .map_err(translate_persistence_error)?
        .iter()
        .map(BookingView::from_domain)
        .collect::<Result<_, _>>()?;
    Ok(BookingListResponse { bookings })
}

/// Lists one user's bookings joined with their payments, newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub fn booking_history(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<BookingHistoryResponse, ApiError> {
    if persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        });
    }

    let entries: Vec<HistoryEntry> = persistence
        .booking_history(user_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(|entry| {
            Ok(HistoryEntry {
                booking: BookingView::from_domain(&entry.booking)?,
                payment: entry.payment.as_ref().map(PaymentView::from_domain).transpose()?,
            })
        })
        .collect::<Result<_, ApiError>>()?;
    Ok(BookingHistoryResponse { user_id, entries })
}

/// Reserves a slot for a time window.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed fields, `ResourceNotFound` for
/// an unknown slot, and a `no_double_booking` rule violation when the
/// window overlaps a live booking on the same slot.
pub fn book_slot(
    persistence: &mut Persistence,
    request: &BookRequest,
    now: OffsetDateTime,
) -> Result<BookResponse, ApiError> {
    validate_booking_request(&request.slot_id, request.duration_minutes)
        .map_err(translate_domain_error)?;
    let start: OffsetDateTime =
        parse_rfc3339(&request.start_time).map_err(translate_domain_error)?;
    let end: OffsetDateTime =
        compute_end_time(start, request.duration_minutes).map_err(translate_domain_error)?;

    let booking: Booking = persistence
        .create_booking(
            request.user_id,
            &request.slot_id,
            start,
            end,
            request.vehicle_number.as_deref(),
            request.phone_number.as_deref(),
            now,
        )
        .map_err(translate_persistence_error)?;

    let view: BookingView = BookingView::from_domain(&booking)?;
    let message: String = format!(
        "Slot {} booked from {} to {}",
        view.slot_id, view.start_time, view.end_time
    );
    Ok(BookResponse {
        booking: view,
        message,
    })
}

/// Cancels a booking at the owner's request.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown booking and a
/// `booking_lifecycle` rule violation if it is already terminal.
pub fn cancel_booking(
    persistence: &mut Persistence,
    request: &CancelRequest,
    now: OffsetDateTime,
) -> Result<CancelResponse, ApiError> {
    let booking: Booking = persistence
        .cancel_booking(request.booking_id, "user request", now)
        .map_err(translate_persistence_error)?;
    Ok(CancelResponse {
        booking: BookingView::from_domain(&booking)?,
        message: format!("Booking {} cancelled", request.booking_id),
    })
}

/// Grants entrance access for a reservation inside its grace window.
///
/// On success the booking is marked entered and the server opens the
/// entrance gate for the returned duration.
///
/// # Errors
///
/// Returns `AccessWindowViolation` outside start ± the grace period,
/// `ResourceNotFound` for an unknown booking, and a lifecycle rule
/// violation if the booking is not `active`.
pub fn request_access(
    persistence: &mut Persistence,
    request: &AccessRequest,
    now: OffsetDateTime,
) -> Result<AccessGrant, ApiError> {
    let booking: Booking = persistence
        .get_booking(request.booking_id)
        .map_err(translate_persistence_error)?;
    evaluate_access_window(booking.start_time, now).map_err(translate_core_error)?;
    persistence
        .mark_entered(request.booking_id, now)
        .map_err(translate_persistence_error)?;

    Ok(AccessGrant {
        booking_id: request.booking_id,
        gate: GateId::Entrance,
        open_seconds: GATE_OPEN_DURATION.whole_seconds(),
        message: String::from("Access granted. Gate opening."),
    })
}

/// Decides a drive-up request from an unreserved vehicle.
///
/// No booking is created either way; the vehicle parks wherever the
/// sensors later observe it.
///
/// # Errors
///
/// Returns an error if the registry or log cannot be accessed.
pub fn drive_up_request(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<DriveUpOutcome, ApiError> {
    let free: i64 = persistence
        .free_slot_count()
        .map_err(translate_persistence_error)?;

    if free > 0 {
        info!(free_slots = free, "drive-up access granted");
        let details: String = json!({ "free_slots": free }).to_string();
        persistence
            .append_log(&SystemEvent::new(
                LogLevel::Info,
                tags::DRIVE_UP_ACCESS,
                details,
                now,
            ))
            .map_err(translate_persistence_error)?;
        return Ok(DriveUpOutcome {
            granted: true,
            gate: Some(GateId::Entrance),
            open_seconds: Some(GATE_OPEN_DURATION.whole_seconds()),
            message: String::from("Welcome. Gate opening."),
        });
    }

    info!("drive-up access rejected: lot full");
    let details: String = json!({ "free_slots": 0 }).to_string();
    persistence
        .append_log(&SystemEvent::new(
            LogLevel::Info,
            tags::DRIVE_UP_REJECTED,
            details,
            now,
        ))
        .map_err(translate_persistence_error)?;
    Ok(DriveUpOutcome {
        granted: false,
        gate: None,
        open_seconds: None,
        message: String::from("Lot full. Please come back later."),
    })
}

/// Authorizes an emergency gate open with the extended duration.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown gate name.
pub fn emergency_open(
    persistence: &mut Persistence,
    request: &EmergencyOpenRequest,
    now: OffsetDateTime,
) -> Result<EmergencyGrant, ApiError> {
    let gate: GateId = GateId::parse(&request.gate).map_err(translate_domain_error)?;
    warn!(gate = %gate, "emergency gate open");
    let details: String = json!({ "gate": gate.as_str() }).to_string();
    persistence
        .append_log(&SystemEvent::new(
            LogLevel::Warn,
            tags::EMERGENCY_GATE_OPEN,
            details,
            now,
        ))
        .map_err(translate_persistence_error)?;

    Ok(EmergencyGrant {
        gate,
        open_seconds: EMERGENCY_OPEN_DURATION.whole_seconds(),
        message: format!("{gate} gate opening for emergency access"),
    })
}

const fn outcome_label(outcome: &SensorOutcome) -> &'static str {
    match outcome {
        SensorOutcome::Ignored => "ignored",
        SensorOutcome::Occupied => "occupied",
        SensorOutcome::Exit { .. } => "exit",
        SensorOutcome::ExitUnmatched => "exit_unmatched",
    }
}

/// Applies a batch of sensor readings, best-effort per slot.
///
/// A failed reading (unknown slot, storage error) is logged and
/// skipped; the rest of the batch still applies.
///
/// # Errors
///
/// This function itself never fails; the `Result` mirrors the other
/// handlers for uniform routing.
pub fn apply_sensor_batch(
    persistence: &mut Persistence,
    request: &SensorBatchRequest,
    now: OffsetDateTime,
) -> Result<SensorBatchResponse, ApiError> {
    let mut results: Vec<SensorSlotResult> = Vec::with_capacity(request.readings.len());
    for reading in &request.readings {
        let outcome: &'static str =
            match persistence.apply_sensor_reading(&reading.slot_id, reading.occupied, now) {
                Ok(outcome) => outcome_label(&outcome),
                Err(err) => {
                    warn!(slot_id = %reading.slot_id, error = %err, "sensor reading skipped");
                    "skipped"
                }
            };
        results.push(SensorSlotResult {
            slot_id: reading.slot_id.clone(),
            outcome: String::from(outcome),
        });
    }
    Ok(SensorBatchResponse { results })
}

/// Forces a slot status on behalf of an administrator.
///
/// Forcing `free` also cancels every live booking on the slot; any
/// other status leaves the ledger untouched.
///
/// # Errors
///
/// Returns `Unauthorized` unless the user is an admin, `InvalidInput`
/// for an unknown status, and `ResourceNotFound` for an unknown slot.
pub fn update_slot_status(
    persistence: &mut Persistence,
    request: &SlotStatusUpdateRequest,
    now: OffsetDateTime,
) -> Result<SlotStatusUpdateResponse, ApiError> {
    require_admin(persistence, request.user_id, "update_slot_status")?;
    let status: SlotStatus = SlotStatus::parse(&request.status).map_err(translate_domain_error)?;

    let cancelled_bookings: usize = if status == SlotStatus::Free {
        persistence
            .admin_override_free(&request.slot_id, now)
            .map_err(translate_persistence_error)?
    } else {
        persistence
            .set_slot_status(&request.slot_id, status, "admin", now)
            .map_err(translate_persistence_error)?;
        0
    };

    Ok(SlotStatusUpdateResponse {
        slot_id: request.slot_id.clone(),
        status,
        cancelled_bookings,
        message: format!("Slot {} set to {status}", request.slot_id),
    })
}

/// Settles a pending payment.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown, foreign, or already
/// settled payment.
pub fn pay(
    persistence: &mut Persistence,
    request: &PayRequest,
    now: OffsetDateTime,
) -> Result<PayResponse, ApiError> {
    let payment: Payment = persistence
        .settle_payment(request.payment_id, request.user_id, now)
        .map_err(translate_persistence_error)?;
    let view: PaymentView = PaymentView::from_domain(&payment)?;
    let message: String = format!("Payment of {} cents received", view.amount_cents);
    Ok(PayResponse {
        payment: view,
        message,
    })
}

/// Summarizes settled revenue.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub fn revenue_report(persistence: &mut Persistence) -> Result<RevenueResponse, ApiError> {
    let summary: RevenueSummary = persistence
        .revenue_summary()
        .map_err(translate_persistence_error)?;
    Ok(RevenueResponse {
        total_cents: summary.total_cents,
        payment_count: summary.payment_count,
    })
}
