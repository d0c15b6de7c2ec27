// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking ledger mutations.
//!
//! The decisions live in `parkd-core`; this module loads the snapshots
//! those decisions need, applies the outcome, and appends the matching
//! log row, all inside one transaction per operation.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkd_core::{
    SlotRelease, check_booking_conflict, completion_transition, entry_transition,
    is_grace_expired, plan_cancellation, select_exit_booking,
};
use parkd_domain::{
    Booking, BookingStatus, Payment, PaymentStatus, Slot, SlotStatus, calculate_cost_cents,
    format_rfc3339,
};
use parkd_events::{LogLevel, SystemEvent, tags};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::mutations::log::append_event;
use crate::mutations::slot::write_status;
use crate::queries;
use crate::schema::bookings;
use crate::sqlite::get_last_insert_rowid;

/// Creates a booking and reserves its slot.
///
/// Inside one transaction: verifies the slot exists, checks the window
/// against the slot's live bookings, inserts the `active` booking, and
/// marks a `free` slot `booked`. A slot the sensor already holds
/// `occupied` keeps that status; the reservation still exists.
///
/// # Errors
///
/// Returns `SlotNotFound` for an unknown slot and
/// `Rule(BookingConflict)` for an overlapping window. Neither leaves any
/// mutation behind.
#[allow(clippy::too_many_arguments)]
pub fn create_booking(
    conn: &mut SqliteConnection,
    user_id: i64,
    slot_id: &str,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
    vehicle_number: Option<&str>,
    phone_number: Option<&str>,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    conn.transaction::<Booking, PersistenceError, _>(|conn| {
        let slot: Slot = queries::slot::get_slot(conn, slot_id)?;

        let live: Vec<Booking> = queries::booking::live_bookings_for_slot(conn, slot_id)?;
        check_booking_conflict(&live, slot_id, start_time, end_time)?;

        diesel::insert_into(bookings::table)
            .values((
                bookings::user_id.eq(user_id),
                bookings::slot_id.eq(slot_id),
                bookings::start_time.eq(format_rfc3339(start_time)?),
                bookings::end_time.eq(format_rfc3339(end_time)?),
                bookings::status.eq(BookingStatus::Active.as_str()),
                bookings::vehicle_number.eq(vehicle_number),
                bookings::phone_number.eq(phone_number),
                bookings::created_at.eq(format_rfc3339(now)?),
            ))
            .execute(conn)?;
        let booking_id: i64 = get_last_insert_rowid(conn)?;

        if slot.status == SlotStatus::Free {
            write_status(conn, slot_id, SlotStatus::Booked, now)?;
        }

        let details: String = json!({
            "booking_id": booking_id,
            "slot_id": slot_id,
            "user_id": user_id,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::BOOKING_SUCCESS, details, now),
        )?;

        info!(booking_id, slot_id, user_id, "Booking created");

        Ok(Booking {
            id: booking_id,
            user_id,
            slot_id: String::from(slot_id),
            start_time,
            end_time,
            entry_time: None,
            exit_time: None,
            status: BookingStatus::Active,
            vehicle_number: vehicle_number.map(String::from),
            phone_number: phone_number.map(String::from),
            created_at: now,
        })
    })
}

/// Cancels a booking and releases its reservation.
///
/// The slot transitions to `free` only from the reservation-only
/// `booked` status; a retained status is recorded in the log entry.
///
/// # Errors
///
/// Returns `BookingNotFound` for an unknown ID and
/// `Rule(BookingTerminal)` if the booking is already terminal.
pub fn cancel_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    reason: &str,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    conn.transaction::<Booking, PersistenceError, _>(|conn| {
        let mut booking: Booking = queries::booking::get_booking(conn, booking_id)?;
        let slot: Slot = queries::slot::get_slot(conn, &booking.slot_id)?;

        let plan = plan_cancellation(&booking, slot.status)?;

        diesel::update(bookings::table)
            .filter(bookings::id.eq(booking_id))
            .set(bookings::status.eq(BookingStatus::Cancelled.as_str()))
            .execute(conn)?;

        let retained: Option<&'static str> = match plan.slot_release {
            SlotRelease::Freed => {
                write_status(conn, &booking.slot_id, SlotStatus::Free, now)?;
                None
            }
            SlotRelease::Retained(status) => Some(status.as_str()),
        };

        let details: String = json!({
            "booking_id": booking_id,
            "slot_id": booking.slot_id,
            "reason": reason,
            "slot_status_retained": retained,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::BOOKING_CANCELLED, details, now),
        )?;

        info!(booking_id, slot_id = %booking.slot_id, reason, "Booking cancelled");

        booking.status = BookingStatus::Cancelled;
        Ok(booking)
    })
}

/// Marks a booking entered and records the entry time.
///
/// # Errors
///
/// Returns `BookingNotFound` for an unknown ID and
/// `Rule(InvalidTransition)` unless the booking is `active`.
pub fn mark_entered(
    conn: &mut SqliteConnection,
    booking_id: i64,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    conn.transaction::<Booking, PersistenceError, _>(|conn| {
        let mut booking: Booking = queries::booking::get_booking(conn, booking_id)?;
        entry_transition(&booking)?;

        diesel::update(bookings::table)
            .filter(bookings::id.eq(booking_id))
            .set((
                bookings::status.eq(BookingStatus::Entered.as_str()),
                bookings::entry_time.eq(Some(format_rfc3339(now)?)),
            ))
            .execute(conn)?;

        let details: String = json!({
            "booking_id": booking_id,
            "slot_id": booking.slot_id,
            "user_id": booking.user_id,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::ACCESS_GRANTED, details, now),
        )?;

        booking.status = BookingStatus::Entered;
        booking.entry_time = Some(now);
        Ok(booking)
    })
}

/// Completes the most recent `entered` booking on a slot and creates its
/// charge.
///
/// Returns `None` when the slot has no entered booking; the anomaly is
/// WARN-logged (`EXIT_NO_BOOKING`) and nothing else changes. The slot
/// row itself is left to the caller (the sensor reconciler owns it).
///
/// # Errors
///
/// Returns an error only on storage failure.
pub fn complete_exit(
    conn: &mut SqliteConnection,
    slot_id: &str,
    now: OffsetDateTime,
) -> Result<Option<(Booking, Payment)>, PersistenceError> {
    conn.transaction::<Option<(Booking, Payment)>, PersistenceError, _>(|conn| {
        let live: Vec<Booking> = queries::booking::live_bookings_for_slot(conn, slot_id)?;

        let Some(selected) = select_exit_booking(&live, slot_id) else {
            warn!(slot_id, "Vehicle exit with no entered booking");
            let details: String = json!({ "slot_id": slot_id }).to_string();
            append_event(
                conn,
                &SystemEvent::new(LogLevel::Warn, tags::EXIT_NO_BOOKING, details, now),
            )?;
            return Ok(None);
        };
        let mut booking: Booking = selected.clone();
        completion_transition(&booking)?;

        let amount_cents: i64 = calculate_cost_cents(booking.entry_time, Some(now));

        diesel::update(bookings::table)
            .filter(bookings::id.eq(booking.id))
            .set((
                bookings::status.eq(BookingStatus::Completed.as_str()),
                bookings::exit_time.eq(Some(format_rfc3339(now)?)),
            ))
            .execute(conn)?;

        use crate::schema::payments;
        diesel::insert_into(payments::table)
            .values((
                payments::booking_id.eq(booking.id),
                payments::user_id.eq(booking.user_id),
                payments::amount_cents.eq(amount_cents),
                payments::status.eq(PaymentStatus::Pending.as_str()),
                payments::created_at.eq(format_rfc3339(now)?),
            ))
            .execute(conn)?;
        let payment_id: i64 = get_last_insert_rowid(conn)?;

        let details: String = json!({
            "booking_id": booking.id,
            "slot_id": slot_id,
            "payment_id": payment_id,
            "amount_cents": amount_cents,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::VEHICLE_EXIT, details, now),
        )?;

        info!(
            booking_id = booking.id,
            slot_id, amount_cents, "Vehicle exit completed booking"
        );

        booking.status = BookingStatus::Completed;
        booking.exit_time = Some(now);
        let payment: Payment = Payment {
            id: payment_id,
            booking_id: booking.id,
            user_id: booking.user_id,
            amount_cents,
            status: PaymentStatus::Pending,
            created_at: now,
        };
        Ok(Some((booking, payment)))
    })
}

/// Force-cancels the live bookings on a slot and sets it `free`.
///
/// The unconditional escape hatch: unlike cancellation it ignores the
/// retained-status policy.
///
/// # Errors
///
/// Returns `SlotNotFound` for an unknown slot.
pub fn admin_override_free(
    conn: &mut SqliteConnection,
    slot_id: &str,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        // Existence check, result unused.
        let _: Slot = queries::slot::get_slot(conn, slot_id)?;

        let cancelled: usize = diesel::update(bookings::table)
            .filter(bookings::slot_id.eq(slot_id))
            .filter(bookings::status.eq_any([
                BookingStatus::Active.as_str(),
                BookingStatus::Entered.as_str(),
            ]))
            .set(bookings::status.eq(BookingStatus::Cancelled.as_str()))
            .execute(conn)?;

        write_status(conn, slot_id, SlotStatus::Free, now)?;

        let details: String = json!({
            "slot_id": slot_id,
            "bookings_cancelled": cancelled,
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Warn, tags::ADMIN_OVERRIDE, details, now),
        )?;

        warn!(slot_id, cancelled, "Admin override freed slot");
        Ok(cancelled)
    })
}

/// Cancels every `active` booking whose grace window has expired.
///
/// Each booking is swept independently; one failure is logged and
/// skipped so it cannot block the rest of the scan.
///
/// # Errors
///
/// Returns an error only if the initial scan query fails.
pub fn auto_cancel_expired(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<Vec<Booking>, PersistenceError> {
    let candidates: Vec<Booking> = queries::booking::unclaimed_active_bookings(conn)?;

    let mut cancelled: Vec<Booking> = Vec::new();
    for booking in candidates {
        if !is_grace_expired(&booking, now) {
            continue;
        }
        match sweep_one(conn, &booking, now) {
            Ok(swept) => cancelled.push(swept),
            Err(err) => {
                warn!(booking_id = booking.id, error = %err, "Auto-cancel sweep failed for booking");
            }
        }
    }

    Ok(cancelled)
}

fn sweep_one(
    conn: &mut SqliteConnection,
    booking: &Booking,
    now: OffsetDateTime,
) -> Result<Booking, PersistenceError> {
    conn.transaction::<Booking, PersistenceError, _>(|conn| {
        let mut swept: Booking = queries::booking::get_booking(conn, booking.id)?;
        let slot: Slot = queries::slot::get_slot(conn, &swept.slot_id)?;
        let plan = plan_cancellation(&swept, slot.status)?;

        diesel::update(bookings::table)
            .filter(bookings::id.eq(swept.id))
            .set(bookings::status.eq(BookingStatus::Cancelled.as_str()))
            .execute(conn)?;

        if plan.slot_release == SlotRelease::Freed {
            write_status(conn, &swept.slot_id, SlotStatus::Free, now)?;
        }

        let details: String = json!({
            "booking_id": swept.id,
            "slot_id": swept.slot_id,
            "reason": "grace window expired without entry",
        })
        .to_string();
        append_event(
            conn,
            &SystemEvent::new(LogLevel::Info, tags::AUTO_CANCEL, details, now),
        )?;

        info!(booking_id = swept.id, slot_id = %swept.slot_id, "Auto-cancelled unclaimed booking");

        swept.status = BookingStatus::Cancelled;
        Ok(swept)
    })
}
