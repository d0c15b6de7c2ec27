// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived analytics reads over the ledger and system log.
//!
//! Every report here is computed from committed rows at read time;
//! none of these operations write anything. The occupancy trend is
//! reconstructed from `SLOT_STATUS_CHANGE` log entries, which both the
//! sensor path and admin overrides append.

use parkd_domain::{Booking, BookingStatus, PaymentStatus, SlotStatus, format_rfc3339};
use parkd_events::tags;
use parkd_persistence::Persistence;
use time::OffsetDateTime;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    OccupancyPoint, OccupancyReport, PeakHour, PeakHoursResponse, SlotUtilizationResponse,
    SlotUtilizationRow, UserStatsResponse,
};

/// How many status-change log rows the occupancy trend walks back over.
const TREND_LOG_WINDOW: usize = 100;

/// Upper bound on returned trend points.
const TREND_POINTS: usize = 20;

/// Truncates an RFC 3339 timestamp to its minute (`2026-03-01T12:00`).
fn minute_key(timestamp: &str) -> String {
    timestamp.chars().take(16).collect()
}

/// Current slot occupancy plus a per-minute trend of recent history.
///
/// The trend starts from the current count and undoes the most recent
/// status changes one by one, recording one point per distinct minute,
/// oldest first. Log rows with unreadable details are skipped.
///
/// # Errors
///
/// Returns an error if the registry or log cannot be read.
pub fn occupancy_report(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<OccupancyReport, ApiError> {
    let slots = persistence.list_slots().map_err(translate_persistence_error)?;
    let total_slots: usize = slots.len();
    let occupied_count: usize = slots
        .iter()
        .filter(|slot| slot.status == SlotStatus::Occupied)
        .count();
    let occupied: i64 = i64::try_from(occupied_count).unwrap_or(0);

    let changes = persistence
        .logs_for_event(tags::SLOT_STATUS_CHANGE)
        .map_err(translate_persistence_error)?;

    let now_key: String = minute_key(&format_rfc3339(now).map_err(translate_domain_error)?);
    let mut points: Vec<OccupancyPoint> = vec![OccupancyPoint {
        time: now_key,
        occupied,
    }];

    let mut running: i64 = occupied;
    for row in changes.iter().rev().take(TREND_LOG_WINDOW) {
        let Ok(details) = serde_json::from_str::<serde_json::Value>(&row.details) else {
            continue;
        };
        // Walking backwards, so each transition is reversed.
        if details["new"].as_str() == Some("occupied") {
            running -= 1;
        }
        if details["old"].as_str() == Some("occupied") {
            running += 1;
        }
        let key: String = minute_key(&row.timestamp);
        if points.iter().all(|point| point.time != key) {
            points.push(OccupancyPoint {
                time: key,
                occupied: running.max(0),
            });
        }
    }

    points.reverse();
    let start: usize = points.len().saturating_sub(TREND_POINTS);
    let trend: Vec<OccupancyPoint> = points.split_off(start);
    Ok(OccupancyReport {
        total_slots,
        occupied,
        trend,
    })
}

/// Booking counts per hour of day, over the whole ledger.
///
/// Cancelled bookings are excluded; hours with no bookings still get a
/// row so the result is always 24 entries.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub fn peak_hours_report(persistence: &mut Persistence) -> Result<PeakHoursResponse, ApiError> {
    let bookings = persistence
        .list_bookings()
        .map_err(translate_persistence_error)?;

    let mut counts: [usize; 24] = [0; 24];
    for booking in bookings
        .iter()
        .filter(|booking| booking.status != BookingStatus::Cancelled)
    {
        counts[usize::from(booking.start_time.hour())] += 1;
    }

    let hours: Vec<PeakHour> = (0u8..24)
        .map(|hour| PeakHour {
            hour,
            bookings: counts[usize::from(hour)],
            label: format!("{hour:02}:00"),
        })
        .collect();
    Ok(PeakHoursResponse { hours })
}

fn average_stay<'a, I>(bookings: I) -> Option<i64>
where
    I: Iterator<Item = &'a Booking>,
{
    let stays: Vec<i64> = bookings
        .filter_map(|booking| Some((booking.exit_time? - booking.entry_time?).whole_minutes()))
        .collect();
    if stays.is_empty() {
        return None;
    }
    let count: i64 = i64::try_from(stays.len()).unwrap_or(i64::MAX);
    Some(stays.iter().sum::<i64>() / count)
}

/// One user's booking and spending summary.
///
/// `total_spent_cents` counts settled payments only; `average_stay_minutes`
/// averages bookings with both an entry and an exit time and is `None`
/// until one exists.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub fn user_stats(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<UserStatsResponse, ApiError> {
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

    let history = persistence
        .booking_history(user_id)
        .map_err(translate_persistence_error)?;

    let total_bookings: usize = history.len();
    let completed_bookings: usize = history
        .iter()
        .filter(|entry| entry.booking.status == BookingStatus::Completed)
        .count();
    let total_spent_cents: i64 = history
        .iter()
        .filter_map(|entry| entry.payment.as_ref())
        .filter(|payment| payment.status == PaymentStatus::Paid)
        .map(|payment| payment.amount_cents)
        .sum();
    let average_stay_minutes: Option<i64> = average_stay(history.iter().map(|entry| &entry.booking));

    Ok(UserStatsResponse {
        user_id,
        total_bookings,
        completed_bookings,
        total_spent_cents,
        average_stay_minutes,
    })
}

/// Per-slot booking counts and average stay, busiest slots first.
///
/// Every slot gets a row, including slots that were never booked. Ties
/// on the booking count fall back to slot id order.
///
/// # Errors
///
/// Returns an error if the registry or ledger cannot be read.
pub fn slot_utilization(persistence: &mut Persistence) -> Result<SlotUtilizationResponse, ApiError> {
    let slots = persistence.list_slots().map_err(translate_persistence_error)?;
    let bookings = persistence
        .list_bookings()
        .map_err(translate_persistence_error)?;

    let mut rows: Vec<SlotUtilizationRow> = slots
        .iter()
        .map(|slot| {
            let on_slot: Vec<&Booking> = bookings
                .iter()
                .filter(|booking| booking.slot_id == slot.id)
                .collect();
            SlotUtilizationRow {
                slot_id: slot.id.clone(),
                total_bookings: on_slot.len(),
                completed_bookings: on_slot
                    .iter()
                    .filter(|booking| booking.status == BookingStatus::Completed)
                    .count(),
                cancelled_bookings: on_slot
                    .iter()
                    .filter(|booking| booking.status == BookingStatus::Cancelled)
                    .count(),
                average_stay_minutes: average_stay(on_slot.iter().copied()),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_bookings
            .cmp(&a.total_bookings)
            .then_with(|| a.slot_id.cmp(&b.slot_id))
    });
    Ok(SlotUtilizationResponse { slots: rows })
}
