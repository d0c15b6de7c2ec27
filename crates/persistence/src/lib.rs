// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the parking facility service.
//!
//! Diesel + `SQLite` with embedded migrations. The adapter owns one
//! connection; callers serialize access (the server wraps it in an
//! `Arc<tokio::Mutex<_>>`). Check-then-write sequences run inside
//! `SQLite` transactions, so a rejected check never leaves partial
//! state.
//!
//! In-memory databases get a unique shared name per construction so
//! tests are isolated; file-backed databases run in WAL mode.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use parkd_domain::{Booking, Payment, Slot, SlotStatus, UserAccount};
use parkd_events::SystemEvent;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod bootstrap;
mod data_models;
mod error;
mod mutations;
mod queries;
mod schema;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{BookingWithPayment, SystemLogRow, UserCredentials};
pub use error::PersistenceError;
pub use mutations::SensorOutcome;
pub use queries::RevenueSummary;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the parking facility store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database, migrated and seeded.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        bootstrap::seed_defaults(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database, migrated and seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        bootstrap::seed_defaults(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Retrieves a user's credential row by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        queries::user::find_user_by_username(&mut self.conn, username)
    }

    /// Retrieves a user's public account view by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserAccount>, PersistenceError> {
        queries::user::get_user(&mut self.conn, user_id)
    }

    // ========================================================================
    // Slots
    // ========================================================================

    /// Lists all slots ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots(&mut self) -> Result<Vec<Slot>, PersistenceError> {
        queries::slot::list_slots(&mut self.conn)
    }

    /// Retrieves one slot.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound` if the slot does not exist.
    pub fn get_slot(&mut self, slot_id: &str) -> Result<Slot, PersistenceError> {
        queries::slot::get_slot(&mut self.conn, slot_id)
    }

    /// Counts slots currently `free`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn free_slot_count(&mut self) -> Result<i64, PersistenceError> {
        queries::slot::free_slot_count(&mut self.conn)
    }

    /// Sets a slot's status, logging the transition. Idempotent.
    ///
    /// Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound` if the slot does not exist.
    pub fn set_slot_status(
        &mut self,
        slot_id: &str,
        new_status: SlotStatus,
        cause: &str,
        now: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        mutations::slot::set_slot_status(&mut self.conn, slot_id, new_status, cause, now)
    }

    /// Force-cancels the live bookings on a slot and sets it `free`.
    ///
    /// Returns the number of bookings cancelled.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound` if the slot does not exist.
    pub fn admin_override_free(
        &mut self,
        slot_id: &str,
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        mutations::booking::admin_override_free(&mut self.conn, slot_id, now)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Creates a booking and reserves its slot, atomically.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound` for an unknown slot and
    /// `Rule(BookingConflict)` for an overlapping window.
    #[allow(clippy::too_many_arguments)]
    pub fn create_booking(
        &mut self,
        user_id: i64,
        slot_id: &str,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
        vehicle_number: Option<&str>,
        phone_number: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<Booking, PersistenceError> {
        mutations::booking::create_booking(
            &mut self.conn,
            user_id,
            slot_id,
            start_time,
            end_time,
            vehicle_number,
            phone_number,
            now,
        )
    }

    /// Cancels a booking and releases its reservation.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` for an unknown ID and
    /// `Rule(BookingTerminal)` if the booking is already terminal.
    pub fn cancel_booking(
        &mut self,
        booking_id: i64,
        reason: &str,
        now: OffsetDateTime,
    ) -> Result<Booking, PersistenceError> {
        mutations::booking::cancel_booking(&mut self.conn, booking_id, reason, now)
    }

    /// Marks a booking entered and records the entry time.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` for an unknown ID and
    /// `Rule(InvalidTransition)` unless the booking is `active`.
    pub fn mark_entered(
        &mut self,
        booking_id: i64,
        now: OffsetDateTime,
    ) -> Result<Booking, PersistenceError> {
        mutations::booking::mark_entered(&mut self.conn, booking_id, now)
    }

    /// Cancels every `active` booking whose grace window has expired.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial scan query fails.
    pub fn auto_cancel_expired(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<Vec<Booking>, PersistenceError> {
        mutations::booking::auto_cancel_expired(&mut self.conn, now)
    }

    /// Lists all bookings ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::booking::list_bookings(&mut self.conn)
    }

    /// Retrieves one booking.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if the booking does not exist.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::booking::get_booking(&mut self.conn, booking_id)
    }

    /// Lists one user's bookings joined with their payments, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn booking_history(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<BookingWithPayment>, PersistenceError> {
        queries::booking::booking_history(&mut self.conn, user_id)
    }

    // ========================================================================
    // Sensors
    // ========================================================================

    /// Folds one occupancy reading into the store.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound` for an unknown slot or a storage error.
    pub fn apply_sensor_reading(
        &mut self,
        slot_id: &str,
        occupied: bool,
        now: OffsetDateTime,
    ) -> Result<SensorOutcome, PersistenceError> {
        mutations::sensor::apply_sensor_reading(&mut self.conn, slot_id, occupied, now)
    }

    // ========================================================================
    // Payments
    // ========================================================================

    /// Settles a pending payment owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` for an unknown, foreign, or settled
    /// payment.
    pub fn settle_payment(
        &mut self,
        payment_id: i64,
        user_id: i64,
        now: OffsetDateTime,
    ) -> Result<Payment, PersistenceError> {
        mutations::payment::settle_payment(&mut self.conn, payment_id, user_id, now)
    }

    /// Totals the settled payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn revenue_summary(&mut self) -> Result<RevenueSummary, PersistenceError> {
        queries::payment::revenue_summary(&mut self.conn)
    }

    // ========================================================================
    // System log
    // ========================================================================

    /// Appends one entry to the durable system log.
    ///
    /// Used for events with no accompanying mutation (auth attempts,
    /// gate activity, drive-up decisions); mutations append their own
    /// entries transactionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_log(&mut self, event: &SystemEvent) -> Result<(), PersistenceError> {
        mutations::log::append_event(&mut self.conn, event)
    }

    /// Lists all system log entries in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_logs(&mut self) -> Result<Vec<SystemLogRow>, PersistenceError> {
        queries::log::list_logs(&mut self.conn)
    }

    /// Lists the log entries carrying a given event tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn logs_for_event(&mut self, event: &str) -> Result<Vec<SystemLogRow>, PersistenceError> {
        queries::log::logs_for_event(&mut self.conn, event)
    }
}
