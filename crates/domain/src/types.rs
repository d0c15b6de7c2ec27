// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core domain types for the smart parking facility.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The occupancy/reservation status of a physical parking slot.
///
/// A slot's status is a coordinated projection of the reservation ledger,
/// the latest sensor reading, and any administrative maintenance hold.
/// Maintenance takes precedence over everything; sensor-reported occupancy
/// supersedes reservation-only `Booked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// The slot is unreserved and unoccupied.
    Free,
    /// An active reservation claims the slot, but no vehicle is present yet.
    Booked,
    /// A sensor reports a vehicle physically present.
    Occupied,
    /// The slot is administratively withdrawn from service.
    Maintenance,
}

impl SlotStatus {
    /// Returns the canonical string form used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Booked => "booked",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }

    /// Parses a status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlotStatus` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "free" => Ok(Self::Free),
            "booked" => Ok(Self::Booked),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(DomainError::InvalidSlotStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle status of a booking.
///
/// `Completed` and `Cancelled` are terminal: a booking in either status
/// is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Reserved; the vehicle has not checked in.
    Active,
    /// The vehicle has checked in through the entrance gate.
    Entered,
    /// The vehicle has exited and the booking is billed.
    Completed,
    /// The reservation was released before completion.
    Cancelled,
}

impl BookingStatus {
    /// Returns the canonical string form used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Entered => "entered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingStatus` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "active" => Ok(Self::Active),
            "entered" => Ok(Self::Entered),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidBookingStatus(other.to_string())),
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The settlement status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Created at booking completion; awaiting settlement.
    Pending,
    /// Settled. A paid payment is immutable.
    Paid,
    /// Settlement failed; may be retried.
    Failed,
}

impl PaymentStatus {
    /// Returns the canonical string form used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentStatus` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(DomainError::InvalidPaymentStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account roles. Role enforcement is a flat boolean check; there is no
/// permission hierarchy beyond admin/consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Facility operator with override authority.
    Admin,
    /// Regular parking customer.
    Consumer,
}

impl Role {
    /// Returns the canonical string form used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Consumer => "consumer",
        }
    }

    /// Parses a role from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "admin" => Ok(Self::Admin),
            "consumer" => Ok(Self::Consumer),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// Identifies one of the two physical gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateId {
    /// The entrance gate.
    Entrance,
    /// The exit gate.
    Exit,
}

impl GateId {
    /// Returns the canonical string form used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entrance => "entrance",
            Self::Exit => "exit",
        }
    }

    /// Parses a gate identifier from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGate` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "entrance" => Ok(Self::Entrance),
            "exit" => Ok(Self::Exit),
            other => Err(DomainError::InvalidGate(other.to_string())),
        }
    }
}

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The transient open/closed state of one gate. Never persisted; every
/// gate is closed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    /// The gate is open and will auto-close at its pending deadline.
    Open,
    /// The gate is closed.
    Closed,
}

impl GateState {
    /// Returns the canonical string form used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Facility-wide availability, recomputed periodically from the slot
/// registry. Advisory only; never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotStatus {
    /// At least one slot is free.
    Available,
    /// No slot is free.
    Full,
}

impl LotStatus {
    /// Derives the lot status from the number of free slots.
    #[must_use]
    pub const fn from_free_count(free: usize) -> Self {
        if free > 0 { Self::Available } else { Self::Full }
    }

    /// Returns the canonical string form used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Full => "full",
        }
    }
}

/// One physical parking slot. Slots are provisioned at first boot and
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Unique slot identifier (e.g. `S1`).
    pub id: String,
    /// Current coordinated status.
    pub status: SlotStatus,
    /// Free-text category (e.g. `General`).
    pub category: String,
    /// Administrative maintenance flag.
    pub is_under_maintenance: bool,
    /// Timestamp of the last sensor update, if any.
    pub last_sensor_update: Option<OffsetDateTime>,
}

/// A user's reservation of one slot for a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Target slot.
    pub slot_id: String,
    /// Reserved window start.
    pub start_time: OffsetDateTime,
    /// Reserved window end (exclusive; `end_time > start_time`).
    pub end_time: OffsetDateTime,
    /// Actual check-in time. Set only on the active→entered transition.
    pub entry_time: Option<OffsetDateTime>,
    /// Actual exit time. Set only on the entered→completed transition.
    pub exit_time: Option<OffsetDateTime>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Vehicle registration, if supplied.
    pub vehicle_number: Option<String>,
    /// Contact phone number, if supplied.
    pub phone_number: Option<String>,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

/// A billable charge produced by a booking's entered→completed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: i64,
    /// The booking this payment settles.
    pub booking_id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Charged amount in integer cents.
    pub amount_cents: i64,
    /// Settlement status.
    pub status: PaymentStatus,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

/// A registered account. Credentials never leave the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique user identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Account role.
    pub role: Role,
}
