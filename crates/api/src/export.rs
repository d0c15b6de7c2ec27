// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the booking ledger.
//!
//! The export is a read-only snapshot; it never mutates canonical
//! state. An optional date range keeps only bookings whose window
//! starts inside the range (both bounds inclusive).

use parkd_domain::{Booking, format_rfc3339, parse_rfc3339};
use parkd_persistence::Persistence;
use time::OffsetDateTime;

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::ExportQuery;

/// Failures while rendering the CSV document itself.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
    /// The CSV buffer could not be recovered from the writer.
    #[error("Failed to finish CSV document: {0}")]
    Buffer(String),
    /// The rendered document was not valid UTF-8.
    #[error("Exported CSV was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Column order of the exported document.
const HEADER: &[&str] = &[
    "booking_id",
    "user_id",
    "slot_id",
    "status",
    "start_time",
    "end_time",
    "entry_time",
    "exit_time",
    "vehicle_number",
    "phone_number",
    "created_at",
];

fn parse_bound(value: Option<&str>, field: &str) -> Result<Option<OffsetDateTime>, ApiError> {
    value
        .map(|raw| {
            parse_rfc3339(raw).map_err(|e| ApiError::InvalidInput {
                field: String::from(field),
                message: e.to_string(),
            })
        })
        .transpose()
}

fn timestamp_cell(value: Option<OffsetDateTime>) -> Result<String, ApiError> {
    value.map_or_else(
        || Ok(String::new()),
        |ts| {
            format_rfc3339(ts).map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })
        },
    )
}

fn write_document(bookings: &[Booking]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, bookings)?;
    let buffer: Vec<u8> = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let document: String = String::from_utf8(buffer).map_err(ExportError::from)?;
    Ok(document)
}

fn write_rows(writer: &mut csv::Writer<Vec<u8>>, bookings: &[Booking]) -> Result<(), ApiError> {
    writer.write_record(HEADER).map_err(ExportError::from)?;
    for booking in bookings {
        writer
            .write_record([
                booking.id.to_string(),
                booking.user_id.to_string(),
                booking.slot_id.clone(),
                String::from(booking.status.as_str()),
                timestamp_cell(Some(booking.start_time))?,
                timestamp_cell(Some(booking.end_time))?,
                timestamp_cell(booking.entry_time)?,
                timestamp_cell(booking.exit_time)?,
                booking.vehicle_number.clone().unwrap_or_default(),
                booking.phone_number.clone().unwrap_or_default(),
                timestamp_cell(Some(booking.created_at))?,
            ])
            .map_err(ExportError::from)?;
    }
    Ok(())
}

/// Renders the booking ledger as a CSV document.
///
/// # Errors
///
/// Returns `InvalidInput` for an unparsable date bound and `Internal`
/// if the document cannot be rendered.
pub fn export_bookings_csv(
    persistence: &mut Persistence,
    query: &ExportQuery,
) -> Result<String, ApiError> {
    let start: Option<OffsetDateTime> = parse_bound(query.start_date.as_deref(), "start_date")?;
    let end: Option<OffsetDateTime> = parse_bound(query.end_date.as_deref(), "end_date")?;

    let bookings: Vec<Booking> = persistence
        .list_bookings()
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter(|booking| start.is_none_or(|bound| booking.start_time >= bound))
        .filter(|booking| end.is_none_or(|bound| booking.start_time <= bound))
        .collect();

    write_document(&bookings)
}
