// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! Every multi-step check-then-write sequence runs inside one SQLite
//! transaction, so a rejected check leaves no partial state behind. The
//! durable log row for an operation is appended inside the same
//! transaction as the mutation it describes.

pub mod booking;
pub mod log;
pub mod payment;
pub mod sensor;
pub mod slot;

pub use sensor::SensorOutcome;
