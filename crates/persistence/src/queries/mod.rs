// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side operations. Every function takes a connection and returns
//! decoded domain values; nothing here mutates.

pub mod booking;
pub mod log;
pub mod payment;
pub mod slot;
pub mod user;

pub use payment::RevenueSummary;
