// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `bookings` loads a booking with its guests
//! - `people` serves the guest and host pickers

pub mod bookings;
pub mod people;
