// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `bookings` creates bookings and applies save requests
//! - `people` maintains the person directory

pub mod bookings;
pub mod people;
