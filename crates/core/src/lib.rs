// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Booking draft editing.
//!
//! A [`BookingEditor`] owns one draft loaded from a stored record. Every
//! change arrives as an [`EditCommand`]; submitting validates the draft,
//! builds a [`SavePayload`], and hands it to a [`BookingStore`].

mod apply;
mod command;
mod directory;
mod editor;
mod error;
mod options;
mod payload;
mod roster;
mod store;

#[cfg(test)]
mod tests;

pub use apply::{apply, set_appearance_scope};
pub use command::{CommandOutcome, EditCommand, GuestPatch};
pub use directory::{
    PersonDirectory, SearchMode, TimeWindow, merge_directory_results, search_directory,
};
pub use editor::{BookingEditor, load_draft};
pub use error::SubmitError;
pub use options::EditorOptions;
pub use payload::{GuestPayload, SavePayload, build_save_payload};
pub use roster::{Tombstones, add_guest, move_guest, patch_guest, reindex, remove_guest};
pub use store::{BookingStore, StoreError};
