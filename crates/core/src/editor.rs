// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::{CommandOutcome, EditCommand};
use crate::error::SubmitError;
use crate::options::EditorOptions;
use crate::payload::{SavePayload, build_save_payload};
use crate::roster::Tombstones;
use crate::store::BookingStore;
use newsdesk_domain::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingDraft, BookingRecord,
    ConnectionDetails, EffectiveConnection, Guest, GuestRecord, ValidationReport,
    resolve_roster, validate, validate_shape,
};
use tracing::{debug, warn};

/// Normalizes a stored record into an editable draft.
///
/// - Missing scope defaults to unified, missing provisioning to shared.
/// - A per-guest scope forces per-guest provisioning.
/// - Guests are sorted by stored order and renumbered densely.
/// - With phone disabled, stored phone types are read as online.
#[must_use]
pub fn load_draft(record: BookingRecord, options: EditorOptions) -> BookingDraft {
    let appearance_scope: AppearanceScope = record.appearance_scope.unwrap_or_default();
    let access_provisioning: AccessProvisioning = if appearance_scope == AppearanceScope::PerGuest
    {
        AccessProvisioning::PerGuest
    } else {
        record.access_provisioning.unwrap_or_default()
    };

    let appearance_type: AppearanceType =
        coerce_for_options(record.appearance_type.unwrap_or_default(), options, &record.id);

    let mut guest_records: Vec<GuestRecord> = record.guests;
    guest_records.sort_by_key(|g| g.order);

    let guests: Vec<Guest> = guest_records
        .into_iter()
        .enumerate()
        .map(|(order, g)| Guest {
            appearance_type: coerce_for_options(
                g.appearance_type.unwrap_or_default(),
                options,
                &record.id,
            ),
            id: Some(g.id),
            person: g.person,
            order,
            connection: ConnectionDetails {
                join_url: g.join_url,
                venue_name: g.venue_name,
                venue_address: g.venue_address,
                dial_info: g.dial_info,
            },
            note: None,
        })
        .collect();

    BookingDraft {
        id: record.id,
        organization_id: record.organization_id,
        subject: record.subject,
        newsroom_name: record.newsroom_name,
        start_at: record.start_at,
        duration_minutes: i64::from(record.duration_minutes),
        appearance_scope,
        access_provisioning,
        appearance_type,
        location_url: record.location_url,
        location_name: record.location_name,
        location_address: record.location_address,
        dial_info: record.dial_info,
        host: record.host,
        guests,
        program_name: record.program_name,
        talking_points: record.talking_points,
    }
}

fn coerce_for_options(
    kind: AppearanceType,
    options: EditorOptions,
    booking_id: &str,
) -> AppearanceType {
    if options.allows(kind) {
        return kind;
    }
    warn!(
        booking_id = %booking_id,
        "Phone appearances are disabled; loading stored phone appearance as online"
    );
    kind.without_phone()
}

/// One edit session over one booking.
///
/// The editor owns the draft, the tombstones for guests removed during the
/// session, and the latest validation report. The report is recomputed
/// after every edit.
#[derive(Debug, Clone)]
pub struct BookingEditor {
    draft: BookingDraft,
    tombstones: Tombstones,
    report: ValidationReport,
    options: EditorOptions,
    /// The draft as captured by the outstanding submit.
    submitted: Option<BookingDraft>,
    last_error: Option<String>,
}

impl BookingEditor {
    /// Opens an editor on a stored record.
    #[must_use]
    pub fn load(record: BookingRecord, options: EditorOptions) -> Self {
        let draft: BookingDraft = load_draft(record, options);
        let report: ValidationReport = validate(&draft);
        Self {
            draft,
            tombstones: Tombstones::new(),
            report,
            options,
            submitted: None,
            last_error: None,
        }
    }

    /// The current draft.
    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Stored guest ids removed during this session.
    #[must_use]
    pub fn deleted_guest_ids(&self) -> &[String] {
        self.tombstones.ids()
    }

    /// The latest field validation report.
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// The feature flags this editor was opened with.
    #[must_use]
    pub const fn options(&self) -> EditorOptions {
        self.options
    }

    /// Whether a submit is outstanding.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitted.is_some()
    }

    /// The message from the last failed save, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Effective connection per guest, in roster order.
    #[must_use]
    pub fn effective_connections(&self) -> Vec<EffectiveConnection> {
        resolve_roster(&self.draft)
    }

    /// Applies one edit and revalidates.
    ///
    /// Edits are accepted while a submit is outstanding. They do not affect
    /// the payload that submit already captured, and they survive its
    /// successful completion.
    pub fn apply(&mut self, command: EditCommand) -> CommandOutcome {
        let name: &'static str = command.name();
        let outcome: CommandOutcome =
            apply(&mut self.draft, &mut self.tombstones, self.options, command);

        if outcome == CommandOutcome::Applied {
            self.report = validate(&self.draft);
        }

        debug!(
            booking_id = %self.draft.id,
            command = name,
            outcome = ?outcome,
            "Applied edit"
        );
        outcome
    }

    /// Validates and captures the save request.
    ///
    /// Shape is checked first and reported alone. Field violations are then
    /// stored on the editor for display and reported by their summary.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A submit is already outstanding
    /// - A primitive field is malformed
    /// - Required connection data is missing
    pub fn begin_submit(&mut self) -> Result<SavePayload, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }

        validate_shape(&self.draft)?;

        self.report = validate(&self.draft);
        if let Some(summary) = &self.report.summary {
            return Err(SubmitError::Invalid {
                summary: summary.clone(),
            });
        }

        let payload: SavePayload = build_save_payload(&self.draft, &self.tombstones)?;
        self.submitted = Some(self.draft.clone());
        self.last_error = None;

        debug!(
            booking_id = %payload.booking_id,
            guests = payload.guests.len(),
            deleted = payload.deleted_guest_ids.len(),
            "Captured save payload"
        );
        Ok(payload)
    }

    /// Completes an outstanding submit.
    ///
    /// On success the editor reloads from the stored record, which clears the
    /// tombstones. If the draft was edited while the save was outstanding,
    /// those edits are kept and only the stored guest ids are taken from the
    /// record. On failure the draft and tombstones are kept and the message
    /// is kept for display so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::NotSubmitting`] if no submit is outstanding, or
    /// [`SubmitError::Persistence`] carrying the store's message.
    pub fn finish_submit(
        &mut self,
        outcome: Result<BookingRecord, String>,
    ) -> Result<(), SubmitError> {
        if !self.is_submitting() {
            return Err(SubmitError::NotSubmitting);
        }

        match outcome {
            Ok(record) => {
                self.complete_submit(record);
                Ok(())
            }
            Err(message) => Err(self.fail_submit(message)),
        }
    }

    /// Validates, saves through `store`, and reloads from the stored record.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::begin_submit`] or the store.
    pub fn submit<S: BookingStore>(&mut self, store: &mut S) -> Result<BookingRecord, SubmitError> {
        let payload: SavePayload = self.begin_submit()?;

        match store.save_booking(&payload) {
            Ok(record) => {
                self.complete_submit(record.clone());
                Ok(record)
            }
            Err(err) => Err(self.fail_submit(err.to_string())),
        }
    }

    fn complete_submit(&mut self, record: BookingRecord) {
        let submitted: Option<BookingDraft> = self.submitted.take();
        if submitted.as_ref() == Some(&self.draft) {
            *self = Self::load(record, self.options);
            return;
        }

        // Keep the newer draft and adopt the ids the store now holds.
        for guest in &mut self.draft.guests {
            guest.id = record
                .guests
                .iter()
                .find(|stored| stored.person.id == guest.person.id)
                .map(|stored| stored.id.clone());
        }

        self.tombstones.clear();
        for stored in record.guests {
            if self.draft.guest_position(&stored.person.id).is_none() {
                self.tombstones.record(stored.id);
            }
        }

        self.report = validate(&self.draft);
        self.last_error = None;

        debug!(
            booking_id = %self.draft.id,
            deleted = self.tombstones.ids().len(),
            "Kept edits made while saving"
        );
    }

    fn fail_submit(&mut self, message: String) -> SubmitError {
        self.submitted = None;
        warn!(booking_id = %self.draft.id, error = %message, "Save failed");
        self.last_error = Some(message.clone());
        SubmitError::Persistence(message)
    }
}
