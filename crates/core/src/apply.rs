// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{CommandOutcome, EditCommand};
use crate::options::EditorOptions;
use crate::roster::{self, Tombstones};
use newsdesk_domain::{AccessProvisioning, AppearanceScope, AppearanceType, BookingDraft};

/// Applies one edit to a draft.
///
/// Edits never fail outright: an edit that cannot take effect reports
/// [`CommandOutcome::Unchanged`] or [`CommandOutcome::Rejected`] and leaves
/// the draft as it was.
///
/// # Arguments
///
/// * `draft` - The draft to edit
/// * `tombstones` - Stored guest ids removed so far in this session
/// * `options` - Feature flags in effect
/// * `command` - The edit to apply
pub fn apply(
    draft: &mut BookingDraft,
    tombstones: &mut Tombstones,
    options: EditorOptions,
    command: EditCommand,
) -> CommandOutcome {
    match command {
        EditCommand::SetSubject { value } => set_field(&mut draft.subject, value),
        EditCommand::SetNewsroomName { value } => set_field(&mut draft.newsroom_name, value),
        EditCommand::SetStartAt { value } => set_field(&mut draft.start_at, value),
        EditCommand::SetDuration { minutes } => set_field(&mut draft.duration_minutes, minutes),
        EditCommand::SetAppearanceScope { scope } => set_appearance_scope(draft, scope),
        EditCommand::SetAccessProvisioning { provisioning } => {
            // A per-guest scope pins provisioning to per-guest.
            let provisioning: AccessProvisioning =
                if draft.appearance_scope == AppearanceScope::PerGuest {
                    AccessProvisioning::PerGuest
                } else {
                    provisioning
                };
            set_field(&mut draft.access_provisioning, provisioning)
        }
        EditCommand::SetAppearanceType { appearance_type } => {
            if !options.allows(appearance_type) {
                return phone_disabled();
            }
            set_field(&mut draft.appearance_type, appearance_type)
        }
        EditCommand::SetLocationUrl { value } => set_field(&mut draft.location_url, value),
        EditCommand::SetLocationName { value } => set_field(&mut draft.location_name, value),
        EditCommand::SetLocationAddress { value } => {
            set_field(&mut draft.location_address, value)
        }
        EditCommand::SetDialInfo { value } => set_field(&mut draft.dial_info, value),
        EditCommand::SetHost { host } => set_field(&mut draft.host, host),
        EditCommand::SetProgramName { value } => set_field(&mut draft.program_name, value),
        EditCommand::SetTalkingPoints { value } => set_field(&mut draft.talking_points, value),
        EditCommand::AddGuest { person } => changed(roster::add_guest(draft, person)),
        EditCommand::RemoveGuest { index } => {
            changed(roster::remove_guest(draft, tombstones, index).is_some())
        }
        EditCommand::MoveGuest { from, to } => changed(roster::move_guest(draft, from, to)),
        EditCommand::PatchGuest { index, patch } => {
            if patch
                .appearance_type
                .is_some_and(|kind| !options.allows(kind))
            {
                return phone_disabled();
            }
            changed(roster::patch_guest(draft, index, patch))
        }
    }
}

/// Changes the appearance scope.
///
/// Moving to a per-guest scope forces per-guest provisioning in the same
/// step. Moving back to unified leaves provisioning as it is.
pub fn set_appearance_scope(draft: &mut BookingDraft, scope: AppearanceScope) -> CommandOutcome {
    let before: (AppearanceScope, AccessProvisioning) =
        (draft.appearance_scope, draft.access_provisioning);

    draft.appearance_scope = scope;
    if scope == AppearanceScope::PerGuest {
        draft.access_provisioning = AccessProvisioning::PerGuest;
    }

    changed(before != (draft.appearance_scope, draft.access_provisioning))
}

fn set_field<T: PartialEq>(field: &mut T, value: T) -> CommandOutcome {
    if *field == value {
        return CommandOutcome::Unchanged;
    }
    *field = value;
    CommandOutcome::Applied
}

const fn changed(did_change: bool) -> CommandOutcome {
    if did_change {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Unchanged
    }
}

fn phone_disabled() -> CommandOutcome {
    CommandOutcome::Rejected {
        reason: format!(
            "{} appearances are disabled",
            AppearanceType::Phone.as_str()
        ),
    }
}
