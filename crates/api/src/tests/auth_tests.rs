// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_outsider, create_test_producer, create_test_viewer};
use crate::{AuthError, AuthorizationService, Role, Viewer};
use std::str::FromStr;

#[test]
fn test_role_parses_case_insensitively() {
    assert_eq!(Role::from_str("Producer").unwrap(), Role::Producer);
    assert_eq!(Role::from_str(" admin ").unwrap(), Role::Admin);
    assert!(matches!(
        Role::from_str("editor"),
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_members_can_view_their_organization() {
    let contributor: Viewer = create_test_viewer("contrib-1", Role::Contributor);

    assert!(AuthorizationService::authorize_view_booking(&contributor, "org-1").is_ok());
    assert!(AuthorizationService::authorize_view_booking(&contributor, "org-2").is_err());
}

#[test]
fn test_admin_can_view_and_edit_any_organization() {
    let admin: Viewer = Viewer::new(String::from("admin-1"), Role::Admin, Vec::new());

    assert!(AuthorizationService::authorize_view_booking(&admin, "org-7").is_ok());
    assert!(AuthorizationService::authorize_edit_booking(&admin, "org-7").is_ok());
}

#[test]
fn test_contributor_cannot_edit() {
    let contributor: Viewer = create_test_viewer("contrib-1", Role::Contributor);

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_edit_booking(&contributor, "org-1");

    assert_eq!(
        result,
        Err(AuthError::Unauthorized {
            action: String::from("edit_booking"),
            required_role: String::from("Admin or Producer"),
        })
    );
}

#[test]
fn test_producer_edits_only_own_organization() {
    assert!(AuthorizationService::authorize_edit_booking(&create_test_producer(), "org-1").is_ok());
    assert!(
        AuthorizationService::authorize_edit_booking(&create_test_outsider(), "org-1").is_err()
    );
}

#[test]
fn test_session_owner_check() {
    let producer: Viewer = create_test_producer();

    assert!(AuthorizationService::authorize_session_owner(&producer, "producer-1").is_ok());
    assert!(AuthorizationService::authorize_session_owner(&producer, "producer-2").is_err());
}

#[test]
fn test_contributor_cannot_search_directory() {
    let contributor: Viewer = create_test_viewer("contrib-1", Role::Contributor);

    assert!(AuthorizationService::authorize_directory_search(&contributor).is_err());
    assert!(AuthorizationService::authorize_directory_search(&create_test_producer()).is_ok());
}

#[test]
fn test_unauthorized_display() {
    let err: AuthError = AuthError::Unauthorized {
        action: String::from("edit_booking"),
        required_role: String::from("Admin or Producer"),
    };

    assert_eq!(
        err.to_string(),
        "Unauthorized: 'edit_booking' requires Admin or Producer"
    );
}
