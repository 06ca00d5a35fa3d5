// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use newsdesk_domain::AppearanceType;

/// Feature flags that shape how drafts are loaded and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Whether phone appearances may be selected.
    pub phone_enabled: bool,
}

impl EditorOptions {
    /// Returns whether `kind` may be selected under these options.
    #[must_use]
    pub const fn allows(&self, kind: AppearanceType) -> bool {
        self.phone_enabled || !matches!(kind, AppearanceType::Phone)
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            phone_enabled: true,
        }
    }
}
