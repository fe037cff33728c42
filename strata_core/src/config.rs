// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styler configuration.

/// What to do when a transform slot holds an object Strata did not install.
///
/// Passed to the store via [`StylerConfig::foreign_slots`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForeignSlotPolicy {
    /// Panic. Another code path is mutating a slot Strata owns, which is a
    /// programming error in the embedding system.
    #[default]
    Fatal,
    /// Replace the foreign object and report it through the trace sink.
    ///
    /// Intended for hosts that do not honor single-owner slots.
    Overwrite,
}

/// Configuration for a [`Styler`](crate::styler::Styler) or
/// [`StyleStore`](crate::store::StyleStore).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StylerConfig {
    /// Policy for foreign transform/projection slot occupants.
    pub foreign_slots: ForeignSlotPolicy,
}

impl StylerConfig {
    /// Strict configuration: foreign slot occupants are fatal.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            foreign_slots: ForeignSlotPolicy::Fatal,
        }
    }

    /// Lenient configuration: foreign slot occupants are overwritten.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            foreign_slots: ForeignSlotPolicy::Overwrite,
        }
    }
}
