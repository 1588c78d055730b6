//! Conflict validation for shortcut registration.
//!
//! A dispatch table must stay conflict-free by construction: duplicates would
//! make dispatch ambiguous, and prefix overlaps would make the longer
//! shortcut permanently unreachable, because a single-key shortcut fires
//! immediately on key-down with no lookahead. Validation therefore runs
//! synchronously whenever a shortcut is registered or edited, never at
//! dispatch time.

use crate::shortcut::NormalizedShortcut;

/// The verdict of checking one candidate shortcut against the registered set.
///
/// The `owner` in each conflict variant is the display name of the action
/// holding the conflicting registration, ready to be shown verbatim by a
/// settings UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictCheck {
    /// No conflict; the candidate may be registered.
    Ok,
    /// An existing action already uses exactly this shortcut.
    Duplicate {
        /// Display name of the action owning the existing registration.
        owner: String,
    },
    /// The candidate is a prefix of an existing two-key shortcut: accepting
    /// it would make the existing shortcut unreachable.
    CandidateIsPrefix {
        /// Display name of the action owning the longer shortcut.
        owner: String,
    },
    /// An existing single-key shortcut is a prefix of the candidate: the
    /// candidate could never fire.
    ExistingIsPrefix {
        /// Display name of the action owning the shorter shortcut.
        owner: String,
    },
}

impl ConflictCheck {
    /// Check if the candidate is free of conflicts.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Check whether `a` is a prefix of `b`.
///
/// A prefixes B iff their modifier sets are equal, A has exactly one
/// non-modifier key, B has exactly two, and A's key is one of B's. Key order
/// within B is irrelevant: the two keys of a sequence may arrive in either
/// order, so either one can be the first keystroke.
fn is_prefix_of(a: &NormalizedShortcut, b: &NormalizedShortcut) -> bool {
    a.modifiers() == b.modifiers()
        && a.key_count() == 1
        && b.key_count() == 2
        && b.keys().contains(&a.keys()[0])
}

/// Validate a candidate shortcut against the already-registered set.
///
/// `existing` yields each registered shortcut together with the display name
/// of its owning action. The first conflict found wins; exact duplicates are
/// reported ahead of prefix overlaps for the same entry.
pub fn check<'a, I>(candidate: &NormalizedShortcut, existing: I) -> ConflictCheck
where
    I: IntoIterator<Item = (&'a NormalizedShortcut, &'a str)>,
{
    for (registered, owner) in existing {
        if candidate == registered {
            return ConflictCheck::Duplicate {
                owner: owner.to_string(),
            };
        }
        if is_prefix_of(candidate, registered) {
            return ConflictCheck::CandidateIsPrefix {
                owner: owner.to_string(),
            };
        }
        if is_prefix_of(registered, candidate) {
            return ConflictCheck::ExistingIsPrefix {
                owner: owner.to_string(),
            };
        }
    }
    ConflictCheck::Ok
}
