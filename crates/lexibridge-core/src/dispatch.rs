//! The shortcut dispatch table.
//!
//! The table maps [`NormalizedShortcut`]s to registered actions. It is
//! rebuilt wholesale whenever the external configuration changes; the rebuild
//! validates every entry with the conflict checker, so a successfully built
//! table is conflict-free by construction and dispatch never needs to
//! disambiguate.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conflict::{self, ConflictCheck};
use crate::logging::targets;
use crate::shortcut::NormalizedShortcut;

/// The kind of text operation an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Dictionary/engine translation into a configured target language.
    Translation,
    /// Local stylistic transformation (lookup tables, pure functions).
    Transformation,
    /// Network-backed rewrite driven by a configured prompt.
    LlmPrompt,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::Transformation => write!(f, "transformation"),
            Self::LlmPrompt => write!(f, "llm_prompt"),
        }
    }
}

/// An action bound to a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAction {
    /// The canonical shortcut that triggers this action.
    pub shortcut: NormalizedShortcut,
    /// Stable identifier used by the transform collaborator.
    pub action_id: String,
    /// Human-readable name, used in conflict messages and notifications.
    pub display_name: String,
    /// What the action does to the text.
    pub kind: ActionKind,
}

/// Error raised when a table rebuild encounters a conflicting entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError {
    /// Display name of the action that could not be registered.
    pub rejected: String,
    /// The shortcut it attempted to claim.
    pub shortcut: String,
    /// The conflict that blocked it.
    pub conflict: ConflictCheck,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.conflict {
            ConflictCheck::Duplicate { owner } => write!(
                f,
                "shortcut {} for \"{}\" is already used by \"{owner}\"",
                self.shortcut, self.rejected
            ),
            ConflictCheck::CandidateIsPrefix { owner } => write!(
                f,
                "shortcut {} for \"{}\" would make the longer shortcut of \"{owner}\" unreachable",
                self.shortcut, self.rejected
            ),
            ConflictCheck::ExistingIsPrefix { owner } => write!(
                f,
                "shortcut {} for \"{}\" can never fire: \"{owner}\" already owns its first keystroke",
                self.shortcut, self.rejected
            ),
            ConflictCheck::Ok => write!(
                f,
                "shortcut {} for \"{}\" was rejected",
                self.shortcut, self.rejected
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

// =============================================================================
// Dispatch Table
// =============================================================================

/// A conflict-free mapping from normalized shortcuts to actions.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: HashMap<NormalizedShortcut, RegisteredAction>,
}

impl DispatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from an ordered action list, validating each entry
    /// against those registered before it.
    ///
    /// The first conflicting entry aborts the build; the configuration UI is
    /// expected to have blocked the save, so hitting this at rebuild time
    /// means the persisted configuration is corrupt.
    pub fn build(actions: Vec<RegisteredAction>) -> Result<Self, RegistryError> {
        let mut table = Self::new();
        for action in actions {
            table.register(action)?;
        }
        tracing::debug!(
            target: targets::DISPATCH,
            entries = table.entries.len(),
            "dispatch table rebuilt"
        );
        Ok(table)
    }

    /// Register a single action, validating against the current entries.
    pub fn register(&mut self, action: RegisteredAction) -> Result<(), RegistryError> {
        let verdict = conflict::check(
            &action.shortcut,
            self.entries
                .values()
                .map(|a| (&a.shortcut, a.display_name.as_str())),
        );
        if !verdict.is_ok() {
            return Err(RegistryError {
                rejected: action.display_name,
                shortcut: action.shortcut.as_str().to_string(),
                conflict: verdict,
            });
        }
        self.entries.insert(action.shortcut.clone(), action);
        Ok(())
    }

    /// Validate a candidate shortcut without registering it.
    ///
    /// This is the pure function the settings UI consumes to block saves.
    pub fn check_candidate(&self, candidate: &NormalizedShortcut) -> ConflictCheck {
        conflict::check(
            candidate,
            self.entries
                .values()
                .map(|a| (&a.shortcut, a.display_name.as_str())),
        )
    }

    /// Look up the action for a normalized shortcut.
    pub fn get(&self, shortcut: &NormalizedShortcut) -> Option<&RegisteredAction> {
        self.entries.get(shortcut)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered actions.
    pub fn actions(&self) -> impl Iterator<Item = &RegisteredAction> {
        self.entries.values()
    }
}
