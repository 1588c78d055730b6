//! Engine configuration.
//!
//! The settings collaborator persists one document: an ordered list of
//! shortcut-bound actions plus the modifier that arms the word-by-word
//! selection extender. Shortcuts serialize as their canonical wire-format
//! string (`"Ctrl+Alt+1+T"`), which is the only persisted representation.

use serde::{Deserialize, Serialize};

use lexibridge_core::{
    ActionKind, DispatchTable, Modifiers, NormalizedShortcut, RegisteredAction, RegistryError,
};

/// The modifier that, together with the arrow keys, drives word-by-word
/// selection extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendModifier {
    /// Control.
    Ctrl,
    /// Alt (the default; least likely to collide with native bindings).
    #[default]
    Alt,
    /// Shift.
    Shift,
    /// Meta / Super / Command.
    Meta,
}

impl ExtendModifier {
    /// The modifier set the engine matches key presses against.
    pub fn modifiers(self) -> Modifiers {
        match self {
            Self::Ctrl => Modifiers::CTRL,
            Self::Alt => Modifiers::ALT,
            Self::Shift => Modifiers::SHIFT,
            Self::Meta => Modifiers::META,
        }
    }
}

/// One configured action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// The canonical shortcut string.
    pub shortcut: NormalizedShortcut,
    /// Stable identifier handed to the transform collaborator.
    pub id: String,
    /// Human-readable name shown in conflict messages and notifications.
    pub name: String,
    /// What the action does.
    pub kind: ActionKind,
}

impl ActionConfig {
    fn to_action(&self) -> RegisteredAction {
        RegisteredAction {
            shortcut: self.shortcut.clone(),
            action_id: self.id.clone(),
            display_name: self.name.clone(),
            kind: self.kind,
        }
    }
}

/// The full engine configuration, as delivered by the settings collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shortcut-bound actions, in the user's configured order.
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
    /// The word-extension trigger modifier.
    #[serde(default)]
    pub extend_modifier: ExtendModifier,
}

impl EngineConfig {
    /// Parse a configuration from its persisted JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to its persisted JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build the dispatch table, failing on the first conflicting entry.
    pub fn build_table(&self) -> Result<DispatchTable, RegistryError> {
        DispatchTable::build(self.actions.iter().map(ActionConfig::to_action).collect())
    }

    /// Report every conflicting entry in the list, not just the first.
    ///
    /// Conflicting entries are skipped and later entries are validated
    /// against the surviving set, so the settings UI can show the user the
    /// complete damage in one pass.
    pub fn validate(&self) -> Vec<RegistryError> {
        let mut table = DispatchTable::new();
        let mut errors = Vec::new();
        for action in &self.actions {
            if let Err(err) = table.register(action.to_action()) {
                errors.push(err);
            }
        }
        errors
    }
}
