use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::AppError;
use crate::models::EntityKind;

/// Lifecycle of one status-change dialog. A successful submission closes
/// the dialog; a failed one returns it to editing so the admin can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Editing,
    Submitting,
    Closed,
}

impl DialogState {
    /// Move into Submitting. Rejected only while a submission is already
    /// on the wire; a closed dialog counts as reopened.
    pub fn submit(self) -> Result<DialogState, AppError> {
        match self {
            DialogState::Submitting => Err(AppError::InFlight),
            _ => Ok(DialogState::Submitting),
        }
    }

    pub fn resolve(self, success: bool) -> DialogState {
        if success {
            DialogState::Closed
        } else {
            DialogState::Editing
        }
    }
}

/// One dialog per (list, row). Guarantees a single in-flight submission
/// per dialog instance; entries disappear once a submission succeeds.
#[derive(Debug)]
pub struct DialogRegistry {
    dialogs: Mutex<HashMap<(EntityKind, i64), DialogState>>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self {
            dialogs: Mutex::new(HashMap::new()),
        }
    }

    /// Claim the dialog for one submission. The claim lasts until the
    /// returned guard is resolved or dropped.
    pub fn begin(&self, kind: EntityKind, id: i64) -> Result<SubmitGuard<'_>, AppError> {
        let mut dialogs = self.dialogs.lock().unwrap();
        let entry = dialogs.entry((kind, id)).or_insert(DialogState::Editing);
        *entry = entry.submit()?;
        Ok(SubmitGuard {
            registry: self,
            key: (kind, id),
            resolved: false,
        })
    }

    fn settle(&self, key: (EntityKind, i64), success: bool) {
        let mut dialogs = self.dialogs.lock().unwrap();
        if success {
            dialogs.remove(&key);
        } else if let Some(entry) = dialogs.get_mut(&key) {
            *entry = entry.resolve(false);
        }
    }

    pub fn state(&self, kind: EntityKind, id: i64) -> DialogState {
        self.dialogs
            .lock()
            .unwrap()
            .get(&(kind, id))
            .copied()
            .unwrap_or(DialogState::Idle)
    }
}

impl Default for DialogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive claim on a dialog while its submission is on the wire.
/// `resolve(true)` closes the dialog; `resolve(false)` returns it to
/// editing. Dropping an unresolved guard counts as a failed submission,
/// so a request abandoned mid-flight releases its claim.
#[derive(Debug)]
pub struct SubmitGuard<'a> {
    registry: &'a DialogRegistry,
    key: (EntityKind, i64),
    resolved: bool,
}

impl SubmitGuard<'_> {
    pub fn resolve(mut self, success: bool) {
        self.resolved = true;
        self.registry.settle(self.key, success);
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.registry.settle(self.key, false);
        }
    }
}
