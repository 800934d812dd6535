//! Reconciliation of server snapshots with in-progress edits
//!
//! Transient edit state is kept outside the persisted entity: a table row
//! is the canonical entity plus an optional draft. When a background
//! reload lands while a row is being edited, the local draft wins until
//! the edit is saved; a row that is mid-save takes the server echo.

use shared::Entity;

/// Transient edit state of one table row
#[derive(Debug, Clone, PartialEq)]
pub struct EditState<T> {
    /// The user's uncommitted field values
    pub draft: T,
    /// True once the save request is in flight; the next snapshot wins
    pub saving: bool,
}

/// One row of an admin table: canonical entity plus optional edit
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<T> {
    pub entity: T,
    pub edit: Option<EditState<T>>,
}

impl<T: Entity + Clone> RowView<T> {
    pub fn committed(entity: T) -> Self {
        Self { entity, edit: None }
    }

    /// Open an edit with the current entity as the draft
    pub fn begin_edit(&mut self) {
        if self.edit.is_none() {
            self.edit = Some(EditState {
                draft: self.entity.clone(),
                saving: false,
            });
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Recompute the save gate from a required-field conjunction
    pub fn can_save(&self, validate: impl Fn(&T) -> Result<(), &'static str>) -> bool {
        match &self.edit {
            Some(edit) => !edit.saving && validate(&edit.draft).is_ok(),
            None => false,
        }
    }
}

/// A brand-new row that only exists client-side until saved
pub fn new_row<T: Entity + Clone>(draft: T) -> RowView<T> {
    RowView {
        entity: draft.clone(),
        edit: Some(EditState {
            draft,
            saving: false,
        }),
    }
}

/// Merge a fresh server snapshot with the current row set.
///
/// Conflict policy: a local draft wins while `editing && !saving`; a row
/// mid-save takes the server echo; server-deleted rows drop unless an
/// unsaved local edit still references them; unsaved new rows (empty ID)
/// stay at the end in their original order.
pub fn merge_rows<T: Entity + Clone>(server: &[T], local: Vec<RowView<T>>) -> Vec<RowView<T>> {
    let mut pending: Vec<(String, EditState<T>)> = Vec::new();
    let mut new_rows: Vec<RowView<T>> = Vec::new();

    for row in local {
        let id = row.entity.id().to_string();
        match row.edit {
            Some(edit) if !edit.saving => {
                if id.is_empty() {
                    new_rows.push(RowView {
                        entity: row.entity,
                        edit: Some(edit),
                    });
                } else {
                    pending.push((id, edit));
                }
            }
            // Saving or committed rows are rebuilt from the snapshot
            _ => {}
        }
    }

    let mut merged: Vec<RowView<T>> = server
        .iter()
        .map(|entity| {
            let edit = pending
                .iter()
                .position(|(id, _)| id == entity.id())
                .map(|at| pending.swap_remove(at).1);
            RowView {
                entity: entity.clone(),
                edit,
            }
        })
        .collect();

    // Unsaved edits whose entity vanished server-side are kept visible so
    // the edit is not silently discarded
    for (_, edit) in pending {
        merged.push(RowView {
            entity: edit.draft.clone(),
            edit: Some(edit),
        });
    }

    merged.extend(new_rows);
    merged
}
