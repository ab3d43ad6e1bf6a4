use crate::domain::{BudgetState, Note};

use super::{ensure_index, ServiceResult};

pub struct NoteService;

impl NoteService {
    pub fn add(state: &mut BudgetState, note: Note) -> ServiceResult<usize> {
        state.notes.push(note);
        Ok(state.notes.len() - 1)
    }

    /// Updates the note at `index`; blank fields keep their current text.
    pub fn edit<'s>(
        state: &'s mut BudgetState,
        index: usize,
        title: &str,
        content: &str,
    ) -> ServiceResult<&'s Note> {
        ensure_index("note", index, state.notes.len())?;
        let merged = state.notes[index].merged(title, content);
        state.notes[index] = merged;
        Ok(&state.notes[index])
    }

    pub fn remove(state: &mut BudgetState, index: usize) -> ServiceResult<Note> {
        ensure_index("note", index, state.notes.len())?;
        Ok(state.notes.remove(index))
    }
}
