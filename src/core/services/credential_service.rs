use crate::domain::{BudgetState, CredentialEntry};

use super::{ensure_index, ServiceError, ServiceResult};

pub struct CredentialService;

impl CredentialService {
    pub fn add(state: &mut BudgetState, entry: CredentialEntry) -> ServiceResult<usize> {
        if entry.service.is_empty() {
            return Err(ServiceError::Invalid(
                "a stored password needs a service name".into(),
            ));
        }
        state.passwords.push(entry);
        Ok(state.passwords.len() - 1)
    }

    /// Updates the entry at `index`; blank fields keep their current value.
    pub fn edit<'s>(
        state: &'s mut BudgetState,
        index: usize,
        service: &str,
        user: &str,
        secret: &str,
    ) -> ServiceResult<&'s CredentialEntry> {
        ensure_index("password", index, state.passwords.len())?;
        let merged = state.passwords[index].merged(service, user, secret);
        state.passwords[index] = merged;
        Ok(&state.passwords[index])
    }

    pub fn remove(state: &mut BudgetState, index: usize) -> ServiceResult<CredentialEntry> {
        ensure_index("password", index, state.passwords.len())?;
        Ok(state.passwords.remove(index))
    }
}
