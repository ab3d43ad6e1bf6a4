pub mod finance;
pub mod records;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in finance::definitions()
        .into_iter()
        .chain(records::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage.replace('\n', " | ")))
}
