use crate::{
    hydrate::{self, HydrateError},
    placeholders::PlaceholderMap,
    stacks::{self, InstallOptions, Stack, StackError},
};
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GuardgenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Hydrate(#[from] HydrateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Stack(#[from] StackError),
}

/// Installs the auth scaffolding for `guard`: resolves the stack (prompting
/// when `stack` is `None`), rebuilds the hydrated `.stubs` tree next to
/// `stubs_dir`, then copies the selected stack's subtree into `app_root`.
///
/// # Errors
///
/// Returns a [`GuardgenError`] if:
///
/// - The stack prompt fails or is canceled.
/// - The previous `.stubs` output cannot be removed.
/// - A stub cannot be read, or a hydrated file cannot be written.
/// - The hydrated tree has no subtree for the selected stack.
/// - The installer cannot write into the application tree.
pub fn install(
    guard: &str,
    stubs_dir: &Path,
    app_root: &Path,
    stack: Option<Stack>,
    options: InstallOptions,
) -> Result<(), GuardgenError> {
    let stack = match stack {
        Some(stack) => stack,
        None => stacks::prompt_stack()?,
    };

    let placeholders = PlaceholderMap::for_guard(guard);

    let output_root = hydrate::output_root(stubs_dir);

    log::debug!(
        "hydrating stubs from {} into {}",
        stubs_dir.display(),
        output_root.display()
    );

    hydrate::reset_output(&output_root)?;

    let written = hydrate::hydrate(stubs_dir, &output_root, &placeholders)?;

    log::debug!("hydrated {} files for guard '{}'", written, guard);

    stacks::install(stack, &output_root, app_root, &options)?;

    Ok(())
}
