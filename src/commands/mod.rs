// Register application commands.
// add-direnv-gotool has a single action, so there is a single module.

// Installs a Go tool into the direnv-managed project.
pub mod install;
