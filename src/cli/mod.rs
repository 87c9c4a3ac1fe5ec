// Command-line surface of add-direnv-gotool.
pub mod args;
