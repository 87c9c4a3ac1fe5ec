// Adapters for the external programs the installer drives.
//
// `pub(crate) mod <module_name>;` keeps the adapters internal to this binary.

/// Declares the `direnv` module, which asks direnv which `.envrc` governs
/// the current directory.
pub(crate) mod direnv;

/// Declares the `go` module, which wraps `go mod` and `go get -tool`.
pub(crate) mod go;
