//! Read-permission gate
//!
//! Answers "may the invoking process read this path" without opening the
//! file. A nonexistent path reports no access, the same as a permission
//! failure; callers see one gate decision either way.

use std::path::Path;

use nix::unistd::{access, AccessFlags};

/// Read-access decision for a path
pub trait ReadAccess {
    /// Reports whether the invoking process may read `path`.
    /// Must be side-effect-free and must not open the file.
    fn can_read(&self, path: &Path) -> bool;
}

/// Gate backed by `access(2)` with `R_OK`; no file handle is created
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAccess;

impl ReadAccess for SystemAccess {
    fn can_read(&self, path: &Path) -> bool {
        access(path, AccessFlags::R_OK).is_ok()
    }
}
