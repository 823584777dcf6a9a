//! Engine configuration.
//!
//! The only runtime knob is [`ComputeMode`], owned by each engine instance.
//! Snapshot format constants live here as well.

use serde::{Deserialize, Serialize};

/// Version written into every exported snapshot.
///
/// `load` rejects snapshots carrying any other version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Suffix of the uniquely named temporary file an export is written to
/// before being renamed over the target path.
pub const SNAPSHOT_TMP_SUFFIX: &str = ".tmp";

/// When the corpus-wide term statistics are recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComputeMode {
    /// Recompute after every added document.
    #[default]
    Eager,
    /// Defer recomputation until the next scoring call.
    Lazy,
}

impl ComputeMode {
    #[inline]
    pub fn compute_on_add(self) -> bool {
        matches!(self, ComputeMode::Eager)
    }
}

impl From<bool> for ComputeMode {
    /// `true` means compute on add.
    fn from(compute_on_add: bool) -> Self {
        if compute_on_add {
            ComputeMode::Eager
        } else {
            ComputeMode::Lazy
        }
    }
}
