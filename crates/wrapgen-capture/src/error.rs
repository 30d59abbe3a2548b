//! Error types for capture-time wrapping

use wrapgen_model::Iid;

/// Runtime wrapping failures
///
/// Null arguments are not errors; the entry points treat them as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WrapError {
    /// The id belongs to no family, or no family version could be obtained
    #[error("failed to wrap unsupported interface {iid} for capture")]
    UnsupportedInterface {
        /// Requested interface id
        iid: Iid,
        /// Family whose chain was exhausted; `None` for a dispatch miss
        family: Option<String>,
    },

    /// The native object rejected an interface query made through a proxy
    #[error("object does not implement interface {iid}")]
    NoInterface {
        /// Queried interface id
        iid: Iid,
    },
}

impl WrapError {
    /// Check if the caller must treat this as an unrecoverable capture condition
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedInterface { .. })
    }

    /// Interface id the failure concerns
    #[inline]
    #[must_use]
    pub fn iid(&self) -> Iid {
        match self {
            Self::UnsupportedInterface { iid, .. } | Self::NoInterface { iid } => *iid,
        }
    }
}
