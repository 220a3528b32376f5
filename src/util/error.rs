//! Error types for boxsieve.

use thiserror::Error;

/// Result alias for boxsieve operations.
pub type BoxSieveResult<T> = std::result::Result<T, BoxSieveError>;

/// Errors raised when a caller violates the input contract.
///
/// Degenerate geometry and empty inputs are never errors; only malformed
/// tensors and invalid configuration are reported.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoxSieveError {
    /// The detection tensor does not have exactly three dimensions.
    #[error("detection tensor must have rank 3 [batch, channels, anchors], got rank {rank}")]
    InvalidRank { rank: usize },
    /// The channel dimension is not the fixed `(x, y, width, height, confidence)` layout.
    #[error("detection tensor must have {expected} channels per anchor, got {got}")]
    ChannelMismatch { expected: usize, got: usize },
    /// The element count implied by the shape does not fit in `usize`.
    #[error("detection tensor shape [{batch}, {channels}, {anchors}] overflows")]
    DimensionOverflow {
        batch: usize,
        channels: usize,
        anchors: usize,
    },
    /// The backing buffer length disagrees with the declared shape.
    #[error("detection buffer holds {got} values, shape requires {needed}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A post-processing parameter is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}
