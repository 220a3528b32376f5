//! Greedy overlap suppression.
//!
//! Includes the confidence ordering used to rank candidates and classic
//! IoU-based non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod order;
