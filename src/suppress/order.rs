//! Deterministic confidence ranking for suppression candidates.

use std::cmp::Ordering;

use crate::boxes::CornerBox;

/// Orders candidate indices by descending confidence.
///
/// Confidences compare with `f32::total_cmp`, so the order is total even with
/// NaN present (positive NaN ranks first). Signed zeros are folded together
/// first so `-0.0` and `0.0` tie. Equal confidences fall back to the input
/// index, which keeps ties in input order.
fn rank_cmp_desc(boxes: &[CornerBox], a: usize, b: usize) -> Ordering {
    rank_key(boxes[b].confidence)
        .total_cmp(&rank_key(boxes[a].confidence))
        .then_with(|| a.cmp(&b))
}

/// Maps `-0.0` to `0.0`; every other value, NaN included, is unchanged.
#[inline]
fn rank_key(confidence: f32) -> f32 {
    confidence + 0.0
}

/// Returns the indices of `boxes` from highest to lowest confidence.
pub(crate) fn rank_by_confidence(boxes: &[CornerBox]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| rank_cmp_desc(boxes, a, b));
    order
}
