//! Classic greedy IoU non-maximum suppression.
//!
//! The working set is an owned list of indices ranked by confidence plus a
//! suppression mask. Input boxes are only borrowed; each call owns its own
//! scratch storage, so concurrent calls never share mutable state.
//!
//! Every kept box is compared against all lower-ranked survivors, giving
//! O(n²) IoU evaluations in the worst case. There is no spatial index.

use crate::boxes::CornerBox;
use crate::geometry::iou;
use crate::suppress::order::rank_by_confidence;
use crate::trace::trace_stage;

/// Selects the boxes that survive greedy suppression, as indices into `boxes`.
///
/// Indices are returned in descending-confidence order. A lower-ranked box is
/// discarded when its IoU with an already kept box is strictly greater than
/// `iou_threshold`; a box exactly at the threshold survives.
pub fn non_max_suppression_indices(boxes: &[CornerBox], iou_threshold: f32) -> Vec<usize> {
    if boxes.is_empty() {
        return Vec::new();
    }

    let order = rank_by_confidence(boxes);
    let mut suppressed = vec![false; boxes.len()];
    let mut kept = Vec::new();

    for (rank, &idx) in order.iter().enumerate() {
        if suppressed[idx] {
            continue;
        }
        kept.push(idx);
        let current = &boxes[idx];
        for &other in &order[rank + 1..] {
            if !suppressed[other] && iou(current, &boxes[other]) > iou_threshold {
                suppressed[other] = true;
            }
        }
    }

    trace_stage!(
        "nms",
        candidates = boxes.len(),
        kept = kept.len(),
        iou_threshold = iou_threshold
    );
    kept
}

/// Applies greedy non-maximum suppression and returns the surviving boxes.
///
/// The result is an ordered subset of `boxes` (highest confidence first);
/// no box is altered. Empty input yields an empty result.
pub fn non_max_suppression(boxes: &[CornerBox], iou_threshold: f32) -> Vec<CornerBox> {
    non_max_suppression_indices(boxes, iou_threshold)
        .into_iter()
        .map(|idx| boxes[idx])
        .collect()
}
