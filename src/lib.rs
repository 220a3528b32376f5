//! boxsieve turns raw object-detector output into a clean set of boxes.
//!
//! The pipeline decodes `[batch, 5, anchors]` tensors into center-form boxes
//! above a confidence threshold, converts them to corner form, and removes
//! redundant overlaps with classic greedy IoU non-maximum suppression. All
//! stages are synchronous, allocation-local and free of shared state.

pub mod boxes;
pub mod decode;
pub mod geometry;
pub mod pipeline;
mod suppress;
mod trace;
pub mod util;

pub use boxes::convert::center_to_corner;
pub use boxes::{CenterBox, CornerBox};
pub use decode::{decode_center_boxes, DetectionTensor, DETECTION_CHANNELS};
pub use geometry::{area, intersection_area, iou, union_area};
pub use pipeline::{process_detections, PostProcessConfig, PostProcessor};
pub use suppress::nms::{non_max_suppression, non_max_suppression_indices};
pub use util::{BoxSieveError, BoxSieveResult};
