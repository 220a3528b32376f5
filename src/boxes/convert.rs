//! Center-to-corner format conversion for whole detection lists.

use crate::boxes::{CenterBox, CornerBox};

/// Converts every box to corner form, preserving order and length.
///
/// A single input still yields a one-element `Vec`.
pub fn center_to_corner(boxes: &[CenterBox]) -> Vec<CornerBox> {
    boxes.iter().map(CenterBox::to_corner).collect()
}
