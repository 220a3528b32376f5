//! Overlap geometry for corner-form boxes.
//!
//! Every extent is clamped to zero before it is multiplied, so disjoint,
//! edge-touching, degenerate and inverted boxes all produce well-defined,
//! non-negative areas.

use crate::boxes::CornerBox;
use crate::util::math::clamped_extent;

/// Area of a single box, zero when either extent is inverted or empty.
#[inline]
pub fn area(b: &CornerBox) -> f32 {
    b.area()
}

/// Area of the rectangle shared by `a` and `b`.
pub fn intersection_area(a: &CornerBox, b: &CornerBox) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);
    clamped_extent(ix1, ix2) * clamped_extent(iy1, iy2)
}

/// Combined area covered by `a` and `b`.
pub fn union_area(a: &CornerBox, b: &CornerBox) -> f32 {
    union_with_intersection(a, b, intersection_area(a, b))
}

/// Union of `a` and `b` given their already computed intersection area.
#[inline]
fn union_with_intersection(a: &CornerBox, b: &CornerBox, inter: f32) -> f32 {
    area(a) + area(b) - inter
}

/// Intersection over union of two boxes.
///
/// Returns exactly `0.0` when the union is not positive, which covers pairs
/// of degenerate boxes.
pub fn iou(a: &CornerBox, b: &CornerBox) -> f32 {
    let inter = intersection_area(a, b);
    let union = union_with_intersection(a, b, inter);
    if union <= 0.0 {
        return 0.0;
    }
    inter / union
}

#[cfg(test)]
mod tests {
    use super::{intersection_area, iou, union_area};
    use crate::boxes::CornerBox;

    fn bx(x1: f32, y1: f32, x2: f32, y2: f32) -> CornerBox {
        CornerBox::new(x1, y1, x2, y2, 1.0)
    }

    #[test]
    fn partial_overlap_matches_hand_computation() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let b = bx(1.0, 1.0, 3.0, 3.0);
        assert_eq!(intersection_area(&a, &b), 1.0);
        assert_eq!(union_area(&a, &b), 7.0);
        assert!((iou(&a, &b) - 1.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn nested_box_ratio_is_area_ratio() {
        let outer = bx(0.0, 0.0, 2.0, 2.0);
        let inner = bx(0.5, 0.5, 1.5, 1.5);
        assert!((iou(&outer, &inner) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn edge_touching_boxes_do_not_overlap() {
        let a = bx(0.0, 0.0, 1.0, 1.0);
        let right = bx(1.0, 0.0, 2.0, 1.0);
        let corner = bx(1.0, 1.0, 2.0, 2.0);
        assert_eq!(intersection_area(&a, &right), 0.0);
        assert_eq!(iou(&a, &right), 0.0);
        assert_eq!(iou(&a, &corner), 0.0);
    }

    #[test]
    fn iou_agrees_with_public_union_area() {
        let pairs = [
            (bx(0.0, 0.0, 2.0, 2.0), bx(1.0, 1.0, 3.0, 3.0)),
            (bx(0.0, 0.0, 4.0, 4.0), bx(0.1, 0.1, 3.9, 3.9)),
            (bx(-3.0, 2.0, 5.5, 7.25), bx(1.5, -1.0, 9.0, 4.0)),
            (bx(0.0, 0.0, 1.0, 1.0), bx(0.5, 0.5, 1.5, 1.5)),
        ];
        for (a, b) in pairs {
            let expected = intersection_area(&a, &b) / union_area(&a, &b);
            assert_eq!(iou(&a, &b), expected);
        }
    }

    #[test]
    fn degenerate_pair_has_zero_iou() {
        let point = bx(1.0, 1.0, 1.0, 1.0);
        let inverted = bx(3.0, 3.0, 2.0, 2.0);
        assert_eq!(union_area(&point, &inverted), 0.0);
        assert_eq!(iou(&point, &inverted), 0.0);
        assert_eq!(iou(&point, &point), 0.0);
    }

    #[test]
    fn inverted_box_contributes_no_area() {
        let a = bx(0.0, 0.0, 2.0, 2.0);
        let inverted = bx(2.0, 2.0, 0.0, 0.0);
        assert_eq!(intersection_area(&a, &inverted), 0.0);
        assert_eq!(union_area(&a, &inverted), 4.0);
        assert_eq!(iou(&a, &inverted), 0.0);
    }
}
