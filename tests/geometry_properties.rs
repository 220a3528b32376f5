use boxsieve::{area, intersection_area, iou, union_area, CornerBox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_box(rng: &mut StdRng) -> CornerBox {
    let x1 = rng.random_range(-50.0f32..50.0);
    let y1 = rng.random_range(-50.0f32..50.0);
    let w = rng.random_range(0.1f32..40.0);
    let h = rng.random_range(0.1f32..40.0);
    CornerBox::new(x1, y1, x1 + w, y1 + h, rng.random_range(0.0f32..1.0))
}

fn random_any_box(rng: &mut StdRng) -> CornerBox {
    // Corners drawn independently, so roughly three quarters are inverted
    // on at least one axis.
    CornerBox::new(
        rng.random_range(-20.0f32..20.0),
        rng.random_range(-20.0f32..20.0),
        rng.random_range(-20.0f32..20.0),
        rng.random_range(-20.0f32..20.0),
        1.0,
    )
}

#[test]
fn self_overlap_is_one() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let b = random_box(&mut rng);
        assert!(area(&b) > 0.0);
        assert!((iou(&b, &b) - 1.0).abs() < 1e-5, "box {b:?}");
    }
}

#[test]
fn iou_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..1000 {
        let a = random_any_box(&mut rng);
        let b = random_any_box(&mut rng);
        assert_eq!(iou(&a, &b), iou(&b, &a));
        assert_eq!(intersection_area(&a, &b), intersection_area(&b, &a));
    }
}

#[test]
fn iou_stays_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(37);
    for _ in 0..1000 {
        let a = random_any_box(&mut rng);
        let b = random_any_box(&mut rng);
        let value = iou(&a, &b);
        assert!((0.0..=1.0 + 1e-6).contains(&value), "iou {value} for {a:?} {b:?}");
        assert!(intersection_area(&a, &b) >= 0.0);
        assert!(union_area(&a, &b) >= 0.0);
    }
}

#[test]
fn disjoint_boxes_have_zero_iou() {
    let mut rng = StdRng::seed_from_u64(41);
    for _ in 0..500 {
        let a = random_box(&mut rng);
        let gap = rng.random_range(0.5f32..5.0);
        let shift = a.x2 - a.x1 + gap;
        let b = CornerBox::new(a.x1 + shift, a.y1, a.x2 + shift, a.y2, 0.5);
        assert_eq!(iou(&a, &b), 0.0);
    }
}

#[test]
fn reference_iou_table() {
    let cases = [
        // no overlap
        ((0.0, 0.0, 1.0, 1.0), (2.0, 2.0, 3.0, 3.0), 0.0),
        // partial overlap
        ((0.0, 0.0, 1.0, 1.0), (0.5, 0.5, 1.5, 1.5), 0.25 / 1.75),
        // nested
        ((0.0, 0.0, 2.0, 2.0), (0.5, 0.5, 1.5, 1.5), 0.25),
        // identical
        ((1.0, 1.0, 3.0, 3.0), (1.0, 1.0, 3.0, 3.0), 1.0),
        // edge touching
        ((0.0, 0.0, 1.0, 1.0), (1.0, 1.0, 2.0, 2.0), 0.0),
    ];
    for ((ax1, ay1, ax2, ay2), (bx1, by1, bx2, by2), expected) in cases {
        let a = CornerBox::new(ax1, ay1, ax2, ay2, 1.0);
        let b = CornerBox::new(bx1, by1, bx2, by2, 2.0);
        let value = iou(&a, &b);
        assert!(
            (value - expected).abs() <= 1e-3 * expected.max(1e-6),
            "expected {expected}, got {value}"
        );
    }
}
