use approx::assert_relative_eq;

use viewfinder_core::error::ViewfinderError;
use viewfinder_core::transform::{AffineTransform, Point, ViewTransform};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

#[test]
fn test_point_distance() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, 6.0);
    assert_relative_eq!(a.distance_to(b), 5.0);
    assert_relative_eq!(b.distance_to(a), 5.0);
}

// ---------------------------------------------------------------------------
// AffineTransform basics
// ---------------------------------------------------------------------------

#[test]
fn test_identity_maps_point_to_itself() {
    let m = AffineTransform::identity();
    let p = m.apply(Point::new(3.5, -2.0));
    assert_relative_eq!(p.x, 3.5);
    assert_relative_eq!(p.y, -2.0);
}

#[test]
fn test_translation_moves_point() {
    let m = AffineTransform::translation(10.0, -4.0);
    let p = m.apply(Point::new(1.0, 1.0));
    assert_relative_eq!(p.x, 11.0);
    assert_relative_eq!(p.y, -3.0);
}

#[test]
fn test_scaling_scales_from_origin() {
    let m = AffineTransform::scaling(2.0, 3.0);
    let p = m.apply(Point::new(4.0, 5.0));
    assert_relative_eq!(p.x, 8.0);
    assert_relative_eq!(p.y, 15.0);
}

#[test]
fn test_rotation_quarter_turn() {
    let m = AffineTransform::rotation(std::f64::consts::FRAC_PI_2);
    let p = m.apply(Point::new(1.0, 0.0));
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_multiply_applies_right_operand_first() {
    let translate = AffineTransform::translation(10.0, 0.0);
    let scale = AffineTransform::scaling(2.0, 2.0);
    // translate.multiply(scale): scale first, then translate.
    let m = translate.multiply(&scale);
    let p = m.apply(Point::new(1.0, 0.0));
    assert_relative_eq!(p.x, 12.0);
    // The other order translates first and then doubles everything.
    let m = scale.multiply(&translate);
    let p = m.apply(Point::new(1.0, 0.0));
    assert_relative_eq!(p.x, 22.0);
}

#[test]
fn test_determinant() {
    assert_relative_eq!(AffineTransform::identity().determinant(), 1.0);
    assert_relative_eq!(AffineTransform::scaling(2.0, 3.0).determinant(), 6.0);
}

#[test]
fn test_invert_identity() {
    let inv = AffineTransform::identity().invert().expect("invertible");
    assert_eq!(inv, AffineTransform::identity());
}

#[test]
fn test_invert_singular_returns_none() {
    assert!(AffineTransform::scaling(0.0, 2.0).invert().is_none());
}

#[test]
fn test_invert_round_trips_composed_chain() {
    let m = AffineTransform::translation(5.0, -3.0)
        .multiply(&AffineTransform::rotation(0.7))
        .multiply(&AffineTransform::scaling(1.7, 1.7))
        .multiply(&AffineTransform::translation(-12.0, 4.5));
    let inv = m.invert().expect("invertible");
    let p = Point::new(3.2, -1.5);
    let back = inv.apply(m.apply(p));
    assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
    assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// ViewTransform scale scalar
// ---------------------------------------------------------------------------

#[test]
fn test_scale_accumulates_scalar() {
    let mut view = ViewTransform::new();
    view.scale(2.0, 2.0);
    assert_relative_eq!(view.current_scale(), 2.0);
    view.scale(1.5, 1.5);
    assert_relative_eq!(view.current_scale(), 3.0);
}

#[test]
fn test_rotate_and_translate_leave_scalar_alone() {
    let mut view = ViewTransform::new();
    view.rotate(1.0);
    view.translate(100.0, -50.0);
    assert_relative_eq!(view.current_scale(), 1.0);
}

#[test]
fn test_compose_folds_a_into_scalar() {
    let mut view = ViewTransform::new();
    view.compose(&AffineTransform::scaling(2.0, 2.0));
    assert_relative_eq!(view.current_scale(), 2.0);
    assert_relative_eq!(view.matrix().a, 2.0);
}

#[test]
fn test_set_replaces_matrix_but_multiplies_scalar() {
    let mut view = ViewTransform::new();
    view.scale(2.0, 2.0);
    view.set(3.0, 0.0, 0.0, 3.0, 0.0, 0.0);
    // The matrix is replaced outright while the scalar keeps its history.
    assert_relative_eq!(view.matrix().a, 3.0);
    assert_relative_eq!(view.matrix().e, 0.0);
    assert_relative_eq!(view.current_scale(), 6.0);
}

#[test]
fn test_reset_returns_scalar_to_exactly_one() {
    let mut view = ViewTransform::new();
    view.scale(3.7, 3.7);
    view.translate(40.0, 2.0);
    view.reset();
    assert_eq!(view.matrix(), AffineTransform::identity());
    assert_eq!(view.current_scale(), 1.0);
}

// ---------------------------------------------------------------------------
// Save/restore stack
// ---------------------------------------------------------------------------

#[test]
fn test_save_restore_is_lifo() {
    let mut view = ViewTransform::new();
    view.translate(5.0, 5.0);
    let first = view.matrix();
    view.save();
    view.translate(10.0, 0.0);
    view.save();
    view.scale(2.0, 2.0);
    view.restore();
    assert_relative_eq!(view.matrix().e, 15.0);
    view.restore();
    assert_eq!(view.matrix(), first);
}

#[test]
fn test_restore_on_empty_stack_is_noop() {
    let mut view = ViewTransform::new();
    view.translate(5.0, 5.0);
    let before = view.matrix();
    view.restore();
    assert_eq!(view.matrix(), before);
}

#[test]
fn test_restore_does_not_cover_scalar() {
    let mut view = ViewTransform::new();
    view.save();
    view.scale(2.0, 2.0);
    view.restore();
    assert_eq!(view.matrix(), AffineTransform::identity());
    // The matrix came back, the reported scale did not.
    assert_relative_eq!(view.current_scale(), 2.0);
}

// ---------------------------------------------------------------------------
// Point mapping
// ---------------------------------------------------------------------------

#[test]
fn test_map_point_applies_current_matrix() {
    let mut view = ViewTransform::new();
    view.scale(2.0, 2.0);
    view.translate(10.0, 5.0);
    // Right-multiplication: translate happens in image space, then scale.
    let p = view.map_point(Point::new(1.0, 1.0));
    assert_relative_eq!(p.x, 22.0);
    assert_relative_eq!(p.y, 12.0);
}

#[test]
fn test_map_point_inverse_round_trips() {
    let mut view = ViewTransform::new();
    view.translate(-30.0, 12.0);
    view.scale(2.5, 2.5);
    view.rotate(0.3);
    let device = Point::new(17.0, 41.0);
    let image = view.map_point_inverse(device).expect("invertible");
    let back = view.map_point(image);
    assert_relative_eq!(back.x, device.x, epsilon = 1e-9);
    assert_relative_eq!(back.y, device.y, epsilon = 1e-9);
}

#[test]
fn test_map_point_inverse_singular_is_an_error() {
    let mut view = ViewTransform::new();
    view.set(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    let err = view
        .map_point_inverse(Point::new(1.0, 1.0))
        .expect_err("singular");
    match err {
        ViewfinderError::SingularTransform { determinant } => {
            assert_eq!(determinant, 0.0);
        }
        other => panic!("expected SingularTransform, got {other:?}"),
    }
}
