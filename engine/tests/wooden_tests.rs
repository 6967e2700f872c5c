//! Wooden Support Tests - Stacking, Slopes, Curves and Visibility
//!
//! Tests for the wooden A/B painters: base rounding, slope pieces, the leg
//! loop, curved braces and see-through rendering.

use glam::IVec3;
use ride_supports_engine::paint::{
    BoundBox, ImageId, PaintAttachment, PaintRecorder, PaintSession, PaintedImage, ViewFlags,
};
use ride_supports_engine::supports::{
    SupportHeight, SupportsOutcome, WoodenSupportSubType, WoodenSupportType,
    wooden_a_supports_paint_setup, wooden_a_supports_paint_setup_rotated,
    wooden_b_supports_paint_setup,
};

const TRUSS: WoodenSupportType = WoodenSupportType::Truss;
const NE_SW: WoodenSupportSubType = WoodenSupportSubType::NeSw;

fn tile(height: u16, slope: u8) -> PaintSession<PaintRecorder> {
    let mut session = PaintSession::new(PaintRecorder::new());
    session.reset_for_tile();
    session.pass_surface();
    session.force_set_general_support_height(height, slope);
    session
}

fn indices(session: &PaintSession<PaintRecorder>) -> Vec<u32> {
    session.sink.images().iter().map(|image| image.image.index()).collect()
}

fn leg_box(image: &PaintedImage) -> (i32, i32) {
    (image.offset.z, image.bound_box.length.z)
}

// ============================================================================
// Leg Loop Tests
// ============================================================================

#[test]
fn test_flat_ground_stack_with_curve() {
    let mut session = tile(0, 0);
    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 1, 48, 0);

    assert_eq!(outcome, SupportsOutcome::drawn(true));
    let images = session.sink.images();
    assert_eq!(images.len(), 3);

    // Full leg at 0 with room above, half leg to finish, curve on top
    assert_eq!(images[0].image.index(), 3392);
    assert_eq!(leg_box(&images[0]), (0, 28));
    assert_eq!(images[0].bound_box.offset, IVec3::ZERO);

    assert_eq!(images[1].image.index(), 3393);
    assert_eq!(leg_box(&images[1]), (32, 7));

    assert_eq!(images[2].image.index(), 3465);
    assert_eq!(images[2].offset, IVec3::new(0, 0, 48));
    assert_eq!(
        images[2].bound_box,
        BoundBox::new(IVec3::new(0, 0, 48), IVec3::new(1, 1, 8))
    );
    assert_eq!(images[2].attachment, PaintAttachment::Parent);
}

#[test]
fn test_leg_loop_consumes_all_steps() {
    for height in (0..=160).step_by(16) {
        let mut session = tile(0, 0);
        wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, height, 0);

        let covered: i32 = session
            .sink
            .images()
            .iter()
            .map(|image| if image.image.index() == 3392 { 32 } else { 16 })
            .sum();
        assert_eq!(covered, i32::from(height), "height {height}");
    }
}

#[test]
fn test_last_full_leg_is_shorter() {
    let mut session = tile(0, 0);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 64, 0);

    let boxes: Vec<(i32, i32)> = session.sink.images().iter().map(leg_box).collect();
    assert_eq!(boxes, vec![(0, 28), (32, 23)]);
}

#[test]
fn test_water_boundary_forces_half_legs() {
    let mut session = tile(0, 0);
    session.water_height = Some(16);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 64, 0);

    assert_eq!(indices(&session), vec![3393, 3393, 3392]);
    let boxes: Vec<(i32, i32)> = session.sink.images().iter().map(leg_box).collect();
    assert_eq!(boxes, vec![(0, 12), (16, 12), (32, 23)]);
}

#[test]
fn test_tracker_is_not_modified() {
    let mut session = tile(16, 0);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 96, 0);
    wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 96, 0);
    assert_eq!(session.support, SupportHeight::new(16, 0));
}

// ============================================================================
// Base Rounding Tests
// ============================================================================

#[test]
fn test_underground_below_base() {
    let mut session = tile(40, 0);
    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, 0);
    assert_eq!(outcome, SupportsOutcome::UNDERGROUND);

    let outcome = wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, 0);
    assert_eq!(outcome, SupportsOutcome::UNDERGROUND);
    assert!(session.sink.is_empty());
}

#[test]
fn test_blocked_tracker_rounding_differs() {
    // 32-bit rounding puts the base above any height
    let mut session = tile(SupportHeight::BLOCKED, 0);
    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 64, 0);
    assert!(outcome.underground);

    // 16-bit rounding wraps to zero and draws from the ground
    let mut session = tile(SupportHeight::BLOCKED, 0);
    let outcome = wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 64, 0);
    assert_eq!(outcome, SupportsOutcome::drawn(true));
    assert_eq!(indices(&session), vec![3392, 3392]);
}

// ============================================================================
// Slope Tests
// ============================================================================

#[test]
fn test_flat_cap_on_scenery() {
    let mut session = tile(0, 0x20);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, 0);

    let images = session.sink.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].image.index(), 3394);
    assert_eq!(images[0].offset, IVec3::new(0, 0, -2));
    assert_eq!(images[0].bound_box.length, IVec3::new(32, 32, 0));
    assert_eq!(leg_box(&images[1]), (0, 23));
}

#[test]
fn test_b_skips_flat_cap_without_legs() {
    let mut session = tile(0, 0x20);
    let outcome = wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 0, 0);
    assert_eq!(outcome, SupportsOutcome::drawn(false));
    assert!(session.sink.is_empty());

    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 0, 0);
    assert_eq!(outcome, SupportsOutcome::drawn(true));
    assert_eq!(indices(&session), vec![3394]);
}

#[test]
fn test_steep_slope_two_pieces() {
    let mut session = tile(0, 0x17);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 64, 0);

    let images = session.sink.images();
    assert_eq!(indices(&session), vec![3550, 3554, 3392]);
    assert_eq!(
        images[0].bound_box,
        BoundBox::new(IVec3::new(0, 0, 2), IVec3::new(32, 32, 11))
    );
    assert_eq!(
        images[1].bound_box,
        BoundBox::new(IVec3::new(0, 0, 18), IVec3::new(32, 32, 11))
    );
    assert_eq!(leg_box(&images[2]), (32, 23));
}

#[test]
fn test_b_steep_upper_piece_is_thin() {
    let mut session = tile(0, 0x17);
    wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 64, 0);

    let images = session.sink.images();
    assert_eq!(images[0].bound_box.length.z, 11);
    assert_eq!(images[1].bound_box.length.z, 3);
}

#[test]
fn test_single_slope_piece() {
    let mut session = tile(0, 0x01);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 16, 0);
    assert_eq!(indices(&session), vec![3536]);
    assert_eq!(session.sink.images()[0].bound_box.length.z, 11);

    let mut session = tile(0, 0x01);
    wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 16, 0);
    assert_eq!(session.sink.images()[0].bound_box.length.z, 3);
}

#[test]
fn test_steep_slope_without_room_is_underground() {
    let mut session = tile(0, 0x17);
    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 16, 0);
    assert_eq!(outcome, SupportsOutcome::UNDERGROUND);
    assert!(session.sink.is_empty());
}

// ============================================================================
// Curve Tests
// ============================================================================

#[test]
fn test_steep_curve_links_under_prepend_target() {
    let mut session = tile(0, 0);
    let track = session
        .paint_parent(ImageId(9000), IVec3::new(0, 0, 32), IVec3::new(32, 32, 2))
        .unwrap();
    session.wooden_supports_prepend_to = Some(track);

    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 14, 32, 0);

    let images = session.sink.images();
    let curve = images.last().unwrap();
    assert_eq!(curve.image.index(), 3478);
    assert_eq!(curve.attachment, PaintAttachment::Orphan);
    assert_eq!(
        curve.bound_box,
        BoundBox::new(IVec3::new(10, 0, 32), IVec3::new(10, 32, 44))
    );
    assert_eq!(images[track.0].children.map(|h| h.0), Some(images.len() - 1));
}

#[test]
fn test_steep_curve_without_target_is_parent() {
    let mut session = tile(0, 0);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 14, 32, 0);
    let curve = session.sink.images().last().unwrap();
    assert_eq!(curve.attachment, PaintAttachment::Parent);
}

#[test]
fn test_corner_pieces_have_no_curves() {
    let mut session = tile(0, 0);
    let outcome = wooden_a_supports_paint_setup(
        &mut session,
        TRUSS,
        WoodenSupportSubType::Corner0,
        1,
        16,
        0,
    );
    assert!(outcome.drawn);
    assert_eq!(indices(&session), vec![3559]);
}

#[test]
fn test_curve_out_of_table_is_skipped() {
    let mut session = tile(0, 0);
    session.extension_sprite_base = Some(29000);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 82, 16, 0);
    assert_eq!(indices(&session), vec![3393]);
}

#[test]
fn test_large_curves_come_from_extension_sheet() {
    let mut session = tile(0, 0);
    session.extension_sprite_base = Some(29000);
    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 50, 16, 0);
    assert_eq!(outcome, SupportsOutcome::drawn(true));
    assert_eq!(indices(&session), vec![3393, 29000]);
    assert_eq!(session.sink.images()[1].offset, IVec3::new(0, 0, 16));

    let mut session = tile(0, 0);
    session.extension_sprite_base = Some(29000);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 81, 16, 0);
    assert_eq!(indices(&session), vec![3393, 29031]);
}

#[test]
fn test_large_curves_skipped_without_extension_sheet() {
    let mut session = tile(0, 0);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 50, 16, 0);
    assert_eq!(indices(&session), vec![3393]);

    // Mine supports have no large curve braces at all
    let mut session = tile(0, 0);
    session.extension_sprite_base = Some(29000);
    wooden_a_supports_paint_setup(&mut session, WoodenSupportType::Mine, NE_SW, 50, 32, 0);
    assert_eq!(indices(&session), vec![3677]);
}

#[test]
fn test_large_steep_curve_links_under_prepend_target() {
    let mut session = tile(0, 0);
    session.extension_sprite_base = Some(29000);
    let track = session
        .paint_parent(ImageId(9000), IVec3::new(0, 0, 16), IVec3::new(32, 32, 2))
        .unwrap();
    session.wooden_supports_prepend_to = Some(track);

    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 63, 16, 0);

    let images = session.sink.images();
    let curve = images.last().unwrap();
    assert_eq!(curve.image.index(), 29013);
    assert_eq!(curve.attachment, PaintAttachment::Orphan);
    assert_eq!(
        curve.bound_box,
        BoundBox::new(IVec3::new(10, 0, 18), IVec3::new(10, 32, 52))
    );
    assert_eq!(images[track.0].children.map(|h| h.0), Some(images.len() - 1));
}

#[test]
fn test_extreme_specials_do_not_panic() {
    for special in [i16::MIN, -1, i16::MAX] {
        let mut session = tile(0, 0);
        session.extension_sprite_base = Some(29000);
        let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, special, 16, 0);
        assert_eq!(outcome, SupportsOutcome::drawn(true));
        assert_eq!(indices(&session), vec![3393], "special {special}");
    }

    let mut session = tile(0, 0);
    let outcome = wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, i16::MAX, 0);
    assert!(outcome.drawn);
    assert!(!outcome.underground);
}

#[test]
fn test_curve_alone_counts_as_drawn() {
    let mut session = tile(0, 0);
    let outcome = wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 1, 0, 0);
    assert_eq!(outcome, SupportsOutcome::drawn(true));
    assert_eq!(indices(&session), vec![3465]);
}

// ============================================================================
// Visibility and Rotation Tests
// ============================================================================

#[test]
fn test_colour_flags_applied() {
    let mut session = tile(0, 0);
    let colour = 0x2000_0000 | (3 << 19);
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, colour);
    assert!(session.sink.images().iter().all(|image| image.image.flags() == colour));
}

#[test]
fn test_see_through_replaces_colour() {
    let mut session = tile(0, 0);
    session.view_flags = ViewFlags::HIDE_SUPPORTS;
    wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, 0x1234 << 19);
    let image = session.sink.images()[0].image;
    assert_eq!(image.raw(), 3392 | ImageId::SEE_THROUGH);
}

#[test]
fn test_invisible_supports_draw_nothing() {
    let mut session = tile(0, 0);
    session.view_flags = ViewFlags::HIDE_SUPPORTS | ViewFlags::INVISIBLE_SUPPORTS;
    let outcome = wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, 0);
    assert_eq!(outcome, SupportsOutcome::NOT_DRAWN);
    assert!(session.sink.is_empty());
}

#[test]
fn test_surface_not_passed_draws_nothing() {
    let mut session = PaintSession::new(PaintRecorder::new());
    let outcome = wooden_b_supports_paint_setup(&mut session, TRUSS, NE_SW, 0, 32, 0);
    assert_eq!(outcome, SupportsOutcome::NOT_DRAWN);
    assert!(session.sink.is_empty());
}

#[test]
fn test_rotated_variant_swaps_orientation() {
    let mut session = tile(0, 0);
    wooden_a_supports_paint_setup_rotated(&mut session, TRUSS, NE_SW, 1, 0, 32, 0);
    assert_eq!(indices(&session), vec![3390]);

    let mut session = tile(0, 0);
    wooden_a_supports_paint_setup_rotated(&mut session, TRUSS, NE_SW, 2, 0, 32, 0);
    assert_eq!(indices(&session), vec![3392]);
}

#[test]
fn test_mine_supports_use_own_sprites() {
    let mut session = tile(0, 0);
    wooden_a_supports_paint_setup(&mut session, WoodenSupportType::Mine, NE_SW, 1, 32, 0);
    assert_eq!(indices(&session), vec![3677, 3681]);
}

#[test]
fn test_identical_inputs_identical_images() {
    let run = || {
        let mut session = tile(8, 0x17);
        session.water_height = Some(96);
        wooden_a_supports_paint_setup(&mut session, TRUSS, NE_SW, 22, 144, 0);
        session.sink.take()
    };
    assert_eq!(run(), run());
}
