//! Wooden Supports
//!
//! Axis-aligned stacks under a track piece: an optional piece shaped to the
//! terrain slope (or a flat cap on top of scenery), then 32- and 16-unit legs
//! up to the requested height, then an optional curved brace.
//!
//! Footpath box supports follow the same stacking rules with different sprites,
//! so the stack builder here is shared with [`super::path`].

use glam::IVec3;

use super::SupportsOutcome;
use super::height::{HEIGHT_STEP, SLOPE_CORNERS_MASK, SLOPE_DIAGONAL};
use super::kinds::{WoodenSupportSubType, WoodenSupportType};
use super::tables::{self, CurveDescriptor, WOODEN_CURVE_DESCRIPTORS, WOODEN_SLOPE_IMAGE_OFFSETS};
use crate::paint::{BoundBox, ImageId, PaintSession, PaintSink};

/// Bounding-box height of the lower slope piece.
const SLOPE_PIECE_HEIGHT: i32 = 11;

// ============================================================================
// STACK BUILDER
// ============================================================================

/// Sprite indices for one stack, colour flags not yet applied.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StackSprites {
    pub full: u32,
    pub half: u32,
    pub flat: u32,
    /// Base of the slope sprites; `None` falls back to a flat cap
    pub slope: Option<u32>,
}

/// Rounding and sizing rules that differ between the stack painters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StackVariant {
    WoodenA,
    WoodenB,
    PathBox,
}

impl StackVariant {
    /// First z a leg may start at, above the scalar tracker.
    ///
    /// `WoodenA` rounds in 32-bit space; the others round a 16-bit value and
    /// wrap, so a blocked tracker (0xFFFF) starts them from zero.
    fn base(self, tracker_height: u16) -> i32 {
        match self {
            Self::WoodenA => (i32::from(tracker_height) + 15) & !15,
            Self::WoodenB | Self::PathBox => i32::from(tracker_height.wrapping_add(15) & !15),
        }
    }

    fn upper_slope_height(self) -> i32 {
        match self {
            Self::WoodenB => 3,
            Self::WoodenA | Self::PathBox => SLOPE_PIECE_HEIGHT,
        }
    }

    fn single_slope_height(self) -> i32 {
        self.upper_slope_height()
    }

    /// `WoodenB` only caps a stack that still has legs above the cap.
    fn flat_cap_needs_steps(self) -> bool {
        self == Self::WoodenB
    }
}

/// Result of a stack that was not underground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Stack {
    pub drawn: bool,
    /// z where the curve, if any, goes
    pub top: i32,
}

/// Paint slope piece, flat cap and legs. Returns `None` when `height` is below
/// the stack's base.
pub(crate) fn paint_stack<S: PaintSink>(
    session: &mut PaintSession<S>,
    variant: StackVariant,
    sprites: &StackSprites,
    height: i32,
    colour: u32,
) -> Option<Stack> {
    let support = session.support;
    let mut z = variant.base(support.height);
    if height < z {
        log::trace!("{variant:?} support underground: height {height} below base {z}");
        return None;
    }

    let mut steps = (height - z) / HEIGHT_STEP;
    let slope_offset = WOODEN_SLOPE_IMAGE_OFFSETS[support.slope_code()];
    let mut drawn = false;
    let mut flat_cap = false;

    if support.is_above_scenery() {
        flat_cap = true;
    } else if support.slope & SLOPE_DIAGONAL != 0 {
        steps -= 2;
        if steps < 0 {
            log::trace!("{variant:?} support underground: no room for steep slope piece");
            return None;
        }
        match sprites.slope {
            Some(slope) => {
                let image = slope + slope_offset;
                paint_slope_piece(session, ImageId::new(image, colour), z, SLOPE_PIECE_HEIGHT);
                paint_slope_piece(
                    session,
                    ImageId::new(image + 4, colour),
                    z + HEIGHT_STEP,
                    variant.upper_slope_height(),
                );
                drawn = true;
            }
            None => flat_cap = true,
        }
        z += 2 * HEIGHT_STEP;
    } else if support.slope & SLOPE_CORNERS_MASK != 0 {
        steps -= 1;
        if steps < 0 {
            log::trace!("{variant:?} support underground: no room for slope piece");
            return None;
        }
        match sprites.slope {
            Some(slope) => {
                let image = ImageId::new(slope + slope_offset, colour);
                paint_slope_piece(session, image, z, variant.single_slope_height());
                drawn = true;
            }
            None => flat_cap = true,
        }
        z += HEIGHT_STEP;
    }

    if flat_cap && (steps > 0 || !variant.flat_cap_needs_steps()) {
        session.paint_parent(
            ImageId::new(sprites.flat, colour),
            IVec3::new(0, 0, z - 2),
            IVec3::new(32, 32, 0),
        );
        drawn = true;
    }

    while steps > 0 {
        let meets_water = session
            .water_height
            .is_some_and(|water| i32::from(water) == z + HEIGHT_STEP);

        if z & HEIGHT_STEP == 0 && steps >= 2 && !meets_water {
            let box_height = if steps == 2 { 23 } else { 28 };
            session.paint_parent(
                ImageId::new(sprites.full, colour),
                IVec3::new(0, 0, z),
                IVec3::new(32, 32, box_height),
            );
            z += 2 * HEIGHT_STEP;
            steps -= 2;
        } else {
            let box_height = if steps == 1 { 7 } else { 12 };
            session.paint_parent(
                ImageId::new(sprites.half, colour),
                IVec3::new(0, 0, z),
                IVec3::new(32, 32, box_height),
            );
            z += HEIGHT_STEP;
            steps -= 1;
        }
        drawn = true;
    }

    Some(Stack { drawn, top: z })
}

fn paint_slope_piece<S: PaintSink>(session: &mut PaintSession<S>, image: ImageId, z: i32, box_height: i32) {
    session.paint_parent_boxed(
        image,
        IVec3::new(0, 0, z),
        BoundBox::new(IVec3::new(0, 0, z + 2), IVec3::new(32, 32, box_height)),
    );
}

/// Curve index for a non-zero `special`.
pub(crate) fn curve_index(special: i16) -> usize {
    usize::from(special.wrapping_sub(1) as u16)
}

/// Paint a curved brace at `z`. Steep braces are linked under the session's
/// prepend target when there is one.
pub(crate) fn paint_curve<S: PaintSink>(
    session: &mut PaintSession<S>,
    image: ImageId,
    descriptor: &CurveDescriptor,
    z: i32,
) -> bool {
    if !descriptor.drawable {
        return false;
    }

    let offset = IVec3::new(0, 0, z);
    let mut bound_box = descriptor.bound_box;
    bound_box.offset.z += z;

    match session.wooden_supports_prepend_to.filter(|_| descriptor.as_orphan) {
        Some(parent) => {
            if let Some(child) = session.paint_orphan(image, offset, bound_box) {
                session.sink.set_children(parent, child);
            }
        }
        None => {
            session.paint_parent_boxed(image, offset, bound_box);
        }
    }
    true
}

// ============================================================================
// WOODEN PAINTERS
// ============================================================================

fn wooden_sprites(support_type: WoodenSupportType, sub_type: WoodenSupportSubType) -> StackSprites {
    let images = tables::wooden_images(support_type, sub_type);
    StackSprites {
        full: images.full,
        half: images.half,
        flat: images.flat,
        slope: (images.slope != 0).then_some(images.slope),
    }
}

fn paint_wooden_curve<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    special: i16,
    z: i32,
    colour: u32,
) -> bool {
    let curve = curve_index(special);
    let Some(descriptor) = WOODEN_CURVE_DESCRIPTORS.get(curve) else {
        log::warn!("wooden support curve {curve} out of range, skipping");
        return false;
    };
    let Some(image) =
        tables::wooden_curve_image(support_type, sub_type, curve, session.extension_sprite_base)
    else {
        log::debug!("no {support_type:?} brace sprite for curve {curve}, skipping");
        return false;
    };
    paint_curve(session, ImageId::new(image, colour), descriptor, z)
}

fn paint_wooden<S: PaintSink>(
    session: &mut PaintSession<S>,
    variant: StackVariant,
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    special: i16,
    height: i16,
    colour: u32,
) -> SupportsOutcome {
    let Some(colour) = session.support_colour(colour) else {
        return SupportsOutcome::NOT_DRAWN;
    };

    let sprites = wooden_sprites(support_type, sub_type);
    let Some(stack) = paint_stack(session, variant, &sprites, i32::from(height), colour) else {
        return SupportsOutcome::UNDERGROUND;
    };

    let mut drawn = stack.drawn;
    if special != 0 {
        drawn |= paint_wooden_curve(session, support_type, sub_type, special, stack.top, colour);
    }
    SupportsOutcome::drawn(drawn)
}

/// Paint a wooden support stack from the scalar tracker up to `height`.
///
/// `special` selects a curved brace (1-based, 0 for none). Returns whether any
/// image was emitted and whether `height` was below the stack's base.
pub fn wooden_a_supports_paint_setup<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    special: i16,
    height: i16,
    colour: u32,
) -> SupportsOutcome {
    paint_wooden(session, StackVariant::WoodenA, support_type, sub_type, special, height, colour)
}

/// Like [`wooden_a_supports_paint_setup`], with 16-bit base rounding, thinner
/// slope bounding boxes and no flat cap on an empty stack.
pub fn wooden_b_supports_paint_setup<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    special: i16,
    height: i16,
    colour: u32,
) -> SupportsOutcome {
    paint_wooden(session, StackVariant::WoodenB, support_type, sub_type, special, height, colour)
}

/// [`wooden_a_supports_paint_setup`] for a track piece facing `direction`.
pub fn wooden_a_supports_paint_setup_rotated<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    direction: u8,
    special: i16,
    height: i16,
    colour: u32,
) -> SupportsOutcome {
    let sub_type = sub_type.rotated(direction);
    wooden_a_supports_paint_setup(session, support_type, sub_type, special, height, colour)
}

/// [`wooden_b_supports_paint_setup`] for a track piece facing `direction`.
pub fn wooden_b_supports_paint_setup_rotated<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    direction: u8,
    special: i16,
    height: i16,
    colour: u32,
) -> SupportsOutcome {
    let sub_type = sub_type.rotated(direction);
    wooden_b_supports_paint_setup(session, support_type, sub_type, special, height, colour)
}
