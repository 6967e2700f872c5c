//! Metal Supports
//!
//! Vertical poles on one of the nine tile segments. A pole is built bottom-up
//! from the segment tracker:
//!
//! 1. If the segment is already occupied above the requested height, the pole
//!    is lowered by a crossbeam and moved to the first free neighbour.
//! 2. A wedge shaped to the terrain slope, when the type has one.
//! 3. A short beam up to the next 16-unit boundary, then full 16-unit beams.
//! 4. Optionally an extension run above the track ("special").
//!
//! Footpath pole supports reuse steps 2-4 with bridge sprites (see
//! [`super::path`]).

use glam::{IVec2, IVec3};

use super::height::{HEIGHT_STEP, SLOPE_ABOVE_SCENERY, SupportHeight};
use super::kinds::{MetalSupportPlace, MetalSupportType, direction_index};
use super::tables::{
    CROSSBEAM_HOPS, CROSSBEAM_LENGTHS, CROSSBEAM_OFFSETS, CrossbeamHop, METAL_CROSSBEAM_HEIGHT,
    METAL_CROSSBEAM_IMAGES, METAL_SLOPE_IMAGE_MAP, METAL_SPECIAL_IMAGES, METAL_SUPPORT_IMAGES,
    SEGMENT_OFFSETS,
};
use crate::paint::{BoundBox, ImageId, PaintSession, PaintSink};

/// Minimum room above the segment before a base wedge is drawn.
const WEDGE_HEIGHT: i32 = 6;

/// Every n-th full beam of a pole uses the decorated sprite.
const DECORATED_BEAM_INTERVAL: u32 = 4;

// ============================================================================
// POLE BUILDING BLOCKS
// ============================================================================

#[inline]
fn segment_origin(place: MetalSupportPlace) -> IVec2 {
    SEGMENT_OFFSETS[place.index()]
}

#[inline]
fn segment_point(place: MetalSupportPlace, z: i32) -> IVec3 {
    segment_origin(place).extend(z)
}

/// First neighbour of `place` whose tracker is strictly below `height`.
fn find_crossbeam_hop(
    segments: &[SupportHeight],
    place: MetalSupportPlace,
    rotation: u8,
    height: i32,
) -> Option<CrossbeamHop> {
    CROSSBEAM_HOPS
        .iter()
        .map(|table| table[place.index()][direction_index(rotation)])
        .find(|hop| height > i32::from(segments[usize::from(hop.segment)].height))
}

fn paint_crossbeam<S: PaintSink>(
    session: &mut PaintSession<S>,
    image: u32,
    from: MetalSupportPlace,
    crossbeam: usize,
    z: i32,
    colour: u32,
) {
    let offset = (segment_origin(from) + CROSSBEAM_OFFSETS[crossbeam]).extend(z);
    let length = CROSSBEAM_LENGTHS[crossbeam].extend(1);
    session.paint_parent(ImageId::new(image, colour), offset, length);
}

/// Sprites for the body of a pole.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PoleSprites {
    /// First slope wedge sprite, `None` to never draw a wedge
    pub wedge: Option<u32>,
    /// Beam of length 1; length `n` is `beam + n - 1`
    pub beam: u32,
}

/// Paint wedge and beams on `place` from its tracker up to `top`. Returns the
/// z the pole ended at.
pub(crate) fn paint_pole_column<S: PaintSink>(
    session: &mut PaintSession<S>,
    place: MetalSupportPlace,
    sprites: PoleSprites,
    top: i32,
    colour: u32,
) -> i32 {
    let segment = session.support_segments[place.index()];
    let segment_height = i32::from(segment.height);

    let mut z = match sprites.wedge {
        Some(wedge)
            if !segment.is_above_scenery() && top - segment_height >= WEDGE_HEIGHT =>
        {
            let image = wedge + u32::from(METAL_SLOPE_IMAGE_MAP[segment.slope_code()]);
            session.paint_parent(
                ImageId::new(image, colour),
                segment_point(place, segment_height),
                IVec3::new(0, 0, 5),
            );
            segment_height + WEDGE_HEIGHT
        }
        _ => segment_height,
    };

    // Short beam up to the next 16-unit boundary
    let boundary = (z.saturating_add(HEIGHT_STEP) & !(HEIGHT_STEP - 1)).min(top);
    let partial = boundary - z;
    if partial > 0 {
        session.paint_parent(
            ImageId::new(sprites.beam + (partial - 1) as u32, colour),
            segment_point(place, z),
            IVec3::new(0, 0, partial - 1),
        );
    }
    z += partial;

    let mut run = 1;
    loop {
        let length = z.saturating_add(HEIGHT_STEP).min(top) - z;
        if length <= 0 {
            break;
        }
        let mut image = sprites.beam + (length - 1) as u32;
        if run % DECORATED_BEAM_INTERVAL == 0 && length == HEIGHT_STEP {
            image += 1;
        }
        session.paint_parent(
            ImageId::new(image, colour),
            segment_point(place, z),
            IVec3::new(0, 0, length - 1),
        );
        z += length;
        run += 1;
    }
    z
}

/// Paint plain beams on `place` from `from` up to `to`. With `bound_origin`
/// all beams share one zero-sized bounding box there; otherwise each beam's
/// box sits at its own offset.
pub(crate) fn paint_beam_run<S: PaintSink>(
    session: &mut PaintSession<S>,
    place: MetalSupportPlace,
    beam: u32,
    from: i32,
    to: i32,
    bound_origin: Option<IVec3>,
    colour: u32,
) {
    let mut z = from;
    loop {
        let length = z.saturating_add(HEIGHT_STEP).min(to) - z;
        if length <= 0 {
            break;
        }
        let image = ImageId::new(beam + (length - 1) as u32, colour);
        let offset = segment_point(place, z);
        let bound_box = BoundBox::new(bound_origin.unwrap_or(offset), IVec3::ZERO);
        session.paint_parent_boxed(image, offset, bound_box);
        z += length;
    }
}

/// Mark a segment as occupied by a pole.
pub(crate) fn close_segment<S: PaintSink>(session: &mut PaintSession<S>, place: MetalSupportPlace, blocked: u16) {
    session.support_segments[place.index()] = SupportHeight::new(blocked, SLOPE_ABOVE_SCENERY);
}

fn pole_sprites(support_type: MetalSupportType) -> PoleSprites {
    let images = METAL_SUPPORT_IMAGES[support_type.index()];
    PoleSprites {
        wedge: (images.base != 0).then_some(images.base),
        beam: images.beam,
    }
}

// ============================================================================
// METAL PAINTERS
// ============================================================================

/// Paint a metal pole on `place` up to `height`.
///
/// If the segment is already occupied above `height`, the pole drops by the
/// type's crossbeam height and moves to a free neighbour, where the tracker is
/// then written. `special` adds an extension run above `height`; a negative
/// value starts it one unit lower.
///
/// Returns `true` if the pole was drawn.
pub fn metal_a_supports_paint_setup<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: MetalSupportType,
    place: MetalSupportPlace,
    special: i16,
    height: i16,
    colour: u32,
) -> bool {
    let Some(colour) = session.support_colour(colour) else {
        return false;
    };
    let (special, height) = (i32::from(special), i32::from(height));

    let requested_place = place;
    let mut place = place;
    let mut top = height;
    let mut blocked = SupportHeight::BLOCKED;

    if height < i32::from(session.support_segments[place.index()].height) {
        blocked = height as u16;
        top -= i32::from(METAL_CROSSBEAM_HEIGHT[support_type.index()]);
        if top < 0 {
            return false;
        }

        let Some(hop) = find_crossbeam_hop(&session.support_segments, place, session.rotation(), top)
        else {
            log::debug!("metal support on {place:?} blocked: no free neighbour below {top}");
            return false;
        };

        let crossbeam = usize::from(hop.crossbeam);
        let image = METAL_CROSSBEAM_IMAGES[support_type.index()][crossbeam];
        paint_crossbeam(session, image, place, crossbeam, top, colour);
        place = MetalSupportPlace::from_index(usize::from(hop.segment));
    }

    paint_pole_column(session, place, pole_sprites(support_type), top, colour);
    close_segment(session, place, blocked);

    if special == 0 {
        return true;
    }

    let mut from = height;
    if special < 0 {
        from -= 1;
    }
    let bound_origin = segment_point(requested_place, from);
    paint_beam_run(
        session,
        requested_place,
        METAL_SPECIAL_IMAGES[support_type.index()].beam,
        from,
        from + special.abs(),
        Some(bound_origin),
        colour,
    );
    true
}

/// Paint a metal pole on `place` up to `height`, never leaving the segment.
///
/// An occupied segment still gets a crossbeam towards a free neighbour, but
/// only for the short crossbeam shapes; the pole itself stays put. Returns
/// `true` if the support is blocked.
pub fn metal_b_supports_paint_setup<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: MetalSupportType,
    place: MetalSupportPlace,
    special: i16,
    height: i16,
    colour: u32,
) -> bool {
    let Some(colour) = session.support_colour(colour) else {
        return false;
    };
    let (special, height) = (i32::from(special), i32::from(height));

    let mut top = height;
    let mut blocked = SupportHeight::BLOCKED;

    if height < i32::from(session.support_segments[place.index()].height) {
        blocked = height as u16;
        top -= i32::from(METAL_CROSSBEAM_HEIGHT[support_type.index()]);
        if top < 0 {
            return false;
        }

        let Some(hop) = find_crossbeam_hop(&session.support_segments, place, session.rotation(), top)
        else {
            log::debug!("metal support on {place:?} blocked: no free neighbour below {top}");
            return true;
        };

        let crossbeam = usize::from(hop.crossbeam);
        if crossbeam >= 4 {
            log::debug!("metal support on {place:?} blocked: neighbour too far for crossbeam");
            return true;
        }
        let image = METAL_CROSSBEAM_IMAGES[support_type.index()][crossbeam];
        paint_crossbeam(session, image, place, crossbeam, top, colour);
    }

    paint_pole_column(session, place, pole_sprites(support_type), top, colour);
    close_segment(session, place, blocked);

    if special != 0 {
        paint_beam_run(
            session,
            place,
            METAL_SUPPORT_IMAGES[support_type.index()].beam,
            height,
            height + special,
            Some(segment_point(place, height)),
            colour,
        );
    }
    false
}

/// [`metal_a_supports_paint_setup`] for a track piece facing `direction`.
pub fn metal_a_supports_paint_setup_rotated<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: MetalSupportType,
    place: MetalSupportPlace,
    direction: u8,
    special: i16,
    height: i16,
    colour: u32,
) -> bool {
    metal_a_supports_paint_setup(
        session,
        support_type.rotated(direction),
        place.rotated(direction),
        special,
        height,
        colour,
    )
}

/// [`metal_b_supports_paint_setup`] for a track piece facing `direction`.
pub fn metal_b_supports_paint_setup_rotated<S: PaintSink>(
    session: &mut PaintSession<S>,
    support_type: MetalSupportType,
    place: MetalSupportPlace,
    direction: u8,
    special: i16,
    height: i16,
    colour: u32,
) -> bool {
    metal_b_supports_paint_setup(
        session,
        support_type.rotated(direction),
        place.rotated(direction),
        special,
        height,
        colour,
    )
}

/// Paint a pair of poles on the two sides perpendicular to `direction`.
pub fn draw_supports_side_by_side<S: PaintSink>(
    session: &mut PaintSession<S>,
    direction: u8,
    height: i16,
    colour: u32,
    support_type: MetalSupportType,
    special: i16,
) {
    let support_type = support_type.rotated(direction);
    let sides = if direction & 1 != 0 {
        [MetalSupportPlace::TopRightSide, MetalSupportPlace::BottomLeftSide]
    } else {
        [MetalSupportPlace::TopLeftSide, MetalSupportPlace::BottomRightSide]
    };
    for place in sides {
        metal_a_supports_paint_setup(session, support_type, place, special, height, colour);
    }
}
