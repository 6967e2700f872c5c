//! Support Lookup Tables
//!
//! Static, read-only data shared by every painter: sprite indices per support
//! kind, segment positions, the crossbeam hop graph between segments and the
//! bounding boxes of curved braces. Nothing here is mutated at runtime.
//!
//! Sprite indices are positions in the base sprite atlas. Footpath supports do
//! not live here; they index a per-surface bridge sheet (see [`path`]).
//!
//! [`path`]: super::path

use glam::{IVec2, IVec3};

use super::kinds::{MetalSupportType, NUM_DIRECTIONS, WoodenSupportSubType, WoodenSupportType};
use crate::paint::sink::BoundBox;

// ============================================================================
// SEGMENT GEOMETRY
// ============================================================================

/// Tile-relative x/y of each segment, in `MetalSupportPlace` order.
pub const SEGMENT_OFFSETS: [IVec2; 9] = [
    IVec2::new(4, 4),
    IVec2::new(28, 4),
    IVec2::new(4, 28),
    IVec2::new(28, 28),
    IVec2::new(16, 16),
    IVec2::new(16, 4),
    IVec2::new(4, 16),
    IVec2::new(28, 16),
    IVec2::new(16, 28),
];

/// One candidate step of the crossbeam walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrossbeamHop {
    /// Neighbouring segment the pole would move to
    pub segment: u8,
    /// Crossbeam shape connecting the two segments (index into the
    /// `CROSSBEAM_*` tables)
    pub crossbeam: u8,
}

const fn hop(segment: u8, crossbeam: u8) -> CrossbeamHop {
    CrossbeamHop { segment, crossbeam }
}

/// Number of neighbours tried before a blocked pole gives up.
pub const MAX_CROSSBEAM_HOPS: usize = 4;

/// Crossbeam walk, indexed `[hop][segment][rotation]`.
///
/// Only the centre segment depends on the viewport rotation; every other
/// segment has a fixed set of neighbours.
pub const CROSSBEAM_HOPS: [[[CrossbeamHop; NUM_DIRECTIONS]; 9]; MAX_CROSSBEAM_HOPS] = [
    [
        [hop(5, 2), hop(5, 2), hop(5, 2), hop(5, 2)],
        [hop(7, 1), hop(7, 1), hop(7, 1), hop(7, 1)],
        [hop(6, 3), hop(6, 3), hop(6, 3), hop(6, 3)],
        [hop(8, 0), hop(8, 0), hop(8, 0), hop(8, 0)],
        [hop(5, 3), hop(6, 0), hop(8, 1), hop(7, 2)],
        [hop(1, 2), hop(1, 2), hop(1, 2), hop(1, 2)],
        [hop(0, 3), hop(0, 3), hop(0, 3), hop(0, 3)],
        [hop(3, 1), hop(3, 1), hop(3, 1), hop(3, 1)],
        [hop(2, 0), hop(2, 0), hop(2, 0), hop(2, 0)],
    ],
    [
        [hop(6, 1), hop(6, 1), hop(6, 1), hop(6, 1)],
        [hop(5, 0), hop(5, 0), hop(5, 0), hop(5, 0)],
        [hop(8, 2), hop(8, 2), hop(8, 2), hop(8, 2)],
        [hop(7, 3), hop(7, 3), hop(7, 3), hop(7, 3)],
        [hop(6, 0), hop(8, 1), hop(7, 2), hop(5, 3)],
        [hop(0, 0), hop(0, 0), hop(0, 0), hop(0, 0)],
        [hop(2, 1), hop(2, 1), hop(2, 1), hop(2, 1)],
        [hop(1, 3), hop(1, 3), hop(1, 3), hop(1, 3)],
        [hop(3, 2), hop(3, 2), hop(3, 2), hop(3, 2)],
    ],
    [
        [hop(1, 6), hop(1, 6), hop(1, 6), hop(1, 6)],
        [hop(3, 5), hop(3, 5), hop(3, 5), hop(3, 5)],
        [hop(0, 7), hop(0, 7), hop(0, 7), hop(0, 7)],
        [hop(2, 4), hop(2, 4), hop(2, 4), hop(2, 4)],
        [hop(8, 1), hop(7, 2), hop(5, 3), hop(6, 0)],
        [hop(4, 1), hop(4, 1), hop(4, 1), hop(4, 1)],
        [hop(4, 2), hop(4, 2), hop(4, 2), hop(4, 2)],
        [hop(4, 0), hop(4, 0), hop(4, 0), hop(4, 0)],
        [hop(4, 3), hop(4, 3), hop(4, 3), hop(4, 3)],
    ],
    [
        [hop(2, 5), hop(2, 5), hop(2, 5), hop(2, 5)],
        [hop(0, 4), hop(0, 4), hop(0, 4), hop(0, 4)],
        [hop(3, 6), hop(3, 6), hop(3, 6), hop(3, 6)],
        [hop(1, 7), hop(1, 7), hop(1, 7), hop(1, 7)],
        [hop(7, 2), hop(5, 3), hop(6, 0), hop(8, 1)],
        [hop(8, 5), hop(8, 5), hop(8, 5), hop(8, 5)],
        [hop(7, 6), hop(7, 6), hop(7, 6), hop(7, 6)],
        [hop(6, 4), hop(6, 4), hop(6, 4), hop(6, 4)],
        [hop(5, 7), hop(5, 7), hop(5, 7), hop(5, 7)],
    ],
];

/// Crossbeam sprite offset relative to the segment it starts from.
pub const CROSSBEAM_OFFSETS: [IVec2; 8] = [
    IVec2::new(-15, -1),
    IVec2::new(0, -2),
    IVec2::new(-2, -1),
    IVec2::new(-1, -15),
    IVec2::new(-26, -1),
    IVec2::new(0, -2),
    IVec2::new(-2, -1),
    IVec2::new(-1, -26),
];

/// Crossbeam bounding-box x/y length. Shapes 0-3 are short, 4-7 span a tile.
pub const CROSSBEAM_LENGTHS: [IVec2; 8] = [
    IVec2::new(18, 3),
    IVec2::new(3, 18),
    IVec2::new(18, 3),
    IVec2::new(3, 18),
    IVec2::new(32, 3),
    IVec2::new(3, 32),
    IVec2::new(32, 3),
    IVec2::new(3, 32),
];

// ============================================================================
// METAL SPRITES
// ============================================================================

const CROSSBEAM_TUBES: [u32; 8] = [3370, 3371, 3370, 3371, 3372, 3373, 3372, 3373];
const CROSSBEAM_FORK: [u32; 8] = [3374, 3375, 3374, 3375, 3376, 3377, 3376, 3377];
const CROSSBEAM_THICK: [u32; 8] = [3378, 3383, 3378, 3383, 3380, 3385, 3380, 3385];
const CROSSBEAM_THICK_ALT: [u32; 8] = [3382, 3379, 3382, 3379, 3384, 3381, 3384, 3381];
const CROSSBEAM_TRUSS: [u32; 8] = [3378, 3379, 3378, 3379, 3380, 3381, 3380, 3381];
const CROSSBEAM_TUBES_INVERTED: [u32; 8] = [3386, 3387, 3386, 3387, 3388, 3389, 3388, 3389];

/// Crossbeam sprite per metal type and crossbeam shape.
pub const METAL_CROSSBEAM_IMAGES: [[u32; 8]; MetalSupportType::COUNT] = [
    CROSSBEAM_TUBES,
    CROSSBEAM_FORK,
    CROSSBEAM_FORK,
    CROSSBEAM_TUBES,
    CROSSBEAM_FORK,
    CROSSBEAM_FORK,
    CROSSBEAM_THICK,
    CROSSBEAM_THICK,
    CROSSBEAM_THICK_ALT,
    CROSSBEAM_THICK_ALT,
    CROSSBEAM_TRUSS,
    CROSSBEAM_TUBES_INVERTED,
    CROSSBEAM_TUBES,
];

/// Height the pole is lowered by to make room for a crossbeam.
pub const METAL_CROSSBEAM_HEIGHT: [u8; MetalSupportType::COUNT] =
    [6, 3, 3, 6, 3, 3, 6, 6, 6, 6, 4, 3, 6];

/// Base wedge and first beam sprite of a metal support type.
///
/// Beam sprites are consecutive: `beam + length - 1` for lengths 1-16, and
/// `beam + 16` for the decorated full-length beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetalSupportImages {
    /// First slope wedge sprite, 0 when the type has no wedge
    pub base: u32,
    pub beam: u32,
}

const fn metal(base: u32, beam: u32) -> MetalSupportImages {
    MetalSupportImages { base, beam }
}

/// Sprites for the main pole.
pub const METAL_SUPPORT_IMAGES: [MetalSupportImages; MetalSupportType::COUNT] = [
    metal(3243, 3209),
    metal(3279, 3262),
    metal(3298, 3262),
    metal(3334, 3317),
    metal(0, 3658),
    metal(0, 3658),
    metal(0, 3141),
    metal(0, 3158),
    metal(0, 3175),
    metal(0, 3192),
    metal(0, 3124),
    metal(3243, 3209),
    metal(3334, 3353),
];

/// Sprites for the extension run above the track. Tube poles switch to a
/// thinner beam set; all other types reuse the main sprites.
pub const METAL_SPECIAL_IMAGES: [MetalSupportImages; MetalSupportType::COUNT] = [
    metal(3243, 3226),
    metal(3279, 3262),
    metal(3298, 3262),
    metal(3334, 3317),
    metal(0, 3658),
    metal(0, 3658),
    metal(0, 3141),
    metal(0, 3158),
    metal(0, 3175),
    metal(0, 3192),
    metal(0, 3124),
    metal(3243, 3226),
    metal(3334, 3353),
];

/// Wedge sprite offset for each 5-bit slope code.
pub const METAL_SLOPE_IMAGE_MAP: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, //
    0, 0, 0, 0, 0, 0, 0, 15, 0, 0, 0, 16, 0, 17, 18, 0,
];

// ============================================================================
// WOODEN SPRITES
// ============================================================================

/// Sprites of one wooden support kind and orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WoodenSupportImages {
    /// 32-unit leg
    pub full: u32,
    /// 16-unit leg
    pub half: u32,
    /// Cap drawn on top of flat track or scenery
    pub flat: u32,
    /// First sloped transition piece, 0 when the kind has none
    pub slope: u32,
}

const fn wooden(full: u32, half: u32, flat: u32, slope: u32) -> WoodenSupportImages {
    WoodenSupportImages {
        full,
        half,
        flat,
        slope,
    }
}

/// Wooden sprites, indexed `[type][sub_type]`.
pub const WOODEN_SUPPORT_IMAGES: [[WoodenSupportImages; 6]; 2] = [
    [
        wooden(3392, 3393, 3394, 3536),
        wooden(3390, 3391, 3394, 3514),
        wooden(3558, 3559, 3560, 3570),
        wooden(3561, 3562, 3563, 3592),
        wooden(3564, 3565, 3566, 3614),
        wooden(3567, 3568, 3569, 3636),
    ],
    [
        wooden(3677, 3678, 3680, 3739),
        wooden(3675, 3676, 3679, 3717),
        wooden(3761, 3762, 3763, 3773),
        wooden(3764, 3765, 3766, 3795),
        wooden(3767, 3768, 3769, 3817),
        wooden(3770, 3771, 3772, 3839),
    ],
];

/// Slope sprite offset for each 5-bit slope code. Shared with footpath box
/// supports.
pub const WOODEN_SLOPE_IMAGE_OFFSETS: [u32; 32] = [
    0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 0, //
    0, 0, 0, 0, 0, 0, 0, 14, 0, 0, 0, 17, 0, 16, 15, 0,
];

/// First curved brace sprite, indexed `[type][sub_type]`; consecutive curves
/// follow it up to [`WOODEN_BASE_CURVE_COUNT`]. Corner pieces have no braces.
const WOODEN_CURVE_IMAGE_BASE: [[u32; 6]; 2] = [
    [3465, 3465, 0, 0, 0, 0],
    [3681, 3681, 0, 0, 0, 0],
];

/// Whether the kind has braces for the large flat-to-steep curves, which
/// live in the extension sprite sheet.
const WOODEN_HAS_EXTENSION_CURVES: [bool; 2] = [true, false];

pub fn wooden_images(
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
) -> &'static WoodenSupportImages {
    &WOODEN_SUPPORT_IMAGES[support_type.index()][sub_type.index()]
}

/// Curved brace sprite for `curve` (0-based), or `None` if the kind has no
/// brace for it.
///
/// Curves from [`WOODEN_BASE_CURVE_COUNT`] on are numbered from
/// `extension_base`, the first support sprite of the extension sheet; without
/// one they have no sprite.
pub fn wooden_curve_image(
    support_type: WoodenSupportType,
    sub_type: WoodenSupportSubType,
    curve: usize,
    extension_base: Option<u32>,
) -> Option<u32> {
    let base = WOODEN_CURVE_IMAGE_BASE[support_type.index()][sub_type.index()];
    if base == 0 || curve >= WOODEN_CURVE_COUNT {
        return None;
    }
    if curve < WOODEN_BASE_CURVE_COUNT {
        return Some(base + curve as u32);
    }
    if !WOODEN_HAS_EXTENSION_CURVES[support_type.index()] {
        return None;
    }
    extension_base.map(|first| first + (curve - WOODEN_BASE_CURVE_COUNT) as u32)
}

// ============================================================================
// CURVE DESCRIPTORS
// ============================================================================

/// Placement of a curved brace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveDescriptor {
    /// Bounding box relative to the top of the support stack
    pub bound_box: BoundBox,
    /// Link under the session's prepend target instead of sorting alone
    pub as_orphan: bool,
    /// Whether a brace is drawn at all
    pub drawable: bool,
}

impl CurveDescriptor {
    const fn new(offset: IVec3, length: IVec3, as_orphan: bool) -> Self {
        Self {
            bound_box: BoundBox::new(offset, length),
            as_orphan,
            drawable: true,
        }
    }

    const fn small(height: i32) -> Self {
        Self::new(IVec3::ZERO, IVec3::new(1, 1, height), false)
    }
}

/// Number of wooden curve descriptors (one per track curve piece).
pub const WOODEN_CURVE_COUNT: usize = 81;

/// Curves with sprites in the base atlas; the rest use the extension sheet.
pub const WOODEN_BASE_CURVE_COUNT: usize = 49;

/// Curved brace placement per curve index for wooden supports.
pub const WOODEN_CURVE_DESCRIPTORS: [CurveDescriptor; WOODEN_CURVE_COUNT] = build_wooden_curves();

const fn build_wooden_curves() -> [CurveDescriptor; WOODEN_CURVE_COUNT] {
    let mut table = [CurveDescriptor::small(8); WOODEN_CURVE_COUNT];

    // Gentle-to-steep and steep-to-gentle braces lean against the track
    let along_x = CurveDescriptor::new(IVec3::new(10, 0, 0), IVec3::new(10, 32, 44), true);
    let along_y = CurveDescriptor::new(IVec3::new(0, 10, 0), IVec3::new(32, 10, 44), true);
    table[13] = along_x;
    table[14] = along_y;
    table[17] = along_x;
    table[18] = along_y;

    // Steep slope
    table[21] = CurveDescriptor::new(IVec3::new(10, 0, 2), IVec3::new(10, 32, 76), true);
    table[22] = CurveDescriptor::new(IVec3::new(0, 10, 2), IVec3::new(32, 10, 76), true);

    let mut i = 24;
    while i < 28 {
        table[i] = CurveDescriptor::small(4);
        i += 1;
    }

    table[48] = CurveDescriptor::new(IVec3::new(2, 2, 1), IVec3::new(28, 28, 2), false);

    // Large flat-to-steep, last quarter
    table[62] = CurveDescriptor::new(IVec3::new(10, 0, 2), IVec3::new(10, 32, 52), true);
    table[63] = CurveDescriptor::new(IVec3::new(0, 10, 2), IVec3::new(32, 10, 52), true);

    // Large steep-to-flat, first quarter
    table[66] = CurveDescriptor::new(IVec3::new(10, 0, 2), IVec3::new(10, 32, 76), true);
    table[67] = CurveDescriptor::new(IVec3::new(0, 10, 2), IVec3::new(32, 10, 76), true);
    table
}

/// Curved brace placement for footpath box supports.
pub const PATH_CURVE_DESCRIPTORS: [CurveDescriptor; 4] = [CurveDescriptor::small(4); 4];
