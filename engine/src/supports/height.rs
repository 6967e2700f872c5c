//! Support Height Tracking
//!
//! Supports are stacked on top of whatever has already been painted on a tile.
//! Two encodings of that state live on the paint session:
//!
//! - one scalar [`SupportHeight`] for axis-aligned pieces (wooden legs and
//!   path box supports)
//! - nine per-segment values for pole-grid pieces (metal and path poles),
//!   addressed through [`SegmentMask`] by callers and through
//!   [`MetalSupportPlace`] by the painters
//!
//! Heights are z-units; one grid step is 16 units.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::kinds::MetalSupportPlace;

/// Number of tracked segments on a tile.
pub const SEGMENT_COUNT: usize = 9;

/// Height of one grid step in z-units.
pub const HEIGHT_STEP: i32 = 16;

// ============================================================================
// SLOPE BITS
// ============================================================================

/// Corner-raised bits of a terrain slope.
pub const SLOPE_CORNERS_MASK: u8 = 0x0F;

/// Steep diagonal slope (two steps between opposite corners).
pub const SLOPE_DIAGONAL: u8 = 0x10;

/// Full 5-bit slope code used to index slope image tables.
pub const SLOPE_MASK: u8 = 0x1F;

/// Support sits on top of track or scenery; also the flat marker written after
/// a pole has been painted.
pub const SLOPE_ABOVE_SCENERY: u8 = 0x20;

/// Slope value every tracker is reset to at the start of a tile.
pub const SLOPE_UNSET: u8 = 0xFF;

// ============================================================================
// SUPPORT HEIGHT
// ============================================================================

/// Topmost support point recorded for a tile or segment.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct SupportHeight {
    /// Height in z-units, or [`SupportHeight::BLOCKED`]
    pub height: u16,
    /// Slope bits, see the `SLOPE_*` constants
    pub slope: u8,
    #[serde(skip)]
    pub _pad: u8,
}

static_assertions::assert_eq_size!(SupportHeight, u32);

impl SupportHeight {
    /// Nothing may be drawn below this segment any more.
    pub const BLOCKED: u16 = 0xFFFF;

    /// State at the start of every tile.
    pub const RESET: Self = Self::new(0, SLOPE_UNSET);

    pub const fn new(height: u16, slope: u8) -> Self {
        Self {
            height,
            slope,
            _pad: 0,
        }
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.height == Self::BLOCKED
    }

    #[inline]
    pub fn is_above_scenery(&self) -> bool {
        self.slope & SLOPE_ABOVE_SCENERY != 0
    }

    /// Slope code used to index the slope image tables.
    #[inline]
    pub fn slope_code(&self) -> usize {
        usize::from(self.slope & SLOPE_MASK)
    }
}

impl Default for SupportHeight {
    fn default() -> Self {
        Self::RESET
    }
}

// ============================================================================
// SEGMENT MASK
// ============================================================================

bitflags::bitflags! {
    /// Set of tile segments.
    ///
    /// The eight outer segments are laid out as a ring on bits 0-7 so that a
    /// quarter turn is a two-bit rotation; the centre sits on bit 8.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SegmentMask: u16 {
        const TOP_CORNER = 1 << 0;
        const TOP_RIGHT_SIDE = 1 << 1;
        const RIGHT_CORNER = 1 << 2;
        const BOTTOM_RIGHT_SIDE = 1 << 3;
        const BOTTOM_CORNER = 1 << 4;
        const BOTTOM_LEFT_SIDE = 1 << 5;
        const LEFT_CORNER = 1 << 6;
        const TOP_LEFT_SIDE = 1 << 7;
        const CENTRE = 1 << 8;

        const CORNERS = Self::TOP_CORNER.bits()
            | Self::RIGHT_CORNER.bits()
            | Self::BOTTOM_CORNER.bits()
            | Self::LEFT_CORNER.bits();
        const SIDES = Self::TOP_RIGHT_SIDE.bits()
            | Self::BOTTOM_RIGHT_SIDE.bits()
            | Self::BOTTOM_LEFT_SIDE.bits()
            | Self::TOP_LEFT_SIDE.bits();
        const ALL = Self::CORNERS.bits() | Self::SIDES.bits() | Self::CENTRE.bits();
    }
}

/// Mask bit for each segment index, in [`MetalSupportPlace`] order.
const SEGMENT_BITS: [SegmentMask; SEGMENT_COUNT] = [
    SegmentMask::TOP_CORNER,
    SegmentMask::LEFT_CORNER,
    SegmentMask::RIGHT_CORNER,
    SegmentMask::BOTTOM_CORNER,
    SegmentMask::CENTRE,
    SegmentMask::TOP_LEFT_SIDE,
    SegmentMask::TOP_RIGHT_SIDE,
    SegmentMask::BOTTOM_LEFT_SIDE,
    SegmentMask::BOTTOM_RIGHT_SIDE,
];

impl SegmentMask {
    /// Mask holding a single segment.
    pub fn from_place(place: MetalSupportPlace) -> Self {
        SEGMENT_BITS[place.index()]
    }

    /// Whether the mask contains the segment at `index`.
    pub fn contains_index(self, index: usize) -> bool {
        SEGMENT_BITS
            .get(index)
            .is_some_and(|bit| self.contains(*bit))
    }

    /// Rotate the outer ring by `rotation` quarter turns; the centre stays put.
    pub fn rotate(self, rotation: u8) -> Self {
        let ring = (self.bits() & 0xFF) as u8;
        let rotated = ring.rotate_left(u32::from(rotation & 3) * 2);
        Self::from_bits_truncate((self.bits() & 0xFF00) | u16::from(rotated))
    }
}

impl From<MetalSupportPlace> for SegmentMask {
    fn from(place: MetalSupportPlace) -> Self {
        Self::from_place(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_height_is_four_bytes() {
        assert_eq!(std::mem::size_of::<SupportHeight>(), 4);
        let height = SupportHeight::new(0x1234, 0x20);
        let bytes = bytemuck::bytes_of(&height);
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn test_reset_state_is_above_scenery() {
        // 0xFF carries the above-scenery bit, so a wooden support on an
        // untouched tile starts with a flat cap.
        assert!(SupportHeight::RESET.is_above_scenery());
        assert_eq!(SupportHeight::RESET.height, 0);
    }

    #[test]
    fn test_rotate_corner_moves_clockwise() {
        let mask = SegmentMask::TOP_CORNER;
        assert_eq!(mask.rotate(1), SegmentMask::RIGHT_CORNER);
        assert_eq!(mask.rotate(2), SegmentMask::BOTTOM_CORNER);
        assert_eq!(mask.rotate(3), SegmentMask::LEFT_CORNER);
        assert_eq!(mask.rotate(4), SegmentMask::TOP_CORNER);
    }

    #[test]
    fn test_rotate_keeps_centre() {
        let mask = SegmentMask::CENTRE | SegmentMask::TOP_LEFT_SIDE;
        assert_eq!(
            mask.rotate(1),
            SegmentMask::CENTRE | SegmentMask::TOP_RIGHT_SIDE
        );
        assert_eq!(SegmentMask::ALL.rotate(3), SegmentMask::ALL);
    }

    #[test]
    fn test_rotation_matches_place_rotation() {
        for place in MetalSupportPlace::ALL {
            for direction in 0..4u8 {
                let rotated_place = place.rotated(direction);
                assert_eq!(
                    SegmentMask::from_place(place).rotate(direction),
                    SegmentMask::from_place(rotated_place),
                    "{place:?} rotated by {direction}"
                );
            }
        }
    }
}
