//! Footpath Supports
//!
//! Queue lines and elevated footpaths are held up either by box supports
//! (stacked like wooden supports) or by poles (built like metal supports).
//! Both draw from the path surface's bridge sprite sheet; the offsets into it
//! are the constants below. Box sprites for the NW-SE orientation follow the
//! NE-SW ones after [`ORIENTATION_STRIDE`] sprites.

use serde::{Deserialize, Serialize};

use super::SupportsOutcome;
use super::height::SupportHeight;
use super::kinds::{MetalSupportPlace, PathSupportOrientation};
use super::metal::{PoleSprites, close_segment, paint_beam_run, paint_pole_column};
use super::tables::PATH_CURVE_DESCRIPTORS;
use super::wooden::{StackSprites, StackVariant, curve_index, paint_curve, paint_stack};
use crate::paint::{ImageId, PaintSession, PaintSink};

pub const ORIENTATION_STRIDE: u32 = 24;
const BOX_FULL_LEG: u32 = 22;
const BOX_HALF_LEG: u32 = 23;
const BOX_FLAT_CAP: u32 = 48;
const BOX_CURVE: u32 = 55;
const POLE_BEAM: u32 = 20;
const POLE_WEDGE: u32 = 37;

bitflags::bitflags! {
    /// Capabilities of a footpath surface's sprite sheet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FootpathFlags: u8 {
        /// The sheet has slope wedges for pole bases
        const HAS_SUPPORT_BASE_SPRITE = 1 << 0;
    }
}

/// Sprite source for one footpath surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootpathPaintInfo {
    /// First sprite of the bridge sheet
    pub bridge_image: u32,
    #[serde(default)]
    pub flags: FootpathFlags,
}

impl FootpathPaintInfo {
    pub fn new(bridge_image: u32, flags: FootpathFlags) -> Self {
        Self { bridge_image, flags }
    }

    fn box_sprites(&self, orientation: PathSupportOrientation) -> StackSprites {
        let first = self.bridge_image + orientation.index() * ORIENTATION_STRIDE;
        StackSprites {
            full: first + BOX_FULL_LEG,
            half: first + BOX_HALF_LEG,
            flat: self.bridge_image + BOX_FLAT_CAP,
            slope: Some(first),
        }
    }

    fn pole_sprites(&self) -> PoleSprites {
        PoleSprites {
            wedge: self
                .flags
                .contains(FootpathFlags::HAS_SUPPORT_BASE_SPRITE)
                .then_some(self.bridge_image + POLE_WEDGE),
            beam: self.bridge_image + POLE_BEAM,
        }
    }
}

/// Paint a footpath box support from the scalar tracker up to `height`.
///
/// `special` selects one of the four curved braces (1-based, 0 for none).
pub fn path_box_supports_paint_setup<S: PaintSink>(
    session: &mut PaintSession<S>,
    orientation: PathSupportOrientation,
    special: i16,
    height: i16,
    colour: u32,
    path: &FootpathPaintInfo,
) -> SupportsOutcome {
    let Some(colour) = session.support_colour(colour) else {
        return SupportsOutcome::NOT_DRAWN;
    };

    let sprites = path.box_sprites(orientation);
    let Some(stack) = paint_stack(session, StackVariant::PathBox, &sprites, i32::from(height), colour) else {
        return SupportsOutcome::UNDERGROUND;
    };

    let mut drawn = stack.drawn;
    if special != 0 {
        let curve = curve_index(special);
        match PATH_CURVE_DESCRIPTORS.get(curve) {
            Some(descriptor) => {
                let image = ImageId::new(path.bridge_image + BOX_CURVE + curve as u32, colour);
                drawn |= paint_curve(session, image, descriptor, stack.top);
            }
            None => log::warn!("footpath support curve {curve} out of range, skipping"),
        }
    }
    SupportsOutcome::drawn(drawn)
}

/// Paint a footpath pole on `place` up to `height`.
///
/// Poles never step aside for an occupied segment: if the segment is already
/// taken above `height` nothing is drawn and `true` is returned. Otherwise the
/// segment is closed and `false` is returned.
pub fn path_pole_supports_paint_setup<S: PaintSink>(
    session: &mut PaintSession<S>,
    place: MetalSupportPlace,
    special: i16,
    height: i16,
    colour: u32,
    path: &FootpathPaintInfo,
) -> bool {
    let Some(colour) = session.support_colour(colour) else {
        return false;
    };

    if i32::from(height) < i32::from(session.support_segments[place.index()].height) {
        log::trace!("footpath pole on {place:?} blocked below {height}");
        return true;
    }

    let top = paint_pole_column(session, place, path.pole_sprites(), i32::from(height), colour);
    close_segment(session, place, SupportHeight::BLOCKED);

    if special != 0 {
        paint_beam_run(
            session,
            place,
            path.bridge_image + POLE_BEAM,
            top,
            top + i32::from(special),
            None,
            colour,
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_sprites_by_orientation() {
        let path = FootpathPaintInfo::new(1000, FootpathFlags::empty());
        let ne_sw = path.box_sprites(PathSupportOrientation::NeSw);
        let nw_se = path.box_sprites(PathSupportOrientation::NwSe);

        assert_eq!((ne_sw.full, ne_sw.half), (1022, 1023));
        assert_eq!((nw_se.full, nw_se.half), (1046, 1047));
        // One flat cap for both orientations
        assert_eq!(ne_sw.flat, nw_se.flat);
        assert_eq!(nw_se.slope, Some(1024));
    }

    #[test]
    fn test_pole_wedge_gated_by_flag() {
        let plain = FootpathPaintInfo::new(2000, FootpathFlags::empty());
        assert_eq!(plain.pole_sprites().wedge, None);

        let with_base = FootpathPaintInfo::new(2000, FootpathFlags::HAS_SUPPORT_BASE_SPRITE);
        assert_eq!(with_base.pole_sprites().wedge, Some(2037));
        assert_eq!(with_base.pole_sprites().beam, 2020);
    }

    #[test]
    fn test_paint_info_json_defaults_flags() {
        let info: FootpathPaintInfo = serde_json::from_str(r#"{"bridge_image": 500}"#).unwrap();
        assert_eq!(info.bridge_image, 500);
        assert!(info.flags.is_empty());
    }
}
