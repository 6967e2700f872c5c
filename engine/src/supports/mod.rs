//! Supports Module
//!
//! Painters for the structures that hold ride track and footpaths above the
//! terrain. Every painter reads the support trackers on the [`PaintSession`],
//! emits images into its sink and updates the trackers for later calls on the
//! same tile.
//!
//! # Families
//!
//! | Family        | Tracker | A variant                  | B variant                  |
//! |---------------|---------|----------------------------|----------------------------|
//! | Wooden        | scalar  | 32-bit base rounding       | 16-bit rounding, thin caps |
//! | Metal         | segment | moves to a free neighbour  | stays on its segment       |
//! | Footpath      | both    | box support (scalar)       | pole support (segment)     |
//!
//! Metal A returns `true` when drawn; metal B and footpath poles return `true`
//! when blocked.
//!
//! # Submodules
//!
//! - [`height`] - Support trackers and segment masks
//! - [`kinds`] - Validated support types, sub-types and placements
//! - [`tables`] - Static sprite and geometry tables
//! - [`wooden`] - Wooden A/B painters
//! - [`metal`] - Metal A/B painters and side-by-side poles
//! - [`path`] - Footpath box and pole painters
//!
//! [`PaintSession`]: crate::paint::PaintSession

pub mod height;
pub mod kinds;
pub mod metal;
pub mod path;
pub mod tables;
pub mod wooden;

use serde::{Deserialize, Serialize};

pub use height::{SegmentMask, SupportHeight};
pub use kinds::{
    MetalSupportPlace, MetalSupportType, PathSupportOrientation, WoodenSupportSubType,
    WoodenSupportType,
};
pub use metal::{
    draw_supports_side_by_side, metal_a_supports_paint_setup, metal_a_supports_paint_setup_rotated,
    metal_b_supports_paint_setup, metal_b_supports_paint_setup_rotated,
};
pub use path::{
    FootpathFlags, FootpathPaintInfo, path_box_supports_paint_setup, path_pole_supports_paint_setup,
};
pub use wooden::{
    wooden_a_supports_paint_setup, wooden_a_supports_paint_setup_rotated,
    wooden_b_supports_paint_setup, wooden_b_supports_paint_setup_rotated,
};

/// Result of a stacked (wooden or footpath box) support call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportsOutcome {
    /// At least one image was emitted
    pub drawn: bool,
    /// The requested height is below where the stack would start
    pub underground: bool,
}

impl SupportsOutcome {
    /// Supports are disabled for this tile or view.
    pub const NOT_DRAWN: Self = Self {
        drawn: false,
        underground: false,
    };

    pub const UNDERGROUND: Self = Self {
        drawn: false,
        underground: true,
    };

    pub fn drawn(drawn: bool) -> Self {
        Self {
            drawn,
            underground: false,
        }
    }
}
