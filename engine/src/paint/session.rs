//! Paint Session
//!
//! Per-viewport painting state threaded through every support call. A session
//! owns its sink, the viewport rotation and visibility flags, and the support
//! trackers that earlier calls on the same tile leave behind for later ones.
//!
//! The session is reset at the start of each tile with
//! [`PaintSession::reset_for_tile`]; callers then mark the surface as passed,
//! record what they painted with the `set_*_support_height` helpers and call
//! the support painters.

use glam::IVec3;

use super::image::ImageId;
use super::sink::{BoundBox, PaintHandle, PaintSink};
use crate::supports::height::{SEGMENT_COUNT, SegmentMask, SupportHeight};

bitflags::bitflags! {
    /// Viewport display options that affect supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewFlags: u32 {
        /// Draw supports see-through
        const HIDE_SUPPORTS = 1 << 0;
        /// Together with `HIDE_SUPPORTS`, skip supports entirely
        const INVISIBLE_SUPPORTS = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Per-tile traversal state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SessionFlags: u8 {
        /// The land surface of the current tile has been painted
        const PASSED_SURFACE = 1 << 0;
    }
}

/// Painting state for one viewport pass.
pub struct PaintSession<S: PaintSink> {
    /// Destination for every emitted image
    pub sink: S,
    rotation: u8,
    pub view_flags: ViewFlags,
    pub flags: SessionFlags,
    /// Height of the water surface on this tile; full legs never straddle it
    pub water_height: Option<u16>,
    /// Scalar tracker read by wooden and footpath box supports
    pub support: SupportHeight,
    /// Segment trackers read and written by pole supports
    pub support_segments: [SupportHeight; SEGMENT_COUNT],
    /// Paint struct that steep wooden braces are linked under
    pub wooden_supports_prepend_to: Option<PaintHandle>,
    /// First support sprite of the extension sheet, if one is loaded
    pub extension_sprite_base: Option<u32>,
}

impl<S: PaintSink> PaintSession<S> {
    /// Create a session in the state of a freshly reset tile.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            rotation: 0,
            view_flags: ViewFlags::empty(),
            flags: SessionFlags::empty(),
            water_height: None,
            support: SupportHeight::RESET,
            support_segments: [SupportHeight::RESET; SEGMENT_COUNT],
            wooden_supports_prepend_to: None,
            extension_sprite_base: None,
        }
    }

    /// Viewport rotation, 0-3.
    #[inline]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Set the viewport rotation; only the low two bits are kept.
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation & 3;
    }

    /// Clear all per-tile state before painting a new tile.
    pub fn reset_for_tile(&mut self) {
        self.support = SupportHeight::RESET;
        self.support_segments = [SupportHeight::RESET; SEGMENT_COUNT];
        self.water_height = None;
        self.wooden_supports_prepend_to = None;
        self.flags = SessionFlags::empty();
    }

    /// Record that the tile's land surface has been painted. Supports are
    /// only drawn after this point.
    pub fn pass_surface(&mut self) {
        self.flags.insert(SessionFlags::PASSED_SURFACE);
    }

    // ========================================================================
    // SUPPORT TRACKERS
    // ========================================================================

    /// Set every segment in `segments` to `height`. A blocked height keeps the
    /// segment's previous slope.
    pub fn set_segment_support_height(&mut self, segments: SegmentMask, height: u16, slope: u8) {
        for (index, support) in self.support_segments.iter_mut().enumerate() {
            if !segments.contains_index(index) {
                continue;
            }
            support.height = height;
            if height != SupportHeight::BLOCKED {
                support.slope = slope;
            }
        }
    }

    /// Raise the scalar tracker to `height`; lower values are ignored.
    pub fn set_general_support_height(&mut self, height: u16, slope: u8) {
        if self.support.height >= height {
            return;
        }
        self.force_set_general_support_height(height, slope);
    }

    /// Overwrite the scalar tracker.
    pub fn force_set_general_support_height(&mut self, height: u16, slope: u8) {
        self.support = SupportHeight::new(height, slope);
    }

    // ========================================================================
    // IMAGE EMISSION
    // ========================================================================

    /// Colour flags to paint supports with, or `None` when supports must not
    /// be drawn for the current tile and view.
    pub fn support_colour(&self, colour_flags: u32) -> Option<u32> {
        if !self.flags.contains(SessionFlags::PASSED_SURFACE) {
            return None;
        }
        if self.view_flags.contains(ViewFlags::HIDE_SUPPORTS) {
            if self.view_flags.contains(ViewFlags::INVISIBLE_SUPPORTS) {
                return None;
            }
            return Some(ImageId::SEE_THROUGH);
        }
        Some(colour_flags)
    }

    /// Add a sorted image whose bounding box starts at its own offset.
    pub fn paint_parent(&mut self, image: ImageId, offset: IVec3, length: IVec3) -> Option<PaintHandle> {
        self.paint_parent_boxed(image, offset, BoundBox::new(offset, length))
    }

    /// Add a sorted image with an explicit bounding box.
    pub fn paint_parent_boxed(
        &mut self,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
    ) -> Option<PaintHandle> {
        let rotation = self.rotation;
        self.sink.add_image_as_parent(image, offset, bound_box, rotation)
    }

    /// Add an unsorted image for later linking.
    pub fn paint_orphan(&mut self, image: ImageId, offset: IVec3, bound_box: BoundBox) -> Option<PaintHandle> {
        let rotation = self.rotation;
        self.sink.add_image_as_orphan(image, offset, bound_box, rotation)
    }
}
