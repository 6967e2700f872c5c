//! Paint Sink
//!
//! The support painters do not own the paint-struct pool or the z-sorter. They
//! hand every sprite to a [`PaintSink`], which places it at a tile-relative
//! offset with an axis-aligned bounding box and returns a handle that can later
//! be linked as the child of another paint struct.
//!
//! [`PaintRecorder`] is the in-crate sink used by the scene replay tool and the
//! tests. It keeps every image in emission order, up to a fixed capacity.

use bytemuck::{Pod, Zeroable};
use glam::IVec3;
use serde::{Deserialize, Serialize};

use super::image::ImageId;

/// Number of paint structs available per session in the engine's pool.
pub const DEFAULT_PAINT_STRUCT_CAPACITY: usize = 4000;

// ============================================================================
// TYPES
// ============================================================================

/// Axis-aligned bounding box used for occlusion sorting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundBox {
    /// Tile-relative origin of the box
    pub offset: IVec3,
    /// Extent along each axis
    pub length: IVec3,
}

impl BoundBox {
    pub const fn new(offset: IVec3, length: IVec3) -> Self {
        Self { offset, length }
    }
}

/// Handle to a paint struct created by a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaintHandle(pub usize);

/// How an image was attached to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintAttachment {
    /// Inserted into the quadrant lists and sorted independently
    Parent,
    /// Not sorted on its own; only drawn once linked under a parent
    Orphan,
}

/// A sprite accepted by a [`PaintRecorder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintedImage {
    pub image: ImageId,
    pub offset: IVec3,
    pub bound_box: BoundBox,
    pub rotation: u8,
    pub attachment: PaintAttachment,
    /// Paint struct drawn directly after this one, if linked
    pub children: Option<PaintHandle>,
}

// ============================================================================
// SINK TRAIT
// ============================================================================

/// Destination for the sprites emitted by the support painters.
///
/// Returning `None` means the pool is exhausted; painters treat the image as
/// drawn regardless.
pub trait PaintSink {
    /// Place an image that takes part in occlusion sorting.
    fn add_image_as_parent(
        &mut self,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
        rotation: u8,
    ) -> Option<PaintHandle>;

    /// Create an image that is only drawn once attached to a parent.
    fn add_image_as_orphan(
        &mut self,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
        rotation: u8,
    ) -> Option<PaintHandle>;

    /// Make `child` the paint struct drawn immediately after `parent`.
    fn set_children(&mut self, parent: PaintHandle, child: PaintHandle);

    /// Create an image whose draw order is locked to `parent`.
    fn add_image_as_child(
        &mut self,
        parent: PaintHandle,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
        rotation: u8,
    ) -> Option<PaintHandle> {
        let child = self.add_image_as_orphan(image, offset, bound_box, rotation)?;
        self.set_children(parent, child);
        Some(child)
    }
}

// ============================================================================
// RECORDING SINK
// ============================================================================

/// Sink that records every accepted image in emission order.
#[derive(Clone, Debug)]
pub struct PaintRecorder {
    images: Vec<PaintedImage>,
    capacity: usize,
}

impl PaintRecorder {
    /// Create a recorder with the engine's default pool size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PAINT_STRUCT_CAPACITY)
    }

    /// Create a recorder that rejects images past `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            images: Vec::new(),
            capacity,
        }
    }

    pub fn images(&self) -> &[PaintedImage] {
        &self.images
    }

    pub fn get(&self, handle: PaintHandle) -> Option<&PaintedImage> {
        self.images.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Drop all recorded images, keeping the capacity.
    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Take the recorded images, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<PaintedImage> {
        std::mem::take(&mut self.images)
    }

    fn push(
        &mut self,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
        rotation: u8,
        attachment: PaintAttachment,
    ) -> Option<PaintHandle> {
        if self.images.len() >= self.capacity {
            return None;
        }
        let handle = PaintHandle(self.images.len());
        self.images.push(PaintedImage {
            image,
            offset,
            bound_box,
            rotation,
            attachment,
            children: None,
        });
        Some(handle)
    }
}

impl Default for PaintRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaintSink for PaintRecorder {
    fn add_image_as_parent(
        &mut self,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
        rotation: u8,
    ) -> Option<PaintHandle> {
        self.push(image, offset, bound_box, rotation, PaintAttachment::Parent)
    }

    fn add_image_as_orphan(
        &mut self,
        image: ImageId,
        offset: IVec3,
        bound_box: BoundBox,
        rotation: u8,
    ) -> Option<PaintHandle> {
        self.push(image, offset, bound_box, rotation, PaintAttachment::Orphan)
    }

    fn set_children(&mut self, parent: PaintHandle, child: PaintHandle) {
        if let Some(entry) = self.images.get_mut(parent.0) {
            entry.children = Some(child);
        }
    }
}

// ============================================================================
// PACKED TRACE RECORD
// ============================================================================

/// Fixed-size binary form of a [`PaintedImage`] for trace files.
///
/// Layout: image (4) + offset (12) + bound box offset (12) + bound box length
/// (12) + children (4, `u32::MAX` for none) + rotation (1) + attachment (1)
/// + padding (2) = 48 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PackedPaintRecord {
    pub image: u32,
    pub offset: [i32; 3],
    pub bound_box_offset: [i32; 3],
    pub bound_box_length: [i32; 3],
    pub children: u32,
    pub rotation: u8,
    /// 0 = parent, 1 = orphan
    pub attachment: u8,
    pub _pad: [u8; 2],
}

static_assertions::assert_eq_size!(PackedPaintRecord, [u8; 48]);

impl From<&PaintedImage> for PackedPaintRecord {
    fn from(painted: &PaintedImage) -> Self {
        Self {
            image: painted.image.raw(),
            offset: painted.offset.to_array(),
            bound_box_offset: painted.bound_box.offset.to_array(),
            bound_box_length: painted.bound_box.length.to_array(),
            children: painted
                .children
                .map(|handle| handle.0 as u32)
                .unwrap_or(u32::MAX),
            rotation: painted.rotation,
            attachment: match painted.attachment {
                PaintAttachment::Parent => 0,
                PaintAttachment::Orphan => 1,
            },
            _pad: [0; 2],
        }
    }
}

/// Pack recorded images into the raw trace byte layout.
pub fn pack_trace(images: &[PaintedImage]) -> Vec<u8> {
    let records: Vec<PackedPaintRecord> = images.iter().map(PackedPaintRecord::from).collect();
    bytemuck::cast_slice(&records).to_vec()
}
