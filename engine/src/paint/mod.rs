//! Paint Module
//!
//! The seam between the support painters and the renderer: image identifiers,
//! the [`PaintSink`] trait the painters emit into, and the [`PaintSession`]
//! that carries per-tile state between calls.
//!
//! # Submodules
//!
//! - [`image`] - Opaque sprite identifiers with colour flags
//! - [`sink`] - Paint sink trait, recording sink and binary trace records
//! - [`session`] - Viewport/tile state and support trackers

pub mod image;
pub mod session;
pub mod sink;

pub use image::ImageId;
pub use session::{PaintSession, SessionFlags, ViewFlags};
pub use sink::{
    BoundBox, DEFAULT_PAINT_STRUCT_CAPACITY, PackedPaintRecord, PaintAttachment, PaintHandle,
    PaintRecorder, PaintSink, PaintedImage, pack_trace,
};
