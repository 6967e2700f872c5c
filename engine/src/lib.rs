//! Ride Supports Engine Library
//!
//! Support painting for an isometric tile renderer. For every track or footpath
//! tile the renderer paints, the painters in this crate emit the sprites of the
//! legs, poles, crossbeams and braces that hold it above the terrain, taking
//! into account the terrain slope, the viewport rotation and whatever earlier
//! calls have already stacked on the same tile.
//!
//! # Modules
//!
//! - [`paint`] - Image ids, the paint sink seam and the per-tile paint session
//! - [`supports`] - Wooden, metal and footpath support painters and their tables
//! - [`config`] - Viewport configuration loaded from JSON
//! - [`scene`] - JSON scene replay used by the `support-replay` tool
//! - [`error`] - Error type for input validation and file loading
//!
//! # Example
//!
//! ```
//! use ride_supports_engine::paint::{PaintRecorder, PaintSession};
//! use ride_supports_engine::supports::{
//!     WoodenSupportSubType, WoodenSupportType, wooden_a_supports_paint_setup,
//! };
//!
//! let mut session = PaintSession::new(PaintRecorder::new());
//! session.reset_for_tile();
//! session.pass_surface();
//! session.force_set_general_support_height(0, 0);
//!
//! let outcome = wooden_a_supports_paint_setup(
//!     &mut session,
//!     WoodenSupportType::Truss,
//!     WoodenSupportSubType::NeSw,
//!     0,
//!     48,
//!     0,
//! );
//! assert!(outcome.drawn);
//! assert_eq!(session.sink.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod paint;
pub mod scene;
pub mod supports;

// Re-export commonly used types at crate level
pub use config::{SupportVisibility, ViewConfig};
pub use error::SupportError;
pub use paint::{ImageId, PaintRecorder, PaintSession, PaintSink};
pub use scene::{Scene, SceneReport, replay_scene};
pub use supports::{SegmentMask, SupportHeight, SupportsOutcome};
