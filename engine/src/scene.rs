//! Scene Replay
//!
//! A scene is a JSON description of a sequence of tiles, each with an optional
//! land surface and an ordered list of calls a track or footpath painter would
//! make. Replaying it drives a [`PaintSession`] over a [`PaintRecorder`] and
//! reports what each call returned and which images were emitted.
//!
//! ```json
//! {
//!   "tiles": [{
//!     "surface": { "height": 0, "slope": 0 },
//!     "calls": [
//!       { "op": "wooden_a", "support_type": "truss", "sub_type": "ne_sw",
//!         "special": 1, "height": 48 },
//!       { "op": "metal_a", "support_type": "tubes", "place": "centre", "height": 64 }
//!     ]
//!   }]
//! }
//! ```

use std::path::Path;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;
use crate::error::SupportError;
use crate::paint::{ImageId, PaintHandle, PaintRecorder, PaintSession, PaintSink, PaintedImage};
use crate::supports::{
    self, FootpathPaintInfo, MetalSupportPlace, MetalSupportType, PathSupportOrientation,
    SegmentMask, SupportsOutcome, WoodenSupportSubType, WoodenSupportType,
};

// ============================================================================
// SCENE DESCRIPTION
// ============================================================================

/// A replayable sequence of tiles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Replaces the caller's view config when present
    #[serde(default)]
    pub view: Option<ViewConfig>,
    /// Overrides the rotation of whichever view config is used
    #[serde(default)]
    pub rotation: Option<u8>,
    #[serde(default)]
    pub tiles: Vec<TileScene>,
}

/// One tile of a scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileScene {
    #[serde(default)]
    pub name: Option<String>,
    /// Tiles without a surface never get supports
    #[serde(default)]
    pub surface: Option<Surface>,
    #[serde(default)]
    pub calls: Vec<SupportCall>,
}

/// Land surface painted before the tile's track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub height: u16,
    #[serde(default)]
    pub slope: u8,
    #[serde(default)]
    pub water_height: Option<u16>,
}

impl Surface {
    /// Record the surface on every tracker and enable supports for the tile.
    pub fn apply<S: PaintSink>(&self, session: &mut PaintSession<S>) {
        session.pass_surface();
        session.water_height = self.water_height;
        session.force_set_general_support_height(self.height, self.slope);
        session.set_segment_support_height(SegmentMask::ALL, self.height, self.slope);
    }
}

/// One call made while painting a tile.
///
/// Support heights and specials are 16-bit; values outside that range fail
/// to parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SupportCall {
    WoodenA {
        support_type: WoodenSupportType,
        sub_type: WoodenSupportSubType,
        #[serde(default)]
        direction: Option<u8>,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
    },
    WoodenB {
        support_type: WoodenSupportType,
        sub_type: WoodenSupportSubType,
        #[serde(default)]
        direction: Option<u8>,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
    },
    MetalA {
        support_type: MetalSupportType,
        place: MetalSupportPlace,
        #[serde(default)]
        direction: Option<u8>,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
    },
    MetalB {
        support_type: MetalSupportType,
        place: MetalSupportPlace,
        #[serde(default)]
        direction: Option<u8>,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
    },
    MetalSideBySide {
        support_type: MetalSupportType,
        direction: u8,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
    },
    PathBox {
        orientation: PathSupportOrientation,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
        path: FootpathPaintInfo,
    },
    PathPole {
        place: MetalSupportPlace,
        #[serde(default)]
        special: i16,
        height: i16,
        #[serde(default)]
        colour: u32,
        path: FootpathPaintInfo,
    },
    /// A track sprite painted by the ride itself
    TrackImage {
        image: u32,
        offset: IVec3,
        length: IVec3,
        /// Link steep wooden braces under this image
        #[serde(default)]
        prepend: bool,
    },
    SetSegmentSupportHeight {
        segments: SegmentMask,
        /// Rotate `segments` by a track direction first
        #[serde(default)]
        direction: Option<u8>,
        height: u16,
        #[serde(default)]
        slope: u8,
    },
    SetGeneralSupportHeight {
        height: u16,
        #[serde(default)]
        slope: u8,
    },
    ForceSetGeneralSupportHeight {
        height: u16,
        #[serde(default)]
        slope: u8,
    },
}

/// What a call returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallResult {
    /// Wooden and footpath box supports
    Outcome(SupportsOutcome),
    /// Metal A: drawn. Metal B and footpath poles: blocked.
    Flag(bool),
    /// Image emitted by a track call
    Painted(Option<PaintHandle>),
    /// Tracker updates
    Updated,
}

fn check_direction(direction: Option<u8>) -> Result<Option<u8>, SupportError> {
    match direction {
        Some(value) if value > 3 => Err(SupportError::InvalidRotation(value)),
        other => Ok(other),
    }
}

impl SupportCall {
    /// Name of the operation, as written in scene files.
    pub fn op(&self) -> &'static str {
        match self {
            Self::WoodenA { .. } => "wooden_a",
            Self::WoodenB { .. } => "wooden_b",
            Self::MetalA { .. } => "metal_a",
            Self::MetalB { .. } => "metal_b",
            Self::MetalSideBySide { .. } => "metal_side_by_side",
            Self::PathBox { .. } => "path_box",
            Self::PathPole { .. } => "path_pole",
            Self::TrackImage { .. } => "track_image",
            Self::SetSegmentSupportHeight { .. } => "set_segment_support_height",
            Self::SetGeneralSupportHeight { .. } => "set_general_support_height",
            Self::ForceSetGeneralSupportHeight { .. } => "force_set_general_support_height",
        }
    }

    /// Run the call against a session.
    pub fn run<S: PaintSink>(&self, session: &mut PaintSession<S>) -> Result<CallResult, SupportError> {
        let result = match *self {
            Self::WoodenA {
                support_type,
                sub_type,
                direction,
                special,
                height,
                colour,
            } => CallResult::Outcome(match check_direction(direction)? {
                Some(direction) => supports::wooden_a_supports_paint_setup_rotated(
                    session,
                    support_type,
                    sub_type,
                    direction,
                    special,
                    height,
                    colour,
                ),
                None => supports::wooden_a_supports_paint_setup(
                    session,
                    support_type,
                    sub_type,
                    special,
                    height,
                    colour,
                ),
            }),
            Self::WoodenB {
                support_type,
                sub_type,
                direction,
                special,
                height,
                colour,
            } => CallResult::Outcome(match check_direction(direction)? {
                Some(direction) => supports::wooden_b_supports_paint_setup_rotated(
                    session,
                    support_type,
                    sub_type,
                    direction,
                    special,
                    height,
                    colour,
                ),
                None => supports::wooden_b_supports_paint_setup(
                    session,
                    support_type,
                    sub_type,
                    special,
                    height,
                    colour,
                ),
            }),
            Self::MetalA {
                support_type,
                place,
                direction,
                special,
                height,
                colour,
            } => CallResult::Flag(match check_direction(direction)? {
                Some(direction) => supports::metal_a_supports_paint_setup_rotated(
                    session,
                    support_type,
                    place,
                    direction,
                    special,
                    height,
                    colour,
                ),
                None => supports::metal_a_supports_paint_setup(
                    session,
                    support_type,
                    place,
                    special,
                    height,
                    colour,
                ),
            }),
            Self::MetalB {
                support_type,
                place,
                direction,
                special,
                height,
                colour,
            } => CallResult::Flag(match check_direction(direction)? {
                Some(direction) => supports::metal_b_supports_paint_setup_rotated(
                    session,
                    support_type,
                    place,
                    direction,
                    special,
                    height,
                    colour,
                ),
                None => supports::metal_b_supports_paint_setup(
                    session,
                    support_type,
                    place,
                    special,
                    height,
                    colour,
                ),
            }),
            Self::MetalSideBySide {
                support_type,
                direction,
                special,
                height,
                colour,
            } => {
                check_direction(Some(direction))?;
                supports::draw_supports_side_by_side(
                    session,
                    direction,
                    height,
                    colour,
                    support_type,
                    special,
                );
                CallResult::Updated
            }
            Self::PathBox {
                orientation,
                special,
                height,
                colour,
                ref path,
            } => CallResult::Outcome(supports::path_box_supports_paint_setup(
                session,
                orientation,
                special,
                height,
                colour,
                path,
            )),
            Self::PathPole {
                place,
                special,
                height,
                colour,
                ref path,
            } => CallResult::Flag(supports::path_pole_supports_paint_setup(
                session, place, special, height, colour, path,
            )),
            Self::TrackImage {
                image,
                offset,
                length,
                prepend,
            } => {
                let handle = session.paint_parent(ImageId(image), offset, length);
                if prepend {
                    session.wooden_supports_prepend_to = handle;
                }
                CallResult::Painted(handle)
            }
            Self::SetSegmentSupportHeight {
                segments,
                direction,
                height,
                slope,
            } => {
                let segments = match check_direction(direction)? {
                    Some(direction) => segments.rotate(direction),
                    None => segments,
                };
                session.set_segment_support_height(segments, height, slope);
                CallResult::Updated
            }
            Self::SetGeneralSupportHeight { height, slope } => {
                session.set_general_support_height(height, slope);
                CallResult::Updated
            }
            Self::ForceSetGeneralSupportHeight { height, slope } => {
                session.force_set_general_support_height(height, slope);
                CallResult::Updated
            }
        };
        Ok(result)
    }
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, SupportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SupportError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

// ============================================================================
// REPLAY
// ============================================================================

/// Result of one call in a replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReport {
    pub tile: usize,
    pub op: String,
    pub result: CallResult,
    /// Range of recorded images this call emitted
    pub first_image: usize,
    pub image_count: usize,
}

/// Everything a replay produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneReport {
    pub calls: Vec<CallReport>,
    pub images: Vec<PaintedImage>,
}

impl SceneReport {
    /// Images emitted by one call.
    pub fn images_of(&self, call: &CallReport) -> &[PaintedImage] {
        &self.images[call.first_image..call.first_image + call.image_count]
    }
}

/// Replay every tile of `scene` on one session, resetting the trackers at the
/// start of each tile.
pub fn replay_scene(scene: &Scene, config: &ViewConfig) -> Result<SceneReport, SupportError> {
    let mut config = scene.view.clone().unwrap_or_else(|| config.clone());
    if let Some(rotation) = scene.rotation {
        config.rotation = rotation;
    }
    config.validate()?;

    let mut session = PaintSession::new(PaintRecorder::with_capacity(config.paint_struct_capacity));
    config.apply(&mut session);

    let mut calls = Vec::new();
    for (tile_index, tile) in scene.tiles.iter().enumerate() {
        session.reset_for_tile();
        if let Some(surface) = &tile.surface {
            surface.apply(&mut session);
        }
        log::debug!(
            "tile {tile_index} ({}): {} calls",
            tile.name.as_deref().unwrap_or("unnamed"),
            tile.calls.len()
        );

        for call in &tile.calls {
            let first_image = session.sink.len();
            let result = call.run(&mut session)?;
            calls.push(CallReport {
                tile: tile_index,
                op: call.op().to_string(),
                result,
                first_image,
                image_count: session.sink.len() - first_image,
            });
        }
    }

    let images = session.sink.take();
    log::info!("replayed {} tiles: {} calls, {} images", scene.tiles.len(), calls.len(), images.len());
    Ok(SceneReport { calls, images })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_scene() {
        let scene = Scene::from_json(
            r#"{"tiles": [{"surface": {"height": 0}, "calls": [
                {"op": "wooden_a", "support_type": "truss", "sub_type": "ne_sw", "height": 32}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(scene.tiles.len(), 1);
        assert_eq!(scene.tiles[0].calls[0].op(), "wooden_a");
    }

    #[test]
    fn test_unknown_op_is_json_error() {
        let err = Scene::from_json(r#"{"tiles": [{"calls": [{"op": "teleport"}]}]}"#).unwrap_err();
        assert!(matches!(err, SupportError::Json(_)));
    }

    #[test]
    fn test_height_out_of_range_is_json_error() {
        let err = Scene::from_json(
            r#"{"tiles": [{"calls": [
                {"op": "metal_b", "support_type": "tubes", "place": "centre", "height": 40000}
            ]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SupportError::Json(_)));
    }

    #[test]
    fn test_bad_direction_rejected() {
        let scene = Scene::from_json(
            r#"{"tiles": [{"surface": {"height": 0}, "calls": [
                {"op": "metal_a", "support_type": "tubes", "place": "centre",
                 "direction": 7, "height": 32}
            ]}]}"#,
        )
        .unwrap();
        let err = replay_scene(&scene, &ViewConfig::default()).unwrap_err();
        assert!(matches!(err, SupportError::InvalidRotation(7)));
    }

    #[test]
    fn test_tile_without_surface_draws_nothing() {
        let scene = Scene::from_json(
            r#"{"tiles": [{"calls": [
                {"op": "wooden_a", "support_type": "truss", "sub_type": "ne_sw", "height": 64}
            ]}]}"#,
        )
        .unwrap();
        let report = replay_scene(&scene, &ViewConfig::default()).unwrap();
        assert!(report.images.is_empty());
        assert_eq!(report.calls[0].result, CallResult::Outcome(SupportsOutcome::NOT_DRAWN));
    }
}
