//! View Configuration
//!
//! Viewport options that affect support painting, loaded from JSON.
//!
//! ```json
//! {
//!     "rotation": 1,
//!     "supports": "see_through",
//!     "paint_struct_capacity": 4000,
//!     "extension_sprite_base": 29000
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SupportError;
use crate::paint::sink::DEFAULT_PAINT_STRUCT_CAPACITY;
use crate::paint::{PaintSession, PaintSink, ViewFlags};

/// How supports appear in the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportVisibility {
    #[default]
    Visible,
    /// Drawn with the darkened transparent palette
    SeeThrough,
    Invisible,
}

impl SupportVisibility {
    pub fn view_flags(self) -> ViewFlags {
        match self {
            Self::Visible => ViewFlags::empty(),
            Self::SeeThrough => ViewFlags::HIDE_SUPPORTS,
            Self::Invisible => ViewFlags::HIDE_SUPPORTS | ViewFlags::INVISIBLE_SUPPORTS,
        }
    }
}

/// Viewport configuration for a painting pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Viewport rotation (0-3)
    pub rotation: u8,
    pub supports: SupportVisibility,
    /// Paint structs available to the recording sink
    pub paint_struct_capacity: usize,
    /// First support sprite of the extension sheet. Without it the large
    /// truss curve braces are skipped.
    pub extension_sprite_base: Option<u32>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rotation: 0,
            supports: SupportVisibility::Visible,
            paint_struct_capacity: DEFAULT_PAINT_STRUCT_CAPACITY,
            extension_sprite_base: None,
        }
    }
}

impl ViewConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SupportError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SupportError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SupportError> {
        if self.rotation > 3 {
            return Err(SupportError::InvalidRotation(self.rotation));
        }
        Ok(())
    }

    /// Apply rotation, visibility and sprite sheets to a session.
    pub fn apply<S: PaintSink>(&self, session: &mut PaintSession<S>) {
        session.set_rotation(self.rotation);
        session.view_flags = self.supports.view_flags();
        session.extension_sprite_base = self.extension_sprite_base;
    }
}
