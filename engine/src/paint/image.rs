//! Image Identifiers
//!
//! Sprites are addressed by an opaque 32-bit identifier: the low bits hold the
//! sprite index into the atlas, the high bits carry colour and palette flags
//! supplied by the caller. The support painters never decode those flags, they
//! only OR them onto an index they looked up.

use serde::{Deserialize, Serialize};

/// Opaque sprite identifier with colour/palette bits OR'd in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u32);

impl ImageId {
    /// Mask of the bits that address the sprite itself.
    pub const INDEX_MASK: u32 = 0x0007_FFFF;

    /// Image type bit marking a transparent (palette-filtered) sprite.
    pub const TYPE_TRANSPARENT: u32 = 1 << 30;

    /// Palette used to darken see-through supports.
    pub const PALETTE_DARKEN_1: u32 = 33;

    /// Colour template applied when supports are hidden but not invisible.
    pub const SEE_THROUGH: u32 = Self::TYPE_TRANSPARENT | (Self::PALETTE_DARKEN_1 << 19);

    /// Build an identifier from a sprite index and the caller's colour flags.
    #[inline]
    pub fn new(index: u32, colour_flags: u32) -> Self {
        Self(index | colour_flags)
    }

    /// The sprite index without colour bits.
    #[inline]
    pub fn index(self) -> u32 {
        self.0 & Self::INDEX_MASK
    }

    /// The colour/palette bits.
    #[inline]
    pub fn flags(self) -> u32 {
        self.0 & !Self::INDEX_MASK
    }

    /// Raw value as handed to the sprite renderer.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<ImageId> for u32 {
    fn from(image: ImageId) -> Self {
        image.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_flags_are_ored_not_added() {
        let flags = 0x2000_0000 | (5 << 19);
        let image = ImageId::new(3392, flags);
        assert_eq!(image.index(), 3392);
        assert_eq!(image.flags(), flags);

        // OR is idempotent, addition would not be
        let twice = ImageId::new(image.raw(), flags);
        assert_eq!(twice, image);
    }

    #[test]
    fn test_see_through_template_has_no_index_bits() {
        assert_eq!(ImageId::SEE_THROUGH & ImageId::INDEX_MASK, 0);
    }
}
