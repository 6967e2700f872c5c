//! Support Kinds
//!
//! Validated identifiers for the support families. Raw `u8` values coming from
//! callers or scene files go through `TryFrom<u8>`, so the painters can index
//! their tables without range checks.

use serde::{Deserialize, Serialize};

use crate::error::SupportError;

/// Number of quarter-turn directions.
pub const NUM_DIRECTIONS: usize = 4;

/// Column of a per-direction table for a direction or rotation; only the
/// lowest two bits count.
#[inline]
pub fn direction_index(direction: u8) -> usize {
    usize::from(direction) % NUM_DIRECTIONS
}

// ============================================================================
// WOODEN
// ============================================================================

/// Sprite family of a wooden support.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoodenSupportType {
    Truss = 0,
    Mine = 1,
}

/// Orientation of a wooden support relative to the tile.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoodenSupportSubType {
    NeSw = 0,
    NwSe = 1,
    Corner0 = 2,
    Corner1 = 3,
    Corner2 = 4,
    Corner3 = 5,
}

/// Sub-type after turning the piece by a track direction.
const WOODEN_SUB_TYPE_ROTATED: [[WoodenSupportSubType; NUM_DIRECTIONS]; 6] = {
    use WoodenSupportSubType::*;
    [
        [NeSw, NwSe, NeSw, NwSe],
        [NwSe, NeSw, NwSe, NeSw],
        [Corner0, Corner1, Corner2, Corner3],
        [Corner1, Corner2, Corner3, Corner0],
        [Corner2, Corner3, Corner0, Corner1],
        [Corner3, Corner0, Corner1, Corner2],
    ]
};

impl WoodenSupportType {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl WoodenSupportSubType {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sub-type seen after turning the track piece by `direction`.
    pub fn rotated(self, direction: u8) -> Self {
        WOODEN_SUB_TYPE_ROTATED[self.index()][direction_index(direction)]
    }
}

impl TryFrom<u8> for WoodenSupportType {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Truss),
            1 => Ok(Self::Mine),
            _ => Err(SupportError::InvalidWoodenSupportType(value)),
        }
    }
}

impl TryFrom<u8> for WoodenSupportSubType {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NeSw),
            1 => Ok(Self::NwSe),
            2 => Ok(Self::Corner0),
            3 => Ok(Self::Corner1),
            4 => Ok(Self::Corner2),
            5 => Ok(Self::Corner3),
            _ => Err(SupportError::InvalidWoodenSupportSubType(value)),
        }
    }
}

// ============================================================================
// METAL
// ============================================================================

/// Sprite family of a metal pole support.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalSupportType {
    Tubes = 0,
    Fork = 1,
    ForkAlt = 2,
    Boxed = 3,
    Stick = 4,
    StickAlt = 5,
    ThickCentred = 6,
    Thick = 7,
    ThickAlt = 8,
    ThickAltCentred = 9,
    Truss = 10,
    TubesInverted = 11,
    BoxedCoated = 12,
}

impl MetalSupportType {
    pub const COUNT: usize = 13;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Tubes,
        Self::Fork,
        Self::ForkAlt,
        Self::Boxed,
        Self::Stick,
        Self::StickAlt,
        Self::ThickCentred,
        Self::Thick,
        Self::ThickAlt,
        Self::ThickAltCentred,
        Self::Truss,
        Self::TubesInverted,
        Self::BoxedCoated,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Type to use after turning the track piece by `direction`.
    ///
    /// Asymmetric families swap with their mirrored counterpart.
    pub fn rotated(self, direction: u8) -> Self {
        METAL_TYPE_ROTATED[self.index()][direction_index(direction)]
    }
}

const METAL_TYPE_ROTATED: [[MetalSupportType; NUM_DIRECTIONS]; MetalSupportType::COUNT] = {
    use MetalSupportType::*;
    [
        [Tubes, Tubes, Tubes, Tubes],
        [Fork, ForkAlt, Fork, ForkAlt],
        [ForkAlt, Fork, ForkAlt, Fork],
        [Boxed, Boxed, Boxed, Boxed],
        [Stick, StickAlt, Stick, StickAlt],
        [StickAlt, Stick, StickAlt, Stick],
        [ThickCentred, ThickAltCentred, Thick, ThickAlt],
        [Thick, ThickAlt, ThickCentred, ThickAltCentred],
        [ThickAlt, ThickCentred, ThickAltCentred, Thick],
        [ThickAltCentred, Thick, ThickAlt, ThickCentred],
        [Truss, Truss, Truss, Truss],
        [TubesInverted, TubesInverted, TubesInverted, TubesInverted],
        [BoxedCoated, BoxedCoated, BoxedCoated, BoxedCoated],
    ]
};

impl TryFrom<u8> for MetalSupportType {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(SupportError::InvalidMetalSupportType(value))
    }
}

/// Segment of a tile a pole support stands on.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalSupportPlace {
    TopCorner = 0,
    LeftCorner = 1,
    RightCorner = 2,
    BottomCorner = 3,
    Centre = 4,
    TopLeftSide = 5,
    TopRightSide = 6,
    BottomLeftSide = 7,
    BottomRightSide = 8,
}

const METAL_PLACE_ROTATED: [[MetalSupportPlace; NUM_DIRECTIONS]; 9] = {
    use MetalSupportPlace::*;
    [
        [TopCorner, RightCorner, BottomCorner, LeftCorner],
        [LeftCorner, TopCorner, RightCorner, BottomCorner],
        [RightCorner, BottomCorner, LeftCorner, TopCorner],
        [BottomCorner, LeftCorner, TopCorner, RightCorner],
        [Centre, Centre, Centre, Centre],
        [TopLeftSide, TopRightSide, BottomRightSide, BottomLeftSide],
        [TopRightSide, BottomRightSide, BottomLeftSide, TopLeftSide],
        [BottomLeftSide, TopLeftSide, TopRightSide, BottomRightSide],
        [BottomRightSide, BottomLeftSide, TopLeftSide, TopRightSide],
    ]
};

impl MetalSupportPlace {
    pub const ALL: [Self; 9] = [
        Self::TopCorner,
        Self::LeftCorner,
        Self::RightCorner,
        Self::BottomCorner,
        Self::Centre,
        Self::TopLeftSide,
        Self::TopRightSide,
        Self::BottomLeftSide,
        Self::BottomRightSide,
    ];

    /// Index into the session's segment array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Placement after turning the track piece by `direction`.
    pub fn rotated(self, direction: u8) -> Self {
        METAL_PLACE_ROTATED[self.index()][direction_index(direction)]
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }
}

impl TryFrom<u8> for MetalSupportPlace {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(SupportError::InvalidSegment(value))
    }
}

// ============================================================================
// PATH
// ============================================================================

/// Orientation of a footpath bridge box support.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSupportOrientation {
    NeSw = 0,
    NwSe = 1,
}

impl PathSupportOrientation {
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u8> for PathSupportOrientation {
    type Error = SupportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NeSw),
            1 => Ok(Self::NwSe),
            _ => Err(SupportError::InvalidPathOrientation(value)),
        }
    }
}
