//! Global constants for dk-core

/// Pointer delta (pixels) to transform units multiplier for handle drags
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Smallest uniform scale a decal may shrink to
pub const MIN_UNIFORM_SCALE: f32 = 0.05;

/// Smallest aspect ratio accepted for a decal
pub const MIN_ASPECT_RATIO: f32 = 1e-3;

/// X/Y offset applied to a duplicated decal so it does not cover the original
pub const DUPLICATE_OFFSET: f32 = 0.05;

/// Text canvas padding as a fraction of the larger text extent
pub const TEXT_PADDING_RATIO: f32 = 0.2;

/// Largest side of a text decal canvas (pixels)
pub const MAX_TEXT_CANVAS_SIDE: u32 = 4096;

/// Font size below which oversized text is rejected rather than shrunk
pub const MIN_TEXT_FONT_SIZE: f32 = 4.0;

/// Default font size for text decals (pixels)
pub const DEFAULT_FONT_SIZE: f32 = 64.0;

/// Line height multiplier used when laying out text decals
pub const TEXT_LINE_HEIGHT: f32 = 1.2;
