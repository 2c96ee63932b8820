/// Seed forwarded to the remote generator for reproducible output.
pub type Seed = u32;

/// Largest seed the randomizer will draw (inclusive).
pub const MAX_SEED: Seed = 999_999;

/// Images travel as plain 8-bit RGB buffers across the crate boundary.
pub type RgbImage = image::RgbImage;
