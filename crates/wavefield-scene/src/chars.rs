//! Character constants for scene rendering.

/// Particle glyphs from nearest to farthest.
pub const POINT_CHARS: [char; 3] = ['●', '•', '·'];

/// Cloud glyphs from thinnest to densest.
pub const CLOUD_CHARS: [char; 3] = ['░', '▒', '▓'];

/// Cursor dot.
pub const CURSOR_DOT: char = '●';

/// Cursor follower ring.
pub const CURSOR_RING: char = '◯';
