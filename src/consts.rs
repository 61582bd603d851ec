//! Shared numeric constants for the selection engine.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width/height a region may keep once a gesture completes.
pub const MIN_REGION_SIZE: f64 = 50.0;

/// Origin of the region seeded when a new image loads.
pub const DEFAULT_REGION_ORIGIN: f64 = 100.0;

/// Width/height of the region seeded when a new image loads.
pub const DEFAULT_REGION_SIZE: f64 = 150.0;

/// Distance a directional nudge moves the region, in image pixels.
pub const NUDGE_STEP_PX: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Drawn size of the resize handle square, and the per-axis slop around
/// the bottom-right corner that counts as grabbing it.
pub const HANDLE_SIZE_PX: f64 = 8.0;
