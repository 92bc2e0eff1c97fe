// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **History**: Undo log capacity and debounce quiet period
//! - **Render**: Frame coalescing interval, viewport and grain seed
//! - **Export**: Default encoder quality
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of snapshots kept in the undo log.
pub const DEFAULT_HISTORY_CAPACITY: usize = 30;

/// Minimum number of snapshots kept in the undo log.
pub const MIN_HISTORY_CAPACITY: usize = 1;

/// Maximum number of snapshots kept in the undo log.
pub const MAX_HISTORY_CAPACITY: usize = 200;

/// Default quiet period before a slider burst is committed (milliseconds).
pub const DEFAULT_HISTORY_DEBOUNCE_MS: u64 = 300;

/// Maximum quiet period (milliseconds).
pub const MAX_HISTORY_DEBOUNCE_MS: u64 = 5_000;

// ==========================================================================
// Render Defaults
// ==========================================================================

/// Delay between a render request and the frame that serves it (milliseconds).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Default maximum canvas width before the source is scaled down for display.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Default maximum canvas height before the source is scaled down for display.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Smallest viewport edge accepted from configuration.
pub const MIN_VIEWPORT_EDGE: u32 = 64;

/// Default seed for film grain noise (kept below `i64::MAX` for TOML).
pub const DEFAULT_GRAIN_SEED: u64 = 0x2545_F491_4F6C_DD1D;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default quality for lossy export formats.
pub const DEFAULT_EXPORT_QUALITY: u8 = 92;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // History validation
    assert!(MIN_HISTORY_CAPACITY > 0);
    assert!(DEFAULT_HISTORY_CAPACITY >= MIN_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_CAPACITY <= MAX_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_DEBOUNCE_MS <= MAX_HISTORY_DEBOUNCE_MS);

    // Render validation
    assert!(DEFAULT_FRAME_INTERVAL_MS > 0);
    assert!(DEFAULT_VIEWPORT_WIDTH >= MIN_VIEWPORT_EDGE);
    assert!(DEFAULT_VIEWPORT_HEIGHT >= MIN_VIEWPORT_EDGE);

    // Export validation
    assert!(DEFAULT_EXPORT_QUALITY > 0);
    assert!(DEFAULT_EXPORT_QUALITY <= 100);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
