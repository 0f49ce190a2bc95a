//! Constants for the download session lifecycle.

use std::time::Duration;

/// Progress value at which a session stops ticking.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Interval between progress ticks (100 ticks, about 15 seconds end to end).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// Pause between reaching 100% and handing off.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Validation message for a blank display name.
pub const NAME_REQUIRED: &str = "Name is required";

/// Validation message for a blank access code.
pub const CODE_REQUIRED: &str = "Code is required";
