//! The LIMITS command: capacity reporting.

use tracing::{info, warn};

use super::{Registrar, RegistrarResult};

impl Registrar {
    /// Handle LIMITS.
    pub(super) fn handle_limits(&self) -> RegistrarResult {
        self.check_limits()
    }

    /// Report current room usage, logging a warning when usage crosses
    /// the configured high-water mark. Also called after each section
    /// creation.
    pub(crate) fn check_limits(&self) -> RegistrarResult {
        let rooms = self.platform.rooms_in_use();
        let remaining = self.platform.sections_remaining();

        if rooms > self.warn_threshold {
            warn!(rooms, remaining, "Total rooms approaching max");
        } else {
            info!(rooms, remaining, "Limit check");
        }

        vec![
            format!("Total rooms currently: {}", rooms),
            format!("Max sections remaining: {}", remaining),
        ]
    }
}
