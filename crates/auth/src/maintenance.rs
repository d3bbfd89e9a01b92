//! Runtime maintenance switch.
//!
//! A single process-wide boolean that, when set, blocks all non-admin
//! traffic. The core reads it through an injected accessor so the decision
//! functions stay pure and unit-testable; it is read fresh on every
//! authorization decision, never cached, so a flip takes effect for requests
//! that have not yet been authorized.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::grant::PermissionSet;

/// Read accessor for the maintenance flag.
///
/// The write side is an external administrative operation; a plain store of
/// the new value is all it takes, readers see either the old or the new
/// value, never a partial one.
pub trait MaintenanceSwitch: Send + Sync {
    fn is_enabled(&self) -> bool;
}

/// Process-local switch backed by an [`AtomicBool`].
#[derive(Debug, Default)]
pub struct AtomicMaintenanceSwitch {
    enabled: AtomicBool,
}

impl AtomicMaintenanceSwitch {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Administrative toggle (the external write side).
    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl MaintenanceSwitch for AtomicMaintenanceSwitch {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

/// Maintenance gate: with the flag down everyone passes; with it up only
/// global admins do, regardless of any scoped grant.
pub fn is_request_allowed(permissions: &PermissionSet, maintenance_enabled: bool) -> bool {
    !maintenance_enabled || permissions.is_global_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaguehub_core::EntityKind;

    #[test]
    fn flag_down_allows_everyone() {
        assert!(is_request_allowed(&PermissionSet::none(), false));
        assert!(is_request_allowed(
            &PermissionSet::scoped_to([EntityKind::Team]),
            false
        ));
        assert!(is_request_allowed(&PermissionSet::global_admin(), false));
    }

    #[test]
    fn flag_up_only_admits_global_admins() {
        assert!(!is_request_allowed(&PermissionSet::none(), true));
        // A scoped grant is not enough during maintenance.
        assert!(!is_request_allowed(
            &PermissionSet::scoped_to([EntityKind::Team]),
            true
        ));
        assert!(is_request_allowed(&PermissionSet::global_admin(), true));
    }

    #[test]
    fn switch_reads_reflect_the_latest_write() {
        let switch = AtomicMaintenanceSwitch::new(false);
        assert!(!switch.is_enabled());
        switch.set(true);
        assert!(switch.is_enabled());
        switch.set(false);
        assert!(!switch.is_enabled());
    }
}
