//! Toast stack for dashboard interactions.

use carbonview_widgets::{Toast, ToastKind};

/// Owns the live toasts; each toast counts down independently.
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast with the default duration.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toasts.push(Toast::new(message, kind));
    }

    /// The live toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Number of live toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Check if no toasts are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Advance every countdown, dropping expired toasts.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for toast in &mut self.toasts {
            toast.tick(elapsed_ms);
        }
        self.toasts.retain(|toast| !toast.is_expired());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_expire() {
        let mut manager = ToastManager::new();
        manager.show("Forecast period updated", ToastKind::Info);
        assert_eq!(manager.len(), 1);

        manager.tick(3000);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_rapid_toasts_expire_on_their_own_schedules() {
        let mut manager = ToastManager::new();
        manager.show("first", ToastKind::Info);
        manager.tick(1000);
        manager.show("second", ToastKind::Info);

        manager.tick(2000);
        // First has used 3000ms, second only 2000ms.
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.toasts()[0].message(), "second");

        manager.tick(1000);
        assert!(manager.is_empty());
    }
}
