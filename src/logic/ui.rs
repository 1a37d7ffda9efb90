//! UI state transition logic
//!
//! Pure functions for toast timing and screen cycling.

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Error toasts stay longer so they can be read
pub const ERROR_TOAST_DURATION_MS: u128 = 4000;

/// Whether a toast that has been visible for `elapsed_ms` should go away
///
/// # Examples
/// ```
/// use ptwtui::logic::ui::should_dismiss_toast;
///
/// assert!(!should_dismiss_toast(0, false));
/// assert!(should_dismiss_toast(1500, false));
/// assert!(!should_dismiss_toast(1500, true));
/// ```
pub fn should_dismiss_toast(elapsed_ms: u128, is_error: bool) -> bool {
    let limit = if is_error {
        ERROR_TOAST_DURATION_MS
    } else {
        TOAST_DURATION_MS
    };
    elapsed_ms >= limit
}

/// Cycle through `len` screens, wrapping at both ends
///
/// # Examples
/// ```
/// use ptwtui::logic::ui::cycle_screen;
///
/// assert_eq!(cycle_screen(0, 8, true), 1);
/// assert_eq!(cycle_screen(7, 8, true), 0);
/// assert_eq!(cycle_screen(0, 8, false), 7);
/// ```
pub fn cycle_screen(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_boundaries() {
        assert!(!should_dismiss_toast(1499, false));
        assert!(should_dismiss_toast(1500, false));
        assert!(!should_dismiss_toast(3999, true));
        assert!(should_dismiss_toast(4000, true));
    }

    #[test]
    fn test_cycle_screen_single_and_empty() {
        assert_eq!(cycle_screen(0, 1, true), 0);
        assert_eq!(cycle_screen(0, 1, false), 0);
        assert_eq!(cycle_screen(3, 0, true), 0);
    }

    #[test]
    fn test_cycle_screen_middle() {
        assert_eq!(cycle_screen(3, 8, true), 4);
        assert_eq!(cycle_screen(3, 8, false), 2);
    }
}
