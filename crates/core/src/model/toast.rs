use std::fmt;
use std::time::Duration;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    /// CSS modifier used by the toast host.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a toast is in its show/hide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
    Expired,
}

/// Timing of the toast animation.
pub const TOAST_ENTER_DELAY: Duration = Duration::from_millis(10);
pub const TOAST_VISIBLE_FOR: Duration = Duration::from_millis(3000);
pub const TOAST_FADE_OUT: Duration = Duration::from_millis(300);

impl ToastPhase {
    #[must_use]
    pub fn at_age(age: Duration) -> Self {
        if age < TOAST_ENTER_DELAY {
            ToastPhase::Entering
        } else if age < TOAST_VISIBLE_FOR {
            ToastPhase::Shown
        } else if age < TOAST_VISIBLE_FOR + TOAST_FADE_OUT {
            ToastPhase::Leaving
        } else {
            ToastPhase::Expired
        }
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, ToastPhase::Shown)
    }
}
