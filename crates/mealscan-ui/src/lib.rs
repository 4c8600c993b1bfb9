#![warn(missing_docs)]
//! # mealscan-ui
//!
//! ## Purpose
//! Defines the UI-facing runtime state model for `mealscan`.
//!
//! ## Responsibilities
//! - Represent route, theme mode, and drop-surface availability.
//! - Carry the inline error and the transient notification with its
//!   auto-dismiss deadline.
//! - Expose guard checks for whether a new drop may be accepted.
//!
//! ## Data flow
//! App orchestration events mutate [`UiState`], which drives the rendered
//! scan view.
//!
//! ## Ownership and lifetimes
//! `UiState` owns all string/status values to simplify event reducers; it is
//! created on view mount and dropped on unmount.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Invalid
//! combinations are prevented by guard methods.
//!
//! ## Security and privacy notes
//! UI state intentionally excludes image bytes; it references previews only
//! through opaque display URIs owned elsewhere.

/// Milliseconds before a transient notification dismisses itself.
pub const NOTIFICATION_AUTO_DISMISS_MS: u64 = 6_000;

/// Named views the scan output renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Scan view with the drop surface.
    #[default]
    Scan,
    /// Dashboard view with hero content and history.
    Dashboard,
    /// About view.
    About,
}

impl Route {
    /// Returns the canonical path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Scan => "/scan",
            Route::Dashboard => "/dashboard",
            Route::About => "/about",
        }
    }
}

/// Resolves a requested path to a route.
///
/// Unknown paths (including `/`) fall back to the scan view.
pub fn route_for_path(path: &str) -> Route {
    match path.trim_end_matches('/') {
        "/dashboard" => Route::Dashboard,
        "/about" => Route::About,
        _ => Route::Scan,
    }
}

/// Light/dark theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light palette.
    #[default]
    Light,
    /// Dark palette.
    Dark,
}

impl ThemeMode {
    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSeverity {
    /// Informational notice.
    Info,
    /// Error notice.
    Error,
}

/// One transient notification with its auto-dismiss deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Displayed message text.
    pub message: String,
    /// Display severity.
    pub severity: NotificationSeverity,
    /// Epoch milliseconds when the notification was raised.
    pub raised_at_ms: u64,
}

impl Notification {
    /// Returns `true` once the auto-dismiss window has elapsed.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.raised_at_ms.saturating_add(NOTIFICATION_AUTO_DISMISS_MS)
    }
}

/// Aggregate UI runtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Active route.
    pub route: Route,
    /// Active theme mode.
    pub theme: ThemeMode,
    /// Whether an upload is currently in flight.
    pub uploading: bool,
    /// Inline error shown under the drop surface.
    pub inline_error: Option<String>,
    /// Transient notification, if one is showing.
    pub notification: Option<Notification>,
}

impl UiState {
    /// Creates default UI state on the scan view.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            route: Route::Scan,
            theme: ThemeMode::Light,
            uploading: false,
            inline_error: None,
            notification: None,
        }
    }

    /// Switches between light and dark mode.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Navigates to the route resolved from `path`.
    pub fn navigate(&mut self, path: &str) {
        self.route = route_for_path(path);
    }

    /// Returns `true` when the drop surface accepts a new file.
    pub fn drop_enabled(&self) -> bool {
        !self.uploading
    }

    /// Marks upload in-flight state, disabling the drop surface.
    pub fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    /// Shows a failure through both the inline error and a transient
    /// notification.
    pub fn show_error(&mut self, message: impl Into<String>, now_ms: u64) {
        let message = message.into();
        self.inline_error = Some(message.clone());
        self.notification = Some(Notification {
            message,
            severity: NotificationSeverity::Error,
            raised_at_ms: now_ms,
        });
    }

    /// Clears the inline error ahead of a new submission.
    pub fn clear_error(&mut self) {
        self.inline_error = None;
    }

    /// Drops the notification once its dismiss window has elapsed.
    pub fn dismiss_expired(&mut self, now_ms: u64) {
        if let Some(notification) = &self.notification
            && notification.is_expired(now_ms)
        {
            self.notification = None;
        }
    }

    /// Dismisses the notification immediately (close button path).
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}
