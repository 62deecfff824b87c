//! Route guard: decides whether a navigation target may be shown.
//!
//! Mirrors the page-level guard of the dashboard: authenticated sessions are
//! bounced away from the login screen, unauthenticated ones are bounced to
//! it, and nothing protected is ever shown while the session is still being
//! resolved.

use crate::session::SessionStore;

/// Navigation targets, one per page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Categories,
    Products,
    Banners,
    Campaigns,
    Announcements,
    Users,
}

/// Where the session stands while a navigation is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session not yet resolved; render a progress indicator only.
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Show the target.
    Allow,
    /// No token and the target is protected.
    RedirectToLogin,
    /// Already authenticated and the target is the login screen.
    RedirectToDashboard,
    /// Still checking; show nothing protected yet.
    Wait,
}

/// Evaluate a navigation against an explicit guard state.
pub fn resolve(target: Route, state: GuardState) -> Access {
    match state {
        GuardState::Checking => Access::Wait,
        GuardState::Authenticated => {
            if target == Route::Login {
                Access::RedirectToDashboard
            } else {
                Access::Allow
            }
        }
        GuardState::Unauthenticated => {
            if target == Route::Login {
                Access::Allow
            } else {
                Access::RedirectToLogin
            }
        }
    }
}

/// Evaluate a navigation against the live session store.
pub fn check(target: Route, session: &SessionStore) -> Access {
    let state = if session.access_token().is_some() {
        GuardState::Authenticated
    } else {
        GuardState::Unauthenticated
    };
    resolve(target, state)
}
