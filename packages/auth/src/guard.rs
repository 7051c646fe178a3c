// ABOUTME: Route-level gating based on the current auth context
// ABOUTME: Anonymous users go to login; signed-in users skip login and signup

use crate::context::AuthContext;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Paths reachable without a session
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, SIGNUP_PATH];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect {
        to: &'static str,
        /// Where to send the user after they log in
        redirect_to: Option<String>,
    },
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }

    /// Redirect target as a URL path with query string
    pub fn location(&self) -> Option<String> {
        match self {
            Access::Allow => None,
            Access::Redirect {
                to,
                redirect_to: Some(from),
            } => Some(format!("{}?redirectTo={}", to, urlencoding::encode(from))),
            Access::Redirect {
                to,
                redirect_to: None,
            } => Some(to.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn is_public(path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        PUBLIC_PATHS.contains(&path.trim_end_matches('/'))
    }

    pub fn check(path: &str, ctx: &AuthContext) -> Access {
        let public = Self::is_public(path);

        match (ctx.is_authenticated(), public) {
            (false, false) => Access::Redirect {
                to: LOGIN_PATH,
                redirect_to: Some(path.to_string()),
            },
            (true, true) => Access::Redirect {
                to: DASHBOARD_PATH,
                redirect_to: None,
            },
            _ => Access::Allow,
        }
    }
}
