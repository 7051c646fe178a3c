// ABOUTME: Maps CLI screens onto dashboard route paths for the auth guard
// ABOUTME: Commands consult the guard before touching any store

use daybook_auth::{Access, AuthContext, RouteGuard, DASHBOARD_PATH, LOGIN_PATH, SIGNUP_PATH};

use crate::error::{CliError, CliResult};

pub const ACCOUNT_PATH: &str = "/dashboard/account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Dashboard,
    Account,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => LOGIN_PATH,
            Screen::Signup => SIGNUP_PATH,
            Screen::Dashboard => DASHBOARD_PATH,
            Screen::Account => ACCOUNT_PATH,
        }
    }

    /// Ok when the guard lets `ctx` open this screen
    pub fn enter(&self, ctx: &AuthContext) -> CliResult<()> {
        match RouteGuard::check(self.path(), ctx) {
            Access::Allow => Ok(()),
            Access::Redirect { to, .. } if to == DASHBOARD_PATH => Err(CliError::AlreadySignedIn),
            redirect => Err(CliError::LoginRequired {
                location: redirect.location().unwrap_or_else(|| LOGIN_PATH.to_string()),
            }),
        }
    }
}
