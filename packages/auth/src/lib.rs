// ABOUTME: Daybook authentication library: explicit sessions and route gating
// ABOUTME: Supports Supabase GoTrue and an offline local provider

pub mod context;
pub mod error;
pub mod guard;
pub mod local;
pub mod manager;
pub mod provider;
pub mod storage;
pub mod supabase;

// Re-export main types
pub use context::AuthContext;
pub use error::{AuthError, AuthResult};
pub use guard::{Access, RouteGuard, DASHBOARD_PATH, LOGIN_PATH, SIGNUP_PATH};
pub use local::LocalAuth;
pub use manager::AuthManager;
pub use provider::AuthProvider;
pub use storage::SessionStore;
pub use supabase::SupabaseAuth;
