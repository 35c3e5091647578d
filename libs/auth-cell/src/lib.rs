pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::UserInfo;
pub use router::{auth_routes, auth_routes_with_service};

pub mod api {
    pub use crate::services::auth::AuthService;
}
