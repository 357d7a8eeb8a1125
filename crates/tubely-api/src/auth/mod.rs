pub mod jwt;
pub mod models;

pub use jwt::{bearer_token, JwtService};
pub use models::{AuthUser, JwtClaims};
