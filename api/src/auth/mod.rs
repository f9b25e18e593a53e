//! Authentication
//!
//! HS256 bearer tokens and the middleware that verifies them.

pub mod jwt;
pub mod middleware;

pub use jwt::{JwtError, JwtProvider};
pub use middleware::{jwt_auth_middleware, AuthenticatedUser};
