//! Authentication module for Quillbox

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtManager, TokenInvalid, TokenPair, TokenType};
pub use middleware::{
    authenticate, bearer_token, require_auth, resolve_token, AuthError, AuthState, AuthUser,
};
pub use password::{hash_password, verify_password};
