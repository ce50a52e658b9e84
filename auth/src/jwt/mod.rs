pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use errors::AccessTokenError;
pub use handler::token_preview;
pub use handler::AccessTokenCodec;
pub use handler::ISSUER;
