pub mod extractors;
pub mod token;

pub use extractors::AuthenticatedUser;
pub use token::generate_token;
