pub mod auth_token;
pub mod flashcard;
pub mod generation;
pub mod generation_limit;
pub mod translator;
pub mod users;

pub use auth_token::AuthTokenService;
pub use flashcard::{escape_like_pattern, FlashcardService};
pub use generation::GenerationService;
pub use generation_limit::{utc_day_bounds, DailyLimitCheck, GenerationLimitService};
pub use translator::{OpenRouterTranslator, Translator};
pub use users::UsersService;
