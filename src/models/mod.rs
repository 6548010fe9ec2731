pub mod auth_token;
pub mod flashcard;
pub mod generation;
pub mod user;

pub use auth_token::{AuthToken, CreateAuthToken};
pub use flashcard::{
    CreateFlashcard, Flashcard, FlashcardResponse, FlashcardSource, UpdateFlashcard,
};
pub use generation::{
    GenerateRequest, GenerateResponse, GenerationSession, GenerationStatus,
};
pub use user::{CreateUser, User};
