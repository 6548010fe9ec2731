pub mod flashcards;
pub mod generate;
pub mod health;
pub mod profile;
