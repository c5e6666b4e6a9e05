pub mod health;
pub mod meetings;
pub mod notes;
pub mod transcript;
