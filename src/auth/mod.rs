//! Identity gate: Argon2id credential hashing and the bearer-token
//! extractor that resolves a session to its organizer.

pub mod identity;
pub mod password;

pub use identity::Identity;
