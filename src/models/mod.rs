pub mod event;
pub mod organizer;
pub mod request;
pub mod session;
pub mod stats;
