// Route handlers, one module per API area.

pub mod admin;
pub mod auth;
pub mod extract;
pub mod moderation;
pub mod profile;
pub mod stats;
pub mod variants;
pub mod words;
