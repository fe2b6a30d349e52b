// Qamus: a collaborative Hassaniya dictionary.
//
// This is the library root. The `qamus` binary and the web server are thin
// layers over the `dictionary` services.

pub mod config;
pub mod db;
pub mod dictionary;
pub mod extract;
pub mod output;
pub mod status;
pub mod variants;

#[cfg(feature = "web")]
pub mod web;
