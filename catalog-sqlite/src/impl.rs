//! Port implementations for the SQLite database.

mod catalog;
mod media;
