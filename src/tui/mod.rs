//! Terminal User Interface module
//!
//! A read-only dashboard rendered with ratatui: budget gauge, items expiring
//! soon, recent purchases and the Nutri-Score panel. `r` reloads the data,
//! `q` or `Esc` quits.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;

pub use app::App;
pub use terminal::run_tui;
