// src/lib.rs

pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod message;
pub mod transcript;
pub mod transport;
pub mod typing;
pub mod ui;

pub use app::{App, AppState};
