//! Tactile weather widgets for the terminal
//!
//! Seven size variants of one weather widget, themed through a closed set of
//! style variables, plus the Open-Meteo client that feeds them. The binary in
//! `main.rs` is a showcase shell around the library.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod i18n;
pub mod icons;
pub mod reducer;
pub mod state;
pub mod theme;
pub mod variant;
