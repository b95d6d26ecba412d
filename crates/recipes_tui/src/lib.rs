#![forbid(unsafe_code)]

//! # Recipes TUI
//!
//! Terminal client for the recipe browser. The data layer lives in
//! `recipes_core`; this crate binds it to a terminal.
//!
//! This module exposes the core types for the `recipes` binary and the
//! integration tests.
//!
//! ## Public Modules
//!
//! - [`runtime`] - Elm-architecture runtime (program, messages, commands, simulator)
//! - [`app`] - Router between the login and recipes surfaces
//! - [`pages`] - The two surfaces
//! - [`components`] - Text input, recipe cards, detail modal, layout helpers
//! - [`config`] / [`cli`] - Runtime configuration and its command-line surface
//! - [`headless`] - `list` and `whoami` without a terminal
//! - [`logging`] - Tracing subscriber setup
//! - [`test_support`] - Headless test harness and fake services
//! - [`theme`] - Colors and text styles

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod headless;
pub mod logging;
pub mod messages;
pub mod pages;
pub mod runtime;
pub mod test_support;
pub mod theme;
