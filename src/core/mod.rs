//! # Core Application Logic
//!
//! This module contains habitui's business logic.
//! It knows nothing about the terminal or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Habit / HabitStore   │
//!                    │  • App (state)          │
//!                    │  • Action → update()    │
//!                    │    → Effect             │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   Remote   │
//!           │  Adapter   │─── Effect ──▶│  (reqwest) │
//!           │ (ratatui)  │◀── Action ───│            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`habit`]: Domain types for one journal entry
//! - [`store`]: Ordered habit list plus cursor
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file, env vars, credential persistence

pub mod action;
pub mod config;
pub mod habit;
pub mod state;
pub mod store;
