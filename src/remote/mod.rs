pub mod client;
pub mod types;

pub use client::{HabitClient, HabitifyClient, RemoteError, target_date};
