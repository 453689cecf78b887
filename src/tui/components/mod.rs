//! # TUI Components
//!
//! All widgets for the single habit screen.
//!
//! Components receive their data as props (struct fields) rather than
//! reaching into `App`, so each one can be rendered on a `TestBackend`
//! in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (day, done count, sync indicator)
//! ├── habit_list.rs   (one row per habit, cursor marker)
//! ├── help_bar.rs     (status message + valid key bindings)
//! └── loading.rs      (spinner before the journal arrives)
//! ```

pub mod habit_list;
pub mod help_bar;
pub mod loading;
pub mod title_bar;

pub use habit_list::HabitList;
pub use help_bar::HelpBar;
pub use loading::Loading;
pub use title_bar::TitleBar;
