//! Vacancy search app shell: session host, effect runner, debouncing and
//! persistence glue around the pure core.
pub mod platform;
