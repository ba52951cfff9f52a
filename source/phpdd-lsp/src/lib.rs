pub mod backend;
pub mod controller;
pub mod debounce;
pub mod dedup;
pub mod diagnostics;
pub mod error;
pub mod report;
pub mod scanner;
pub mod settings;
