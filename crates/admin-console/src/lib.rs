// crates/admin-console/src/lib.rs
// Admin console client: session state and authenticated access to the admin API

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod guard;
pub mod http;
pub mod services;
pub mod session;
pub mod storage;
pub mod validation;

pub use console::AdminConsole;
pub use error::{Action, ConsoleError, Result};
pub use session::Session;
