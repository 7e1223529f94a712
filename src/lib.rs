//! # AquaLog - aquarium maintenance journal
//!
//! A command-line record keeper for aquarium hobbyists.
//!
//! ## Features
//!
//! - **Aquariums**: size, unit, setup date, lighting schedule and CO2 notes
//! - **Logs**: water changes and fertilizer dosing, newest first
//! - **Plants and photos**: images are scaled down and embedded as JPEG data URIs
//! - **Tasks**: recurring or one-off maintenance with overdue / due today / upcoming status
//! - **Storage**: every collection is written through to SQLite after each change
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aqualog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
