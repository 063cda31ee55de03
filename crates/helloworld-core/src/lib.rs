//! Core domain types for the HelloWorld language-learning platform.
//!
//! This crate defines the data model (users, classes, quizzes, chat,
//! notebook, content, badges), the progress/gamification rules, and the
//! [`store::PlatformStore`] trait that storage backends implement. It knows
//! nothing about HTTP or SQL; `helloworld-api` and `helloworld-store-sqlite`
//! sit on top of it.

pub mod analytics;
pub mod badge;
pub mod chat;
pub mod classroom;
pub mod content;
pub mod error;
pub mod notebook;
pub mod progress;
pub mod quiz;
pub mod store;
pub mod user;

pub use error::{Error, Result};
