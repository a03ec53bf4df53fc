//! `jobboard-applications` — job application domain entity.

pub mod application;

pub use application::Application;
