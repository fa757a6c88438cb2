//! Core library for Zero-FAF-Builder.
//!
//! Holds everything the onboarding site does beyond static markup: the site
//! configuration object, the GitHub URL intake validator and its simulated
//! submission lifecycle, the clipboard copy helper, and the builders for the
//! setup command and the deploy deep-link. Nothing in here reads the process
//! environment implicitly or performs network I/O.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod intake;
pub mod links;
pub mod validate;
