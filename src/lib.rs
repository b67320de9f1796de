//! voicecloning-client: Browse and create voice cloning projects.
//!
//! This crate talks to the remote project service, renders the project
//! listing and detail popup as HTML, and drives the create-project form.

pub mod backend;
pub mod cli;
pub mod config;
pub mod form;
pub mod logging;
pub mod notify;
pub mod page;
pub mod render;
