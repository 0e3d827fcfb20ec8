//! Non-blocking replacements for alert, confirm and prompt dialogs.
//!
//! Two front ends share one lifecycle: [`controller::DialogController`] drives
//! surfaces imperatively through a [`adapter::DialogAdapter`], while
//! [`reactive::DialogStore`] publishes snapshots that a presentation renders
//! and answers with [`reactive::DialogAction`]s.

pub mod adapter;
pub mod cli;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod reactive;
pub mod tui;
