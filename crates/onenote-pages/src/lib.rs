//! Create blank, dated OneNote pages through Microsoft Graph.

pub mod auth;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod page;

pub use client::OneNoteClient;
pub use error::{PageError, PageResult};
pub use shared_types::{NotebookRef, PageCreationResult, PageOutcome, SectionRef};
