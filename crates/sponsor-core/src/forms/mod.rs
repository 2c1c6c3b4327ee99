//! # Form State
//!
//! Screen-owned form objects for adding sponsors and tasks.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Form Lifecycle                                  │
//! │                                                                         │
//! │   new() / from_record()                                                 │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   ┌─────────────┐   field edits, add/remove rows                       │
//! │   │    Draft    │ ◄─────────────────────────────┐                      │
//! │   │  (editable) │ ──────────────────────────────┘                      │
//! │   └──────┬──────┘                                                       │
//! │          │ submit()                                                     │
//! │          ▼                                                              │
//! │   ┌─────────────┐     ┌──────────────────────┐                         │
//! │   │  Validate   │ ──► │ Err(CoreError)       │  draft kept as is       │
//! │   └──────┬──────┘     └──────────────────────┘                         │
//! │          ▼                                                              │
//! │   ┌─────────────┐                                                       │
//! │   │ Submission  │  immutable, serializable, new UUID                   │
//! │   └─────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod sponsor;
mod task;

pub use sponsor::{SponsorDraft, SponsorForm, SponsorSubmission};
pub use task::{TaskDraft, TaskForm, TaskSubmission};
