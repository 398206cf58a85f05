//! # InsightBox - Interactive Dataset Mutation Engine
//!
//! InsightBox is a Rust library for interactively cleaning and reshaping
//! tabular datasets through discrete, user-triggered mutation operations:
//! missing-value resolution, duplicate resolution, text normalization,
//! manual record editing, find/replace, row removal, type coercion, derived
//! columns, column merging and removal.
//!
//! ## Quick Start
//!
//! ```no_run
//! use insightbox::engine::missing;
//! use insightbox::session::Session;
//! use polars::prelude::*;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = df!("age" => &[Some(25), None, Some(31)])?;
//!
//! let mut session = Session::new();
//! session.load(df);
//! session.selection_mut().set_all();
//!
//! let report = session.apply(|df, sel| missing::drop_missing(df, sel));
//! println!("{} ({} rows removed)", report.message, report.affected);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`session`]: per-user session store owning the live table, with
//!   copy-on-success commit semantics
//! - [`selection`]: the column selection model scoping operations
//! - [`engine`]: the mutation operations
//!   - [`engine::missing`], [`engine::duplicates`], [`engine::text`],
//!     [`engine::edit`], [`engine::replace`], [`engine::derive`],
//!     [`engine::columns`], [`engine::coerce`], [`engine::export`]
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup
//!
//! ## Commit model
//!
//! Operations never mutate the stored table. Each one validates its
//! parameters against the live table and the active selection, builds a new
//! frame, and hands it back; the [`Session`](session::Session) swaps the
//! frame in only when the whole operation succeeded. A failed commit leaves
//! the stored table byte-for-byte identical to its pre-commit value.

pub mod engine;
pub mod error;
pub mod logging;
pub mod selection;
pub mod session;

pub use error::{InsightError, Result};
pub use selection::ColumnSelection;
pub use session::Session;
