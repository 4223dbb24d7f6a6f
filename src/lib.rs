//! # OpsBoard Analytics Engine
//!
//! Period resolution and comparison analytics for the OpsBoard internal
//! operations dashboard.
//!
//! Every widget that reports over time (workshop attendance, project
//! manpower, visitor analytics, task boards) goes through the same
//! pipeline: an abstract reporting-period descriptor is resolved into
//! concrete date boundaries, the record set is filtered against those
//! boundaries, and the filtered records are reduced to summary metrics,
//! optionally compared against a second period.
//!
//! ## Features
//!
//! - **Period Resolution**: calendar years, April-March financial years,
//!   quarters, and custom date ranges resolved to inclusive date bounds
//! - **Labelling**: human-readable period labels for badges and legends
//! - **Filtering**: interval-overlap selection of time-stamped records
//! - **Aggregation**: totals, averages, peaks, and chronological bucket
//!   series for trend charts
//! - **Comparison**: period-over-period deltas with guarded zero-baseline
//!   arithmetic, plus the comparison-mode selection state machine
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: consolidated public surface for presentation layers
//! - [`models`]: period descriptors, resolved ranges, activity records,
//!   and the caller-owned period selection
//! - [`services`]: filtering, aggregation, and comparison pipeline
//!
//! ## Statelessness
//!
//! Everything here is pure, synchronous computation over inputs the caller
//! supplies. There is no provider, no singleton, no cache: callers own the
//! state lifecycle and may re-invoke with updated inputs on every render,
//! discarding stale results. Identical inputs always produce identical
//! outputs.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
