#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Measures how long it takes to apply an elementwise transform to a large `f64` array under
//! different scheduling strategies:
//!
//! - [`Strategy::Unscheduled`] - a plain loop on the calling thread.
//! - [`Strategy::Policy`] - the rayon parallel-transform primitive under one of the
//!   [`ExecutionPolicy`] variants (sequenced, parallel, parallel-unsequenced).
//! - [`Strategy::ForkJoin`] - a fixed number of freshly spawned threads, each owning one
//!   contiguous chunk of the array (see [`fork_join`]).
//!
//! Each strategy is timed once per (data size, [`Operation`]) combination and the fork-join
//! strategy is swept over a list of thread counts. The [`run`] function drives the whole
//! benchmark described by a [`BenchConfig`] and writes a plain text report, including the
//! thread count that came out fastest and how it relates to the hardware concurrency.
//!
//! This package is a development tool for exploring scheduling overhead, not a statistically
//! rigorous benchmark: every configuration is measured exactly once.
//!
//! # Example
//!
//! ```
//! use nonempty::nonempty;
//! use transform_bench::{BenchConfig, Operation, run};
//!
//! let config = BenchConfig::default()
//!     .with_sizes(vec![10_000])
//!     .with_operations(vec![Operation::SLOW])
//!     .with_thread_counts(nonempty![1, 2, 4]);
//!
//! let mut report = Vec::new();
//! run(&config, &mut report).unwrap();
//!
//! print!("{}", String::from_utf8(report).unwrap());
//! ```

mod config;
mod data;
mod error;
mod measure;
mod operation;
mod report;
mod run;
mod strategy;

pub mod fork_join;

pub use config::*;
pub use data::*;
pub use error::*;
pub use measure::*;
pub use operation::*;
pub use report::*;
pub use run::*;
pub use strategy::*;
