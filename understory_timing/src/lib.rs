// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! This crate never reads a clock. Hosts pass monotonic timestamps in
//! milliseconds (for example from `performance.now()` or
//! `std::time::Instant`) and the primitives answer what happened at that
//! instant. This keeps them usable from a `requestAnimationFrame` loop, a
//! desktop event loop, or a test that steps time by hand.
//!
//! - [`Ticker`]: samples elapsed time for a fixed-duration run and reports
//!   completion exactly once.
//! - [`Deadline`]: a one-shot timer that fires once at or after its due time
//!   and does not reset when armed again.
//!
//! ## Ticker
//!
//! ```rust
//! use understory_timing::{Tick, Ticker};
//!
//! let mut ticker = Ticker::new();
//! ticker.start(1_000, 200);
//!
//! assert_eq!(ticker.sample(1_050), Some(Tick::Running { elapsed: 50 }));
//! assert_eq!(ticker.sample(1_250), Some(Tick::Complete { elapsed: 200 }));
//!
//! // The run is over; further samples report nothing.
//! assert_eq!(ticker.sample(1_300), None);
//! ```
//!
//! ## Deadline
//!
//! ```rust
//! use understory_timing::Deadline;
//!
//! let mut debounce = Deadline::new();
//! assert!(debounce.arm(0, 195));
//! // Arming again while pending keeps the original due time.
//! assert!(!debounce.arm(50, 195));
//!
//! assert!(!debounce.poll(194));
//! assert!(debounce.poll(195));
//! assert!(!debounce.poll(400));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod deadline;
mod ticker;

pub use deadline::Deadline;
pub use ticker::{Tick, Ticker};
