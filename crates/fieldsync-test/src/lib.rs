//! Testing harness for fieldsync.
//!
//! - [`Harness`]: drives a controller with sequential ids and provides
//!   sync and orphan assertions
//! - [`ScriptedLogic`]: a logic layer that records proposals and can be
//!   told to refuse the next ones
//!
//! ```
//! use fieldsync_test::Harness;
//!
//! let mut harness = Harness::network();
//! let laptop = harness.place("laptop", 50.0, 100.0);
//! let router = harness.place("router", 300.0, 100.0);
//! harness.connect(laptop, router);
//! harness.assert_counts(2, 1).assert_in_sync().assert_no_orphans();
//! ```

#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

mod harness;
mod scripted;

pub use harness::Harness;
pub use scripted::{LogicCall, ScriptHandle, ScriptedLogic};
