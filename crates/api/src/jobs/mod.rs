//! Batch job engines behind the cron trigger endpoints.
//!
//! Each engine runs to completion in one invocation and keeps no state
//! between runs; re-invocation is always safe because every mutation is
//! guarded (unique keys, status predicates, insert-once guard rows). Every
//! run gets a `run_id` so one cron invocation's log lines can be correlated.
//! Per-item failures are logged, tallied in the run report, and never abort
//! the rest of the batch.

pub mod scheduler;
pub mod transition;
pub mod weekly;
