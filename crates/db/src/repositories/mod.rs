//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Settlement methods invoked inside the
//! close transaction take `&mut PgConnection` instead so they share one
//! transaction.

pub mod crown_repo;
pub mod device_token_repo;
pub mod event_repo;
pub mod headline_repo;
pub mod penalty_repo;
pub mod poll_repo;
pub mod rivalry_repo;
pub mod squad_repo;
pub mod submission_repo;
pub mod user_repo;

pub use crown_repo::CrownRepo;
pub use device_token_repo::DeviceTokenRepo;
pub use event_repo::DailyEventRepo;
pub use headline_repo::HeadlineRepo;
pub use penalty_repo::PenaltyRepo;
pub use poll_repo::PollRepo;
pub use rivalry_repo::RivalryRepo;
pub use squad_repo::SquadRepo;
pub use submission_repo::SubmissionRepo;
pub use user_repo::UserRepo;
