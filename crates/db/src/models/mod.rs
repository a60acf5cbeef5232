//! Row structs (`FromRow`) and create/update DTOs, one module per entity.

pub mod crown;
pub mod device;
pub mod event;
pub mod headline;
pub mod poll;
pub mod rivalry;
pub mod squad;
pub mod user;
