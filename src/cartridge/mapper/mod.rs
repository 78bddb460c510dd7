//! NES mappers for PRG memory projection.
//!
//! Mapper0 (NROM) and the trait every board implements.

pub mod mapper;

pub mod mapper0;
