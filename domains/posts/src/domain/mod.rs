//! Posts domain layer: entities

pub mod entities;
