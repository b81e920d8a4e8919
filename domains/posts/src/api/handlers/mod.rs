//! HTTP handlers for the Posts domain

pub mod comments;
pub mod posts;
