//! REST API handlers

pub mod account;
pub mod announcements;
pub mod auth;
pub mod exam;
pub mod health;
pub mod homework;
pub mod schedule;
pub mod session_event;
pub mod users;
