//! # staywatch-cli
//!
//! Client side of StayWatch: typed fetch helpers for the HTTP API, the
//! list and timeline view models, and the `staywatch` command set.

pub mod client;
pub mod commands;
pub mod output;
pub mod view;

pub use client::{AuthClient, AuthSession, ClientError, NotificationClient};
