//! Integration tests driving the full router against in-memory backends.

mod auth_test;
mod client_test;
mod helpers;
mod notification_test;
