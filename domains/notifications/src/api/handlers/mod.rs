//! API handlers for the Notifications domain

pub mod notifications;
