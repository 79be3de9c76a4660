//! Notification center: alert lifecycle with a maintained unread counter.

pub mod alerts;
pub mod domain;
pub mod seed;
mod store;
pub mod views;

pub use alerts::high_risk_transition;
pub use domain::{
    NewNotification, Notification, NotificationId, NotificationKind, Priority, StudentRef,
};
pub use seed::{seed_notifications, SeedNotification};
pub use store::NotificationStore;
pub use views::{format_relative, NotificationFeed, NotificationView};
