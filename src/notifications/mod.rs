//! Notifications: the filterable notification feed and the unread count.
//!
//! The unread badge needs to stay fresh while the app is foregrounded, so
//! alongside the on-demand [`NotificationsStore::load_count`] there is a
//! [`CountPoller`], a cancellable repeating timer the owning view starts on
//! mount and stops exactly once on teardown. Dropping the poller (or the
//! store itself) also ends the polling, so a missed `stop` cannot leak a
//! timer.

mod model;
mod poller;
mod store;

pub use model::Notification;
pub use poller::CountPoller;
pub use store::{NotificationFilter, NotificationsStore};
