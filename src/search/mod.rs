//! Incremental search: debounce, request workers, state and toasts

pub mod controller;
pub mod debounce;
pub mod notify;
pub mod state;
pub mod worker;

pub use controller::SearchController;
pub use debounce::Debouncer;
pub use notify::{Notifications, Toast, ToastLevel};
pub use state::{SearchState, SearchView};
pub use worker::{spawn_request, Completion, RequestSlot, RequestToken};
