pub mod api;
pub mod events;
pub mod models;

pub use events::{Acknowledgement, PanelEvent};
pub use models::{
    AirdropDetails, AirdropStatus, Category, Notification, NotificationPayload, ParseKindError,
    Priority,
};
