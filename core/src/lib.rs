pub mod dispatch;
pub mod executor;
pub mod inventory;
pub mod render;
pub mod selector;
pub mod session;
