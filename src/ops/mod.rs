pub mod dispatch;
pub mod router;
pub mod store;
