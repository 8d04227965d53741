pub mod dispatch;
pub mod wizard;
