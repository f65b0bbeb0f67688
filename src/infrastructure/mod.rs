pub mod conversion;
pub mod dispatch;
pub mod observability;
pub mod persistence;
pub mod storage;
