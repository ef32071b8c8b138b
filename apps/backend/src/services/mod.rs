pub mod sessions;
pub mod storage;
