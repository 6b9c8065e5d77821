// Adapters layer: concrete file access and report rendering.

pub mod output;
pub mod storage;
