//! 工具模块
pub mod classify;

pub use self::classify::NameNormalizer;
