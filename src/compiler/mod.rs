//! 编译模块：将声明式规则编译为可执行的匹配单元
pub mod pattern;
pub mod compiler;

pub use self::pattern::{CompiledPathPattern, PathMatcher};
pub use self::compiler::RuleCompiler;
