//! 解析模块：URL分解、选择器校验、规则判定与规则集管理
pub mod url;
pub mod document;
pub mod selector;
pub mod rule;
pub mod resolver;
pub mod global;

// 导出核心接口
pub use self::url::{DecomposedUrl, UrlDecomposer};
pub use self::document::{DocumentQuery, StaticDocument};
pub use self::selector::{RuntimeSelectorIssue, SelectorIssue, SelectorValidator};
pub use self::rule::ParsedRule;
pub use self::resolver::RouteResolver;
pub use self::global::{
    init_fragment_resolver, resolve_route, prepend_rule, append_rule, replace_rules,
    current_rules,
};
