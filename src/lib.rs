//! rsfragment - 声明式片段导航规则匹配引擎

// 导出全局错误类型
pub use self::error::{FragmentError, FragResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    Route, VisitContext, PathSpec, BoolOrString, WatchSearchParams,
    RulePredicate, RuleOptions, FragmentVisit, RuleLoader,
};

// 导出编译模块核心接口
pub use self::compiler::{PathMatcher, RuleCompiler};

// 导出解析模块核心接口（含全局单例的简化接口）
pub use self::resolver::{
    DecomposedUrl, UrlDecomposer,
    DocumentQuery, StaticDocument,
    SelectorIssue, RuntimeSelectorIssue, SelectorValidator,
    ParsedRule, RouteResolver,
    init_fragment_resolver,
    resolve_route,
    prepend_rule,
    append_rule,
    replace_rules,
    current_rules,
};

// 导出工具模块核心接口
pub use self::utils::NameNormalizer;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod resolver;
pub mod utils;
