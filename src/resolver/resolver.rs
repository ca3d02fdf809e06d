//! 路由解析器核心：维护有序规则集，按首个命中产出片段访问描述符

use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::document::DocumentQuery;
use super::rule::ParsedRule;
use crate::compiler::RuleCompiler;
use crate::config::GlobalConfig;
use crate::error::FragResult;
use crate::rule::model::{FragmentVisit, Route, RuleOptions, VisitContext};

/// 路由解析器
/// 文档查询能力在构造时注入一次，解析过程对规则与路由均为只读
#[derive(Clone)]
pub struct RouteResolver {
    rules: Vec<ParsedRule>,
    config: GlobalConfig,
    base_url: Url,
    document: Arc<dyn DocumentQuery + Send + Sync>,
}

impl RouteResolver {
    /// 创建空规则集的解析器
    pub fn new(
        config: GlobalConfig,
        document: Arc<dyn DocumentQuery + Send + Sync>,
    ) -> FragResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            rules: Vec::new(),
            config,
            base_url,
            document,
        })
    }

    /// 创建解析器并编译初始规则列表
    pub fn with_rules(
        config: GlobalConfig,
        document: Arc<dyn DocumentQuery + Send + Sync>,
        rules: Vec<RuleOptions>,
    ) -> FragResult<Self> {
        let mut resolver = Self::new(config, document)?;
        resolver.rules = RuleCompiler::compile_all(&rules)?;
        Ok(resolver)
    }

    /// 解析路由：按声明顺序返回首个命中规则的描述符
    /// 无命中返回None，调用方回退为整页替换，绝不视为错误
    pub fn resolve(&self, route: &Route, visit: &VisitContext) -> Option<FragmentVisit> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.matches(route, visit, self.document.as_ref(), &self.base_url) {
                if self.config.debug {
                    debug!(
                        "路由命中规则#{}：{}，容器：{:?}",
                        index, route, rule.containers
                    );
                }
                return Some(rule.to_visit());
            }
        }

        if self.config.debug {
            debug!("路由无命中规则，回退整页替换：{}", route);
        }
        None
    }

    /// 头部插入一条规则
    pub fn prepend_rule(&mut self, options: RuleOptions) -> FragResult<()> {
        let rule = RuleCompiler::compile(&options)?;
        self.rules.insert(0, rule);
        Ok(())
    }

    /// 尾部追加一条规则
    pub fn append_rule(&mut self, options: RuleOptions) -> FragResult<()> {
        let rule = RuleCompiler::compile(&options)?;
        self.rules.push(rule);
        Ok(())
    }

    /// 整体替换规则集
    pub fn replace_rules(&mut self, rules: Vec<RuleOptions>) -> FragResult<()> {
        self.rules = RuleCompiler::compile_all(&rules)?;
        Ok(())
    }

    /// 读取当前规则集的独立副本
    /// 调用方修改返回值不影响内部匹配状态
    pub fn rules(&self) -> Vec<ParsedRule> {
        self.rules.clone()
    }

    /// 当前规则条数
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::resolver::document::StaticDocument;
    use crate::rule::model::BoolOrString;

    fn resolver_with(rules: Vec<RuleOptions>) -> RouteResolver {
        // 按RUST_LOG输出匹配日志，便于排查用例
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let document = Arc::new(StaticDocument::with_scoped(&["#main", "#aside", "#form"]));
        let config = ConfigManager::custom().debug(true).build();
        RouteResolver::with_rules(config, document, rules).unwrap()
    }

    #[test]
    fn test_resolve_first_match_wins() {
        // 测试场景：两条规则均命中时，描述符仅反映声明顺序靠前的一条
        let resolver = resolver_with(vec![
            RuleOptions::new("/a", "/b", &["#main"]).with_name("First"),
            RuleOptions::new("/a", "/b", &["#aside"]).with_name("Second"),
        ]);

        let result = resolver
            .resolve(&Route::new("/a", "/b"), &VisitContext::default())
            .unwrap();
        assert_eq!(result.name.as_deref(), Some("first"));
        assert_eq!(result.containers, vec!["#main"]);
    }

    #[test]
    fn test_resolve_no_match_returns_none() {
        // 测试场景：无命中返回None（回退整页替换）
        let resolver = resolver_with(vec![RuleOptions::new("/a", "/b", &["#main"])]);

        let result = resolver.resolve(&Route::new("/x", "/y"), &VisitContext::default());
        assert!(result.is_none());
    }

    #[test]
    fn test_resolve_skips_non_matching_rule() {
        // 测试场景：首条不命中时继续尝试后续规则
        let resolver = resolver_with(vec![
            RuleOptions::new("/other", "/other", &["#main"]),
            RuleOptions::new("/a", "/b", &["#aside"]),
        ]);

        let result = resolver
            .resolve(&Route::new("/a", "/b"), &VisitContext::default())
            .unwrap();
        assert_eq!(result.containers, vec!["#aside"]);
    }

    #[test]
    fn test_prepend_takes_priority() {
        // 测试场景：头部插入的规则优先于原有规则
        let mut resolver = resolver_with(vec![
            RuleOptions::new("/a", "/b", &["#main"]).with_name("Old"),
        ]);
        resolver
            .prepend_rule(RuleOptions::new("/a", "/b", &["#aside"]).with_name("New"))
            .unwrap();

        let result = resolver
            .resolve(&Route::new("/a", "/b"), &VisitContext::default())
            .unwrap();
        assert_eq!(result.name.as_deref(), Some("new"));
    }

    #[test]
    fn test_append_and_replace() {
        // 测试场景：尾部追加与整体替换
        let mut resolver = resolver_with(vec![]);
        assert_eq!(resolver.rule_count(), 0);

        resolver
            .append_rule(RuleOptions::new("/a", "/b", &["#main"]))
            .unwrap();
        assert_eq!(resolver.rule_count(), 1);

        resolver
            .replace_rules(vec![
                RuleOptions::new("/x", "/y", &["#form"]),
                RuleOptions::new("/y", "/x", &["#form"]),
            ])
            .unwrap();
        assert_eq!(resolver.rule_count(), 2);
        assert!(resolver
            .resolve(&Route::new("/a", "/b"), &VisitContext::default())
            .is_none());
    }

    #[test]
    fn test_rules_snapshot_is_independent_copy() {
        // 测试场景：修改读取到的规则副本不影响内部匹配状态
        let resolver = resolver_with(vec![RuleOptions::new("/a", "/b", &["#main"])]);

        let mut snapshot = resolver.rules();
        snapshot.clear();

        assert_eq!(resolver.rule_count(), 1);
        assert!(resolver
            .resolve(&Route::new("/a", "/b"), &VisitContext::default())
            .is_some());
    }

    #[test]
    fn test_replace_rules_fails_fast_on_malformed_pattern() {
        // 测试场景：替换集中含语法错误模式时整体失败
        // 编译先于赋值，失败时原规则集未被改写
        let mut resolver = resolver_with(vec![RuleOptions::new("/a", "/b", &["#main"])]);
        let result = resolver.replace_rules(vec![RuleOptions::new("/(bad", "/b", &["#main"])]);

        assert!(result.is_err());
        assert_eq!(resolver.rule_count(), 1);
    }

    #[test]
    fn test_resolve_descriptor_defaults() {
        // 测试场景：未设置指令时描述符携带默认值
        let resolver = resolver_with(vec![RuleOptions::new("/a", "/b", &["#main"])]);
        let result = resolver
            .resolve(&Route::new("/a", "/b"), &VisitContext::default())
            .unwrap();

        assert!(result.name.is_none());
        assert_eq!(result.scroll, BoolOrString::Bool(false));
        assert!(result.focus.is_none());
    }
}
