//! 全局解析器单例管理
//! 并发场景下以读写锁串行化规则集变更与路由解析

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use super::document::DocumentQuery;
use super::resolver::RouteResolver;
use super::rule::ParsedRule;
use crate::config::GlobalConfig;
use crate::error::{FragResult, FragmentError};
use crate::rule::model::{FragmentVisit, Route, RuleOptions, VisitContext};

/// 全局解析器实例
static GLOBAL_RESOLVER: Lazy<RwLock<Option<RouteResolver>>> = Lazy::new(|| RwLock::new(None));

/// 初始化全局解析器（已初始化时静默返回）
pub fn init_fragment_resolver(
    config: GlobalConfig,
    document: Arc<dyn DocumentQuery + Send + Sync>,
    rules: Vec<RuleOptions>,
) -> FragResult<()> {
    let mut guard = GLOBAL_RESOLVER
        .write()
        .map_err(|_| FragmentError::ResolverNotInitialized)?;
    if guard.is_some() {
        return Ok(());
    }

    *guard = Some(RouteResolver::with_rules(config, document, rules)?);
    Ok(())
}

/// 解析路由（不触发实际导航的直接查询）
pub fn resolve_route(route: &Route, visit: &VisitContext) -> FragResult<Option<FragmentVisit>> {
    let guard = GLOBAL_RESOLVER
        .read()
        .map_err(|_| FragmentError::ResolverNotInitialized)?;
    let resolver = guard.as_ref().ok_or(FragmentError::ResolverNotInitialized)?;
    Ok(resolver.resolve(route, visit))
}

/// 头部插入一条规则
pub fn prepend_rule(options: RuleOptions) -> FragResult<()> {
    with_resolver_mut(|resolver| resolver.prepend_rule(options))
}

/// 尾部追加一条规则
pub fn append_rule(options: RuleOptions) -> FragResult<()> {
    with_resolver_mut(|resolver| resolver.append_rule(options))
}

/// 整体替换规则集
pub fn replace_rules(rules: Vec<RuleOptions>) -> FragResult<()> {
    with_resolver_mut(|resolver| resolver.replace_rules(rules))
}

/// 读取当前规则集的独立副本
pub fn current_rules() -> FragResult<Vec<ParsedRule>> {
    let guard = GLOBAL_RESOLVER
        .read()
        .map_err(|_| FragmentError::ResolverNotInitialized)?;
    let resolver = guard.as_ref().ok_or(FragmentError::ResolverNotInitialized)?;
    Ok(resolver.rules())
}

fn with_resolver_mut<F>(f: F) -> FragResult<()>
where
    F: FnOnce(&mut RouteResolver) -> FragResult<()>,
{
    let mut guard = GLOBAL_RESOLVER
        .write()
        .map_err(|_| FragmentError::ResolverNotInitialized)?;
    let resolver = guard.as_mut().ok_or(FragmentError::ResolverNotInitialized)?;
    f(resolver)
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::resolver::document::StaticDocument;

    #[test]
    fn test_global_lifecycle() {
        // 测试场景：初始化前报错，初始化后可解析并管理规则
        // 单测共享进程级单例，串联在一个用例内验证
        assert!(matches!(
            resolve_route(&Route::new("/a", "/b"), &VisitContext::default()),
            Err(FragmentError::ResolverNotInitialized)
        ));

        let document = Arc::new(StaticDocument::with_scoped(&["#main", "#aside"]));
        init_fragment_resolver(
            ConfigManager::get_default(),
            document,
            vec![RuleOptions::new("/a", "/b", &["#main"])],
        )
        .unwrap();

        // 重复初始化静默返回
        let document2 = Arc::new(StaticDocument::new());
        init_fragment_resolver(ConfigManager::get_default(), document2, vec![]).unwrap();
        assert_eq!(current_rules().unwrap().len(), 1);

        let result = resolve_route(&Route::new("/a", "/b"), &VisitContext::default()).unwrap();
        assert_eq!(result.unwrap().containers, vec!["#main"]);

        prepend_rule(RuleOptions::new("/a", "/b", &["#aside"])).unwrap();
        let result = resolve_route(&Route::new("/a", "/b"), &VisitContext::default()).unwrap();
        assert_eq!(result.unwrap().containers, vec!["#aside"]);

        replace_rules(vec![]).unwrap();
        assert!(resolve_route(&Route::new("/a", "/b"), &VisitContext::default())
            .unwrap()
            .is_none());
    }
}
