//! 匹配单元核心：单条已编译规则的路由判定逻辑

use tracing::{debug, warn};
use url::Url;

use super::document::DocumentQuery;
use super::selector::SelectorValidator;
use super::url::{DecomposedUrl, UrlDecomposer};
use crate::compiler::pattern::PathMatcher;
use crate::rule::model::{
    BoolOrString, FragmentVisit, Route, RulePredicate, VisitContext, WatchSearchParams,
};

/// 已编译规则
/// 构造后匹配逻辑不可变，仅规则集的成员与顺序可在运行期变更
#[derive(Debug, Clone)]
pub struct ParsedRule {
    pub from_matcher: PathMatcher,
    pub to_matcher: PathMatcher,
    // 已通过静态校验的ID选择器；为空表示规则被禁用
    pub containers: Vec<String>,
    pub name: Option<String>,
    pub scroll: BoolOrString,
    pub focus: Option<BoolOrString>,
    pub predicate: RulePredicate,
    pub watch_search_params: Option<WatchSearchParams>,
}

impl ParsedRule {
    /// 路由判定：所有闸门按序短路，任一不满足即整体不匹配
    ///
    /// 判定顺序：
    /// 1. 禁用规则短路
    /// 2. 自定义谓词
    /// 3. 分解两端URL（分解失败视为不匹配，运行期永不报错）
    /// 4. 路由形态分类：同路径异查询 => 查询参数分支，否则路径分支
    /// 5. 容器选择器运行期校验（全有或全无，首个失败即中止）
    pub fn matches(
        &self,
        route: &Route,
        visit: &VisitContext,
        document: &dyn DocumentQuery,
        base: &Url,
    ) -> bool {
        if self.containers.is_empty() {
            return false;
        }

        if !self.predicate.check(visit) {
            debug!("规则谓词返回false，跳过该规则：{}", route);
            return false;
        }

        let from = match UrlDecomposer::decompose(&route.from, base) {
            Ok(url) => url,
            Err(e) => {
                warn!("来源URL分解失败：{}，错误：{}", route.from, e);
                return false;
            }
        };
        let to = match UrlDecomposer::decompose(&route.to, base) {
            Ok(url) => url,
            Err(e) => {
                warn!("目标URL分解失败：{}，错误：{}", route.to, e);
                return false;
            }
        };

        let matched = if from.pathname == to.pathname && from.search != to.search {
            self.matches_search_param_change(&from, &to)
        } else {
            self.from_matcher.is_match(&from.full_path())
                && self.to_matcher.is_match(&to.full_path())
        };
        if !matched {
            return false;
        }

        // 容器选择器逐个做存在性与范围校验
        for selector in &self.containers {
            if let Err(issue) = SelectorValidator::check_runtime(selector, document) {
                debug!("{}", issue.message(selector));
                return false;
            }
        }

        true
    }

    /// 查询参数分支
    ///
    /// 仅当规则设置了监听策略时才可能命中。from/to模式常常相同，
    /// 纯参数变化不应因同一URL同时对照两侧模式而被拒绝，
    /// 故交叉放宽：两端URL各自命中任一模式即可。
    /// 在此之上再要求被监听的参数确实发生变化。
    fn matches_search_param_change(&self, from: &DecomposedUrl, to: &DecomposedUrl) -> bool {
        let Some(watch) = &self.watch_search_params else {
            // 默认关闭：未设置监听策略的规则对纯查询串变化一律不命中
            debug!("规则未监听查询参数，跳过纯查询串变化路由");
            return false;
        };

        let from_path = from.full_path();
        let to_path = to.full_path();
        let cross_matched = (self.from_matcher.is_match(&from_path)
            || self.to_matcher.is_match(&from_path))
            && (self.from_matcher.is_match(&to_path) || self.to_matcher.is_match(&to_path));
        if !cross_matched {
            return false;
        }

        match watch {
            WatchSearchParams::All(true) => from.search != to.search,
            WatchSearchParams::All(false) => false,
            // 命名集合：任一被监听参数的取值或存在性发生变化即视为不同
            WatchSearchParams::Named(names) => {
                names.iter().any(|name| from.param(name) != to.param(name))
            }
        }
    }

    /// 从匹配成功的规则导出片段访问描述符
    pub fn to_visit(&self) -> FragmentVisit {
        FragmentVisit {
            name: self.name.clone(),
            containers: self.containers.clone(),
            scroll: self.scroll.clone(),
            focus: self.focus.clone(),
        }
    }
}
