//! 规则编译器核心
//! 仅负责将声明式规则编译为可执行的匹配单元

use tracing::{debug, warn};

use super::pattern::PathMatcher;
use crate::error::FragResult;
use crate::resolver::rule::ParsedRule;
use crate::resolver::selector::SelectorValidator;
use crate::rule::model::RuleOptions;
use crate::utils::NameNormalizer;

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则列表（保持声明顺序）
    pub fn compile_all(rules: &[RuleOptions]) -> FragResult<Vec<ParsedRule>> {
        let mut compiled = Vec::with_capacity(rules.len());
        for options in rules {
            compiled.push(Self::compile(options)?);
        }
        debug!("规则编译完成，共{}条", compiled.len());
        Ok(compiled)
    }

    /// 编译单条规则
    ///
    /// 错误策略：
    /// 1. 路径模式语法错误即时返回Err（错误模式在运行期不可能产出正确行为）
    /// 2. 路径规格缺失、选择器非法只降级告警，规则置为永不匹配，不中断其余规则
    pub fn compile(options: &RuleOptions) -> FragResult<ParsedRule> {
        // 1. 编译路径匹配器对
        let (from_matcher, to_matcher, mut usable) =
            match (options.from.as_ref(), options.to.as_ref()) {
                (Some(from), Some(to)) => {
                    (PathMatcher::compile(from)?, PathMatcher::compile(to)?, true)
                }
                _ => {
                    warn!("规则缺少from/to路径规格，该规则已禁用");
                    (PathMatcher::never(), PathMatcher::never(), false)
                }
            };

        // 2. 静态校验并去重容器选择器
        let containers = SelectorValidator::sanitize_containers(&options.containers);
        if containers.is_empty() {
            warn!("规则无有效容器选择器，该规则已禁用");
            usable = false;
        }

        // 3. 规范化规则名称
        let name = options
            .name
            .as_deref()
            .map(NameNormalizer::classify)
            .filter(|n| !n.is_empty());

        Ok(ParsedRule {
            from_matcher,
            to_matcher,
            // 禁用规则清空容器列表，运行期据此短路
            containers: if usable { containers } else { Vec::new() },
            name,
            scroll: options.scroll.clone(),
            focus: options.focus.clone(),
            predicate: options.predicate.clone(),
            watch_search_params: options.watch_search_params.clone(),
        })
    }
}
