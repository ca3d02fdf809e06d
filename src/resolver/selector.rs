//! 容器选择器校验
//! 静态校验在规则构造期执行，运行期校验在每次匹配时基于文档能力查询执行

use tracing::warn;

use super::document::DocumentQuery;

/// 静态校验失败原因（构造期）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorIssue {
    // 选择器不是ID形式
    NotAnId,
    // 选择器含嵌套/组合
    Nested,
}

impl SelectorIssue {
    /// 诊断消息
    pub fn message(&self, selector: &str) -> String {
        match self {
            SelectorIssue::NotAnId => {
                format!("fragment selectors must be IDs: {}", selector)
            }
            SelectorIssue::Nested => {
                format!("fragment selectors must not be nested: {}", selector)
            }
        }
    }
}

/// 运行期校验失败原因（每次匹配时）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeSelectorIssue {
    // 当前文档中不存在匹配元素
    NotFound,
    // 匹配元素在默认容器范围之外
    OutsideScope,
}

impl RuntimeSelectorIssue {
    /// 诊断消息
    pub fn message(&self, selector: &str) -> String {
        match self {
            RuntimeSelectorIssue::NotFound => format!(
                "skipping rule since {} doesn't exist in the current document",
                selector
            ),
            RuntimeSelectorIssue::OutsideScope => format!(
                "skipping rule since {} is outside of the default containers",
                selector
            ),
        }
    }
}

/// 选择器校验器
pub struct SelectorValidator;

impl SelectorValidator {
    /// 静态校验单个选择器（输入应已trim）
    /// 两条拒绝规则按序检查，每个选择器仅报告首个违例
    pub fn validate(selector: &str) -> Result<(), SelectorIssue> {
        if !selector.starts_with('#') {
            return Err(SelectorIssue::NotAnId);
        }
        if selector.contains(char::is_whitespace) || selector.contains('>') {
            return Err(SelectorIssue::Nested);
        }
        Ok(())
    }

    /// 清洗容器选择器列表：trim、静态校验（非法项告警后丢弃）、
    /// 按首次出现顺序去重
    pub fn sanitize_containers(raw: &[String]) -> Vec<String> {
        let mut containers: Vec<String> = Vec::with_capacity(raw.len());
        for selector in raw {
            let trimmed = selector.trim();
            if let Err(issue) = Self::validate(trimmed) {
                warn!("{}", issue.message(trimmed));
                continue;
            }
            // 重复项静默折叠，保留首次出现
            if !containers.iter().any(|existing| existing == trimmed) {
                containers.push(trimmed.to_string());
            }
        }
        containers
    }

    /// 运行期校验：存在性检查先于范围检查
    pub fn check_runtime(
        selector: &str,
        document: &dyn DocumentQuery,
    ) -> Result<(), RuntimeSelectorIssue> {
        if !document.exists(selector) {
            return Err(RuntimeSelectorIssue::NotFound);
        }
        if !document.is_within_default_containers(selector) {
            return Err(RuntimeSelectorIssue::OutsideScope);
        }
        Ok(())
    }
}
