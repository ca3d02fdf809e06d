//! 文档查询能力抽象
//! 运行期文档状态以注入能力的形式提供，核心不实现任何DOM遍历

use std::collections::HashSet;

/// 文档查询能力
/// 由宿主环境实现，回答两类只读问题：
/// 1. 当前文档中是否存在匹配选择器的元素
/// 2. 该元素是否位于默认容器范围内（自身即默认容器或其后代）
pub trait DocumentQuery {
    fn exists(&self, selector: &str) -> bool;
    fn is_within_default_containers(&self, selector: &str) -> bool;
}

/// 静态文档实现
/// 以显式选择器集合描述文档状态，适用于无DOM宿主与测试
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    present: HashSet<String>,
    scoped: HashSet<String>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从选择器列表快速创建（全部视为存在且在默认容器范围内）
    pub fn with_scoped(selectors: &[&str]) -> Self {
        let mut doc = Self::new();
        for selector in selectors {
            doc.insert(selector, true);
        }
        doc
    }

    /// 登记一个存在的选择器，`within_scope` 标记其是否在默认容器范围内
    pub fn insert(&mut self, selector: &str, within_scope: bool) {
        self.present.insert(selector.to_string());
        if within_scope {
            self.scoped.insert(selector.to_string());
        }
    }
}

impl DocumentQuery for StaticDocument {
    fn exists(&self, selector: &str) -> bool {
        self.present.contains(selector)
    }

    fn is_within_default_containers(&self, selector: &str) -> bool {
        self.scoped.contains(selector)
    }
}
