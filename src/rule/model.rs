//! 规则数据模型定义
//! 仅存储声明式规则数据与路由上下文，无匹配逻辑，支持序列化/反序列化

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// 导航路由（一次匹配的输入）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

impl Route {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 访问上下文
/// 对核心匹配逻辑不透明，仅作为自定义谓词的入参传递
#[derive(Debug, Clone, Default)]
pub struct VisitContext {
    pub route: Route,
    // 宿主侧附加数据，核心不读取
    pub data: serde_json::Value,
}

impl VisitContext {
    pub fn for_route(route: Route) -> Self {
        Self {
            route,
            data: serde_json::Value::Null,
        }
    }
}

/// 路径规格
/// 单条字符串为一个路径模式（字面量/命名段/通配符/内嵌正则分组），
/// 列表为交替匹配（任一模式命中即命中）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSpec {
    Single(String),
    Many(Vec<String>),
}

impl PathSpec {
    /// 展开为模式列表（统一单条与交替两种形态）
    pub fn alternatives(&self) -> Vec<&str> {
        match self {
            PathSpec::Single(s) => vec![s.as_str()],
            PathSpec::Many(list) => list.iter().map(|s| s.as_str()).collect(),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(s: &str) -> Self {
        PathSpec::Single(s.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(s: String) -> Self {
        PathSpec::Single(s)
    }
}

impl From<Vec<&str>> for PathSpec {
    fn from(list: Vec<&str>) -> Self {
        PathSpec::Many(list.into_iter().map(|s| s.to_string()).collect())
    }
}

/// 布尔或选择器字符串（scroll/focus 两类指令共用的形态）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolOrString {
    Bool(bool),
    Text(String),
}

impl Default for BoolOrString {
    fn default() -> Self {
        BoolOrString::Bool(false)
    }
}

impl BoolOrString {
    /// 是否为显式关闭（false）
    pub fn is_disabled(&self) -> bool {
        matches!(self, BoolOrString::Bool(false))
    }
}

/// 查询参数监听策略
/// `true` 表示任何查询串变化均有效，列表表示仅监听指定参数名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WatchSearchParams {
    All(bool),
    Named(Vec<String>),
}

/// 自定义谓词
/// 默认恒真，构造时固定赋值，匹配逻辑中无需判空
#[derive(Clone)]
pub struct RulePredicate(Arc<dyn Fn(&VisitContext) -> bool + Send + Sync>);

impl RulePredicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&VisitContext) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// 恒真谓词（默认值）
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// 执行谓词判断
    pub fn check(&self, visit: &VisitContext) -> bool {
        (self.0)(visit)
    }
}

impl Default for RulePredicate {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for RulePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RulePredicate")
    }
}

/// 声明式规则定义（插件初始化时的原始输入）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleOptions {
    pub from: Option<PathSpec>,
    pub to: Option<PathSpec>,
    #[serde(default)]
    pub containers: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scroll: BoolOrString,
    #[serde(default)]
    pub focus: Option<BoolOrString>,
    #[serde(rename = "watchSearchParams", alias = "watch_search_params", default)]
    pub watch_search_params: Option<WatchSearchParams>,
    // 谓词仅支持代码侧设置，不参与序列化
    #[serde(skip)]
    pub predicate: RulePredicate,
}

impl RuleOptions {
    /// 从必填字段快速创建
    pub fn new(
        from: impl Into<PathSpec>,
        to: impl Into<PathSpec>,
        containers: &[&str],
    ) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            containers: containers.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_scroll(mut self, scroll: BoolOrString) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_focus(mut self, focus: BoolOrString) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_watch_search_params(mut self, watch: WatchSearchParams) -> Self {
        self.watch_search_params = Some(watch);
        self
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&VisitContext) -> bool + Send + Sync + 'static,
    {
        self.predicate = RulePredicate::new(f);
        self
    }
}

/// 片段访问描述符（匹配成功后的输出）
/// 不再引用规则的任何匹配器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentVisit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub containers: Vec<String>,
    pub scroll: BoolOrString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<BoolOrString>,
}

impl fmt::Display for FragmentVisit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} [{}]", name, self.containers.join(", ")),
            None => write!(f, "[{}]", self.containers.join(", ")),
        }
    }
}
