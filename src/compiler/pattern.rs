//! 路径模式编译模型
//! 将声明式路径规格编译为可直接执行的锚定正则

use regex::Regex;

use crate::error::FragResult;
use crate::rule::model::PathSpec;

/// 编译后的单条路径模式
#[derive(Debug, Clone)]
pub struct CompiledPathPattern {
    // 原始模式文本（用于诊断输出）
    pub raw: String,
    pub regex: Regex,
}

/// 编译后的路径匹配器
/// 交替列表在编译期展开，运行期只做统一的真值查询，不再类型分支
#[derive(Debug, Clone)]
pub struct PathMatcher {
    alternatives: Vec<CompiledPathPattern>,
}

impl PathMatcher {
    /// 编译路径规格
    /// 模式语法错误在此处即时失败，运行期匹配永不报错
    pub fn compile(spec: &PathSpec) -> FragResult<Self> {
        let mut alternatives = Vec::new();
        for raw in spec.alternatives() {
            let regex = Self::pattern_to_regex(raw)?;
            alternatives.push(CompiledPathPattern {
                raw: raw.to_string(),
                regex,
            });
        }
        Ok(Self { alternatives })
    }

    /// 空匹配器（禁用规则占位，任何路径都不命中）
    pub(crate) fn never() -> Self {
        Self {
            alternatives: Vec::new(),
        }
    }

    /// 匹配路径（含查询串的完整路径），任一交替模式命中即命中
    pub fn is_match(&self, path: &str) -> bool {
        self.alternatives.iter().any(|p| p.regex.is_match(path))
    }

    /// 模式描述（诊断用）
    pub fn describe(&self) -> String {
        self.alternatives
            .iter()
            .map(|p| p.raw.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// 单条模式编译为锚定正则
    /// 1. `:name` 命名段匹配单个路径段（不跨越 `/` 与 `?`）
    /// 2. `*` 贪婪通配，可跨段
    /// 3. `(...)` 内嵌正则分组原样透传
    /// 4. 其余字符按字面量转义
    /// 末尾容忍可选斜杠
    fn pattern_to_regex(pattern: &str) -> FragResult<Regex> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                ':' => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            name.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if name.is_empty() {
                        source.push_str("\\:");
                    } else {
                        source.push_str("(?P<");
                        source.push_str(&name);
                        source.push_str(">[^/?]+)");
                    }
                }
                '*' => source.push_str(".*"),
                '(' => {
                    // 透传内嵌分组，含嵌套与转义；括号不配对时交由正则编译报错
                    source.push('(');
                    let mut depth = 1usize;
                    for inner in chars.by_ref() {
                        source.push(inner);
                        match inner {
                            '(' => depth += 1,
                            ')' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                }
                _ => source.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
            }
        }

        source.push_str("/?$");
        Ok(Regex::new(&source)?)
    }
}
