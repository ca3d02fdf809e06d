//! 名称规范化工具模块
//! 将任意规则名称归一为稳定的小写短横线标识

/// 名称规范化工具类
pub struct NameNormalizer;

impl NameNormalizer {
    /// 规范化规则名称
    ///
    /// 1. 全部转为小写
    /// 2. 连续的非字母数字字符折叠为单个 `-`
    /// 3. 去除首尾的 `-`
    pub fn classify(raw: &str) -> String {
        let mut normalized = String::with_capacity(raw.len());
        let mut pending_dash = false;

        for c in raw.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !normalized.is_empty() {
                    normalized.push('-');
                }
                pending_dash = false;
                normalized.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }

        normalized
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic() {
        // 测试场景：空格分隔的标题转为短横线标识
        assert_eq!(NameNormalizer::classify("Open Overlay"), "open-overlay");
    }

    #[test]
    fn test_classify_collapses_runs() {
        // 测试场景：连续分隔符折叠为单个短横线
        assert_eq!(NameNormalizer::classify("a  --  b"), "a-b");
    }

    #[test]
    fn test_classify_trims_edges() {
        // 测试场景：首尾分隔符不产生悬挂短横线
        assert_eq!(NameNormalizer::classify("  hello!  "), "hello");
        assert_eq!(NameNormalizer::classify("!!!"), "");
    }

    #[test]
    fn test_classify_already_stable() {
        // 测试场景：已规范的标识保持不变
        assert_eq!(NameNormalizer::classify("my-rule"), "my-rule");
    }
}
