//! 规则加载器：从JSON文本/值/文件加载声明式规则列表

use std::fs;
use std::path::Path;
use serde_json::Value;
use tracing::debug;

use super::model::RuleOptions;
use crate::error::{FragResult, FragmentError};

/// 规则加载器
pub struct RuleLoader;

impl RuleLoader {
    /// 从JSON字符串加载规则列表
    pub fn from_json_str(json: &str) -> FragResult<Vec<RuleOptions>> {
        let rules: Vec<RuleOptions> = serde_json::from_str(json)?;
        debug!("规则加载完成，共{}条", rules.len());
        Ok(rules)
    }

    /// 从已解析的JSON值加载规则列表
    pub fn from_json_value(value: Value) -> FragResult<Vec<RuleOptions>> {
        let rules: Vec<RuleOptions> = serde_json::from_value(value)?;
        debug!("规则加载完成，共{}条", rules.len());
        Ok(rules)
    }

    /// 从JSON文件加载规则列表
    pub fn from_file(path: impl AsRef<Path>) -> FragResult<Vec<RuleOptions>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FragmentError::RuleLoadError(format!("读取规则文件失败：{}，错误：{}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }
}
