//! URL分解器：将URL字符串拆分为路径与查询参数两部分

use once_cell::sync::Lazy;
use url::Url;

use crate::error::FragResult;

/// 相对URL解析的隐式基准地址
static DEFAULT_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("http://localhost/").expect("默认基准URL必然合法")
});

/// 分解后的URL
/// 相同逻辑URL多次分解产出字节级一致的pathname；
/// 重复查询键的所有出现均按原顺序保留
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedUrl {
    pub pathname: String,
    // 非空时携带前导 `?`
    pub search: String,
    pub params: Vec<(String, String)>,
}

impl DecomposedUrl {
    /// 含查询串的完整路径（路径模式的匹配输入）
    pub fn full_path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// 查询指定参数的首次出现值
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// URL分解器
pub struct UrlDecomposer;

impl UrlDecomposer {
    /// 默认基准地址
    pub fn default_base() -> &'static Url {
        &DEFAULT_BASE
    }

    /// 分解URL（绝对/相对统一处理，相对URL基于base解析）
    /// 不做url库之外的额外规范化
    pub fn decompose(raw: &str, base: &Url) -> FragResult<DecomposedUrl> {
        let url = Url::options().base_url(Some(base)).parse(raw)?;

        let pathname = url.path().to_string();
        let search = match url.query() {
            Some(query) if !query.is_empty() => format!("?{}", query),
            _ => String::new(),
        };
        let params = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Ok(DecomposedUrl {
            pathname,
            search,
            params,
        })
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    fn decompose(raw: &str) -> DecomposedUrl {
        UrlDecomposer::decompose(raw, UrlDecomposer::default_base()).unwrap()
    }

    #[test]
    fn test_decompose_relative_url() {
        // 测试场景：相对URL基于隐式基准解析
        let url = decompose("/products/shirt?variant=123");
        assert_eq!(url.pathname, "/products/shirt");
        assert_eq!(url.search, "?variant=123");
        assert_eq!(url.full_path(), "/products/shirt?variant=123");
    }

    #[test]
    fn test_decompose_absolute_url() {
        // 测试场景：绝对URL与相对URL产出一致的路径部分
        let absolute = decompose("https://example.com/products/shirt?variant=123");
        let relative = decompose("/products/shirt?variant=123");
        assert_eq!(absolute.pathname, relative.pathname);
        assert_eq!(absolute.search, relative.search);
    }

    #[test]
    fn test_decompose_no_search() {
        // 测试场景：无查询串时search为空字符串
        let url = decompose("/about");
        assert_eq!(url.search, "");
        assert!(url.params.is_empty());
        assert_eq!(url.full_path(), "/about");
    }

    #[test]
    fn test_decompose_repeated_params_preserved() {
        // 测试场景：重复键的全部出现按序保留，param()取首次出现
        let url = decompose("/list?tag=a&tag=b&page=2");
        assert_eq!(
            url.params,
            vec![
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(url.param("tag"), Some("a"));
        assert_eq!(url.param("missing"), None);
    }

    #[test]
    fn test_decompose_is_stable() {
        // 测试场景：同一逻辑URL重复分解结果一致
        let first = decompose("/a/b%20c?x=1");
        let second = decompose("/a/b%20c?x=1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_decompose_present_empty_param_value() {
        // 测试场景：存在但取值为空的参数与缺失参数可区分
        let url = decompose("/p?variant=");
        assert_eq!(url.param("variant"), Some(""));
        assert_eq!(url.param("other"), None);
    }
}
