/// 词典服务配置常量
///
/// 该文件定义了词典页面地址、请求方式以及页面结构相关的常量，方便统一管理和维护

/// 词典页面请求配置
pub mod endpoint_config {
    /// 默认词典页面地址
    pub const DEFAULT_ENDPOINT: &str = "https://cn.bing.com/dict/search";

    /// 默认请求方法
    pub const DEFAULT_METHOD: &str = "GET";

    /// 查询词所在的参数名
    pub const DEFAULT_QUERY_PARAM: &str = "q";

    /// 默认User-Agent
    pub const DEFAULT_USER_AGENT: &str =
        "Mozilla/5.0 (compatible; PopupDict/0.1.0; +https://github.com/popup-dict)";

    /// 支持的请求方法
    pub const SUPPORTED_METHODS: &[&str] = &["GET", "POST"];
}

/// 词典页面结构约定
///
/// 页面改版时只需要调整这里
pub mod page_layout {
    /// 释义容器的class
    pub const DEFINITION_CONTAINER_CLASS: &str = "qdef";

    /// 词头元素的id
    pub const HEADWORD_ID: &str = "headword";

    /// 语言标记属性
    pub const LANG_ATTR: &str = "lang";

    /// 音标区块的class
    pub const PRONOUNCE_BLOCK_CLASS: &str = "hd_tf_lh";

    /// 词性标签的class
    pub const POS_CLASS: &str = "pos";

    /// 释义文本的class
    pub const DEF_CLASS: &str = "def";

    /// 词形变化区块的class
    pub const VARIANT_BLOCK_CLASS: &str = "hd_if";
}

/// 错误消息常量
pub mod error_messages {
    /// 查询词为空
    pub const EMPTY_TERM: &str = "查询词不能为空";

    /// 缺少终端查词环节
    pub const MISSING_TERMINAL: &str = "流水线缺少终端查词环节";

    /// 不支持的请求方法
    pub const UNSUPPORTED_METHOD: &str = "仅支持GET或POST请求";

    /// 地址格式错误
    pub const INVALID_ENDPOINT: &str = "词典地址必须以http://或https://开头";
}

/// 验证词典地址是否有效
pub fn is_valid_endpoint(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// 验证请求方法是否支持（不区分大小写）
pub fn is_supported_method(method: &str) -> bool {
    endpoint_config::SUPPORTED_METHODS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(method))
}
