//! 统一错误处理模块
//!
//! 提供查词流水线的统一错误类型定义和处理机制

// 标准库导入
use std::fmt;

/// 查词统一错误类型
///
/// 覆盖抓取、解析、配置和输入校验中可能出现的所有错误
#[derive(Debug)]
pub enum LookupError {
    /// 传输层错误（连接失败、读取响应体失败等）
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// 词典页面返回了非200状态码
    HttpStatus {
        /// 响应状态码
        status_code: u16,
        /// 请求地址
        url: String,
    },

    /// HTML解析相关错误
    HtmlParse {
        /// 具体错误信息
        details: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 输入验证错误
    InputValidation {
        /// 输入值
        input: String,
        /// 验证失败原因
        reason: String,
    },
}

impl LookupError {
    /// 取出错误携带的HTTP状态码
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LookupError::HttpStatus { status_code, .. } => Some(*status_code),
            LookupError::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Network { message, status_code } => {
                if let Some(code) = status_code {
                    write!(f, "网络请求失败 [{}]: {}", code, message)
                } else {
                    write!(f, "网络请求失败: {}", message)
                }
            }
            LookupError::HttpStatus { status_code, url } => {
                write!(f, "词典页面返回错误状态 [{}]: {}", status_code, url)
            }
            LookupError::HtmlParse { details } => {
                write!(f, "HTML解析失败: {}", details)
            }
            LookupError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            LookupError::InputValidation { input, reason } => {
                write!(f, "输入验证失败 [{}]: {}", input, reason)
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// 查词结果类型别名
pub type Result<T> = std::result::Result<T, LookupError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! lookup_error {
    (status, $code:expr, $url:expr) => {
        $crate::error::LookupError::HttpStatus {
            status_code: $code,
            url: $url.to_string(),
        }
    };
    (html_parse, $details:expr) => {
        $crate::error::LookupError::HtmlParse {
            details: $details.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::LookupError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
    (input_validation, $input:expr, $reason:expr) => {
        $crate::error::LookupError::InputValidation {
            input: $input.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从reqwest::Error转换为LookupError
impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        LookupError::Network {
            message: error.to_string(),
            status_code,
        }
    }
}
