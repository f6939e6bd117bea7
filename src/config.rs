//! 配置管理模块
//!
//! 提供CLI参数解析和查词配置管理功能

// 第三方crate导入
use clap::{Parser, ValueEnum};

// 本地模块导入
use crate::defaults::{endpoint_config, error_messages, is_supported_method, is_valid_endpoint};
use crate::error::{LookupError, Result};

/// 查词配置结构体
///
/// 描述词典页面的地址、请求方式和会话行为，支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use popup_dict::config::LookupConfig;
///
/// let config = LookupConfig::new()
///     .with_endpoint("https://cn.bing.com/dict/search")
///     .with_method("GET")
///     .with_query_param("q")
///     .latest_only(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// 词典页面地址
    endpoint: String,
    /// 请求方法 (GET / POST)
    method: String,
    /// 查询词参数名
    query_param: String,
    /// User-Agent
    user_agent: String,
    /// 是否只渲染最新一次提交的结果
    latest_only: bool,
}

impl LookupConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - 地址: 必应词典
    /// - 请求方法: GET
    /// - 参数名: q
    /// - 只渲染最新结果: true
    pub fn new() -> Self {
        Self {
            endpoint: endpoint_config::DEFAULT_ENDPOINT.to_string(),
            method: endpoint_config::DEFAULT_METHOD.to_string(),
            query_param: endpoint_config::DEFAULT_QUERY_PARAM.to_string(),
            user_agent: endpoint_config::DEFAULT_USER_AGENT.to_string(),
            latest_only: true,
        }
    }

    /// 获取词典地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 获取请求方法（大写）
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 获取查询参数名
    pub fn query_param(&self) -> &str {
        &self.query_param
    }

    /// 获取User-Agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 检查是否只渲染最新结果
    pub fn is_latest_only(&self) -> bool {
        self.latest_only
    }

    /// 设置词典地址
    pub fn with_endpoint(mut self, url: &str) -> Self {
        self.endpoint = url.to_string();
        self
    }

    /// 设置请求方法
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    /// 设置查询参数名
    pub fn with_query_param(mut self, param: &str) -> Self {
        self.query_param = param.to_string();
        self
    }

    /// 设置User-Agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// 设置是否只渲染最新结果
    pub fn latest_only(mut self, enable: bool) -> Self {
        self.latest_only = enable;
        self
    }

    /// 校验配置，启动阶段调用
    pub fn validate(&self) -> Result<()> {
        if !is_valid_endpoint(&self.endpoint) {
            return Err(config_error("endpoint", error_messages::INVALID_ENDPOINT));
        }
        if !is_supported_method(&self.method) {
            return Err(config_error("method", error_messages::UNSUPPORTED_METHOD));
        }
        if self.query_param.trim().is_empty() {
            return Err(config_error("param", "查询参数名不能为空"));
        }
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn config_error(field: &str, reason: &str) -> LookupError {
    crate::lookup_error!(config, field, reason)
}

/// 释义输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// HTML片段
    Html,
    /// 终端纯文本
    Text,
    /// 结构化JSON
    Json,
}

/// CLI参数结构
#[derive(Parser)]
#[command(author, version, about = "划词词典 - 抓取在线词典页面并渲染释义", long_about = None)]
pub struct Cli {
    /// 直接查询一个单词后退出 (不指定则进入交互模式)
    #[arg(short, long, value_name = "WORD")]
    pub word: Option<String>,

    /// 词典页面地址
    #[arg(short, long, default_value = endpoint_config::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// 请求方法 (GET / POST)
    #[arg(short, long, default_value = endpoint_config::DEFAULT_METHOD)]
    pub method: String,

    /// 查询词参数名
    #[arg(long, default_value = endpoint_config::DEFAULT_QUERY_PARAM)]
    pub param: String,

    /// 自定义User-Agent字符串
    #[arg(long)]
    pub user_agent: Option<String>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// 允许过期结果覆盖最新结果 (后完成者生效)
    #[arg(long)]
    pub allow_stale: bool,

    /// 退出时显示会话统计
    #[arg(long)]
    pub stats: bool,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// 由命令行参数生成查词配置
    pub fn lookup_config(&self) -> LookupConfig {
        let mut config = LookupConfig::new()
            .with_endpoint(&self.endpoint)
            .with_method(&self.method)
            .with_query_param(&self.param)
            .latest_only(!self.allow_stale);
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        config
    }
}
