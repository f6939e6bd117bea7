//! 词典页面抓取模块
//!
//! 每次调用只发出一次请求：不重试、不额外设置超时，
//! 200响应解析为DOM，其余状态码作为错误返回。

// 第三方crate导入
use async_trait::async_trait;
use markup5ever_rcdom::RcDom;
use reqwest::{Client, Method, Request};
use tracing::{debug, info};
use url::Url;

// 本地模块导入
use crate::config::LookupConfig;
use crate::error::{LookupError, Result};
use crate::html_processor::parse_html;

/// 页面来源接口
#[async_trait(?Send)]
pub trait Fetch {
    /// 获取查询词对应的页面并解析
    async fn fetch(&self, term: &str) -> Result<RcDom>;
}

/// 基于reqwest的词典页面抓取器
pub struct HttpFetcher {
    client: Client,
    endpoint: Url,
    method: Method,
    query_param: String,
}

impl HttpFetcher {
    /// 根据配置创建抓取器
    pub fn new(config: &LookupConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = Url::parse(config.endpoint())
            .map_err(|e| crate::lookup_error!(config, "endpoint", e))?;
        let method = Method::from_bytes(config.method().as_bytes())
            .map_err(|e| crate::lookup_error!(config, "method", e))?;
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            method,
            query_param: config.query_param().to_string(),
        })
    }

    /// 构造请求：无论GET还是POST，查询词都作为URL参数传递
    pub fn build_request(&self, term: &str) -> Result<Request> {
        Ok(self
            .client
            .request(self.method.clone(), self.endpoint.clone())
            .query(&[(self.query_param.as_str(), term)])
            .header(reqwest::header::ACCEPT, "text/html")
            .build()?)
    }
}

#[async_trait(?Send)]
impl Fetch for HttpFetcher {
    async fn fetch(&self, term: &str) -> Result<RcDom> {
        let request = self.build_request(term)?;
        let url = request.url().to_string();
        debug!("请求词典页面: {} {}", request.method(), url);

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(crate::lookup_error!(status, status.as_u16(), url));
        }

        let body = response.text().await?;
        info!("📄 已获取页面: {} ({} 字节)", term, body.len());
        parse_html(&body)
    }
}
