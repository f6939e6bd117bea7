//! 单元测试共用的假抓取器和假视图

// 标准库导入
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

// 第三方crate导入
use async_trait::async_trait;
use markup5ever_rcdom::RcDom;

// 本地模块导入
use crate::error::{LookupError, Result};
use crate::fetcher::Fetch;
use crate::html_processor::parse_html;
use crate::view::PopupView;

/// 带完整释义容器的页面
pub const DEFINITION_PAGE: &str = r#"<html><body><div class="qdef">
    <div class="hd_area">
        <div id="headword"><h1><strong lang="en">test</strong></h1></div>
        <div class="hd_tf_lh"><div>UK</div><div>play</div><div>US</div><div>play</div></div>
    </div>
    <ul><li><span class="pos">n.</span><span class="def">a <b>test</b> &lt;exam&gt;</span></li></ul>
    <div class="hd_div1"><div class="hd_if"><span>复数：</span><a>tests</a></div></div>
</div></body></html>"#;

/// 没有释义容器的页面
pub const EMPTY_PAGE: &str = "<html><body><div class='no_results'>没有找到</div></body></html>";

/// 假页面响应
#[derive(Debug, Clone)]
pub enum Reply {
    Page(&'static str),
    Status(u16),
}

/// 记录调用次数的假抓取器
pub struct CountingFetcher {
    calls: Rc<Cell<usize>>,
    queued: RefCell<VecDeque<Reply>>,
    fallback: Reply,
    delays: HashMap<String, Duration>,
}

impl CountingFetcher {
    pub fn page(html: &'static str) -> Self {
        Self::with_fallback(Reply::Page(html))
    }

    pub fn status(code: u16) -> Self {
        Self::with_fallback(Reply::Status(code))
    }

    fn with_fallback(fallback: Reply) -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            queued: RefCell::new(VecDeque::new()),
            fallback,
            delays: HashMap::new(),
        }
    }

    /// 先按顺序返回这些响应，用完后回到默认响应
    pub fn then(self, reply: Reply) -> Self {
        self.queued.borrow_mut().push_back(reply);
        self
    }

    /// 某个查询词的响应延迟
    pub fn delay(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

#[async_trait(?Send)]
impl Fetch for CountingFetcher {
    async fn fetch(&self, term: &str) -> Result<RcDom> {
        self.calls.set(self.calls.get() + 1);
        let reply = self
            .queued
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        if let Some(delay) = self.delays.get(term) {
            tokio::time::sleep(*delay).await;
        }

        match reply {
            Reply::Page(html) => parse_html(html),
            Reply::Status(status_code) => Err(LookupError::HttpStatus {
                status_code,
                url: format!("test://dict?q={}", term),
            }),
        }
    }
}

/// 记录所有界面操作的假视图
#[derive(Default)]
pub struct RecordingView {
    pub toggles: Cell<usize>,
    loading: Cell<bool>,
    pub shown: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl RecordingView {
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }
}

impl PopupView for RecordingView {
    fn toggle_busy(&self) {
        self.toggles.set(self.toggles.get() + 1);
        self.loading.set(!self.loading.get());
    }

    fn show(&self, markup: &str) {
        self.shown.borrow_mut().push(markup.to_string());
    }

    fn report_error(&self, error: &LookupError) {
        self.errors.borrow_mut().push(error.to_string());
    }
}
