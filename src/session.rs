//! 查词会话模块
//!
//! [`Session`]在启动时创建一次，持有上一次提交的查询词、提交代数和缓存，
//! 是流水线最外层：重复拦截 → 流水线 → 渲染 → 展示。

// 标准库导入
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// 第三方crate导入
use tracing::{debug, info, warn};

// 本地模块导入
use crate::config::{LookupConfig, OutputFormat};
use crate::error::Result;
use crate::fetcher::Fetch;
use crate::pipeline::{BusyLayer, CacheLayer, ExtractStage, Lookup, PipelineBuilder, RecordCache};
use crate::renderer::render;
use crate::stats::SessionStats;
use crate::view::PopupView;

/// 一次提交的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 与上一次提交的查询词相同，流水线未运行
    Suppressed,
    /// 渲染出了释义
    Rendered,
    /// 没有释义，展示区已清空
    Cleared,
    /// 期间有更新的提交，本次结果被丢弃
    Stale,
    /// 查询失败，携带HTTP状态码（如有）
    Failed(Option<u16>),
}

/// 查词会话
pub struct Session {
    lookup: Rc<dyn Lookup>,
    view: Rc<dyn PopupView>,
    cache: Option<Rc<RecordCache>>,
    format: OutputFormat,
    latest_only: bool,
    last_term: RefCell<Option<String>>,
    generation: Cell<u64>,
    stats: RefCell<SessionStats>,
}

impl Session {
    /// 用已组装好的流水线创建会话
    pub fn new(
        lookup: Rc<dyn Lookup>,
        view: Rc<dyn PopupView>,
        format: OutputFormat,
        latest_only: bool,
    ) -> Self {
        Self {
            lookup,
            view,
            cache: None,
            format,
            latest_only,
            last_term: RefCell::new(None),
            generation: Cell::new(0),
            stats: RefCell::new(SessionStats::default()),
        }
    }

    /// 组装标准流水线：加载状态 → 缓存 → 抓取并抽取
    pub fn with_fetcher<F: Fetch + 'static>(
        fetcher: F,
        view: Rc<dyn PopupView>,
        config: &LookupConfig,
        format: OutputFormat,
    ) -> Result<Self> {
        let cache = Rc::new(RecordCache::new());
        let lookup = PipelineBuilder::new()
            .layer(BusyLayer::new(Rc::clone(&view)))
            .layer(CacheLayer::new(Rc::clone(&cache)))
            .terminal(ExtractStage::new(fetcher))
            .build()?;

        let mut session = Self::new(lookup, view, format, config.is_latest_only());
        session.cache = Some(cache);
        Ok(session)
    }

    /// 提交查询词
    ///
    /// 与上一次提交相同则直接忽略。查询词在流水线运行前就被记录，
    /// 所以失败后立即重试同一个词也会被拦截。
    pub async fn submit(&self, term: &str) -> SubmitOutcome {
        if self.last_term.borrow().as_deref() == Some(term) {
            debug!("与上次查询相同，忽略: {}", term);
            self.stats.borrow_mut().suppressed += 1;
            return SubmitOutcome::Suppressed;
        }
        *self.last_term.borrow_mut() = Some(term.to_string());

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.stats.borrow_mut().submissions += 1;
        info!("🔎 查询: {}", term);

        let result = self.lookup.lookup(term).await;

        if self.latest_only && self.generation.get() != generation {
            debug!("已有更新的查询，丢弃结果: {}", term);
            self.stats.borrow_mut().stale += 1;
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(record) => {
                let markup = render(self.format, record.as_ref());
                self.view.show(&markup);
                let mut stats = self.stats.borrow_mut();
                if markup.is_empty() {
                    stats.cleared += 1;
                    SubmitOutcome::Cleared
                } else {
                    stats.rendered += 1;
                    SubmitOutcome::Rendered
                }
            }
            Err(e) => {
                warn!("查询失败 [{}]: {}", term, e);
                self.stats.borrow_mut().failures += 1;
                self.view.report_error(&e);
                SubmitOutcome::Failed(e.status_code())
            }
        }
    }

    /// 上一次提交的查询词
    pub fn last_term(&self) -> Option<String> {
        self.last_term.borrow().clone()
    }

    /// 当前统计快照
    pub fn stats(&self) -> SessionStats {
        let mut stats = self.stats.borrow().clone();
        if let Some(cache) = &self.cache {
            stats.cache_hits = cache.hits();
            stats.cache_misses = cache.misses();
            stats.cached_terms = cache.len();
        }
        stats
    }
}
