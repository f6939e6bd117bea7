//! 查词流水线模块
//!
//! 所有环节实现同一个[`Lookup`]接口：终端环节负责抓取并抽取，
//! 外层通过[`Layer`]逐层包装（缓存、加载状态切换）。
//! [`PipelineBuilder`]按给定顺序组装，第一个层位于最外侧。

// 标准库导入
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// 第三方crate导入
use async_trait::async_trait;
use tracing::debug;

// 本地模块导入
use crate::defaults::error_messages;
use crate::error::Result;
use crate::extractor::extract;
use crate::fetcher::Fetch;
use crate::record::TranslationRecord;
use crate::view::PopupView;

/// 查词环节接口：输入查询词，输出释义记录（无释义时为`None`）
#[async_trait(?Send)]
pub trait Lookup {
    async fn lookup(&self, term: &str) -> Result<Option<TranslationRecord>>;
}

/// 包装层：接收下一环节，返回替代它的新环节
pub trait Layer {
    fn wrap(&self, inner: Rc<dyn Lookup>) -> Rc<dyn Lookup>;
}

impl<F> Layer for F
where
    F: Fn(Rc<dyn Lookup>) -> Rc<dyn Lookup>,
{
    fn wrap(&self, inner: Rc<dyn Lookup>) -> Rc<dyn Lookup> {
        self(inner)
    }
}

/// 终端环节：抓取页面后立即抽取，DOM不再保留
pub struct ExtractStage<F> {
    fetcher: F,
}

impl<F: Fetch> ExtractStage<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

#[async_trait(?Send)]
impl<F: Fetch> Lookup for ExtractStage<F> {
    async fn lookup(&self, term: &str) -> Result<Option<TranslationRecord>> {
        let dom = self.fetcher.fetch(term).await?;
        let record = extract(&dom);
        if record.is_none() {
            debug!("页面中没有释义容器: {}", term);
        }
        Ok(record)
    }
}

/// 会话内的释义缓存
///
/// 只保存非空记录，没有过期和容量限制。
#[derive(Debug, Default)]
pub struct RecordCache {
    entries: RefCell<HashMap<String, TranslationRecord>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<TranslationRecord> {
        self.entries.borrow().get(term).cloned()
    }

    fn store(&self, term: &str, record: &TranslationRecord) {
        self.entries
            .borrow_mut()
            .insert(term.to_string(), record.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }
}

/// 缓存层
pub struct CacheLayer {
    cache: Rc<RecordCache>,
}

impl CacheLayer {
    pub fn new(cache: Rc<RecordCache>) -> Self {
        Self { cache }
    }
}

impl Layer for CacheLayer {
    fn wrap(&self, inner: Rc<dyn Lookup>) -> Rc<dyn Lookup> {
        Rc::new(Cached {
            cache: Rc::clone(&self.cache),
            inner,
        })
    }
}

struct Cached {
    cache: Rc<RecordCache>,
    inner: Rc<dyn Lookup>,
}

#[async_trait(?Send)]
impl Lookup for Cached {
    async fn lookup(&self, term: &str) -> Result<Option<TranslationRecord>> {
        if let Some(record) = self.cache.get(term) {
            self.cache.hits.set(self.cache.hits.get() + 1);
            debug!("💾 缓存命中: {}", term);
            return Ok(Some(record));
        }
        self.cache.misses.set(self.cache.misses.get() + 1);

        let result = self.inner.lookup(term).await?;
        match &result {
            Some(record) if !record.is_empty() => self.cache.store(term, record),
            _ => debug!("结果为空，不写入缓存: {}", term),
        }
        Ok(result)
    }
}

/// 加载状态层：调用前后各切换一次加载区/结果区，成功失败都恢复
pub struct BusyLayer {
    view: Rc<dyn PopupView>,
}

impl BusyLayer {
    pub fn new(view: Rc<dyn PopupView>) -> Self {
        Self { view }
    }
}

impl Layer for BusyLayer {
    fn wrap(&self, inner: Rc<dyn Lookup>) -> Rc<dyn Lookup> {
        Rc::new(Busy {
            view: Rc::clone(&self.view),
            inner,
        })
    }
}

struct Busy {
    view: Rc<dyn PopupView>,
    inner: Rc<dyn Lookup>,
}

#[async_trait(?Send)]
impl Lookup for Busy {
    async fn lookup(&self, term: &str) -> Result<Option<TranslationRecord>> {
        self.view.toggle_busy();
        let outcome = self.inner.lookup(term).await;
        self.view.toggle_busy();
        outcome
    }
}

/// 流水线组装器
///
/// # Examples
///
/// ```rust,ignore
/// let lookup = PipelineBuilder::new()
///     .layer(BusyLayer::new(view))
///     .layer(CacheLayer::new(cache))
///     .terminal(ExtractStage::new(fetcher))
///     .build()?;
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    terminal: Option<Rc<dyn Lookup>>,
    layers: Vec<Box<dyn Layer>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置终端环节
    pub fn terminal<L: Lookup + 'static>(mut self, stage: L) -> Self {
        self.terminal = Some(Rc::new(stage));
        self
    }

    /// 追加一个包装层，先追加的在外侧
    pub fn layer<L: Layer + 'static>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// 组装流水线，缺少终端环节时报配置错误
    pub fn build(self) -> Result<Rc<dyn Lookup>> {
        let terminal = self
            .terminal
            .ok_or_else(|| crate::lookup_error!(config, "pipeline", error_messages::MISSING_TERMINAL))?;

        Ok(self
            .layers
            .iter()
            .rev()
            .fold(terminal, |inner, layer| layer.wrap(inner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::testing::{CountingFetcher, RecordingView, DEFINITION_PAGE, EMPTY_PAGE};

    struct Tagged {
        tag: &'static str,
        inner: Rc<dyn Lookup>,
    }

    #[async_trait(?Send)]
    impl Lookup for Tagged {
        async fn lookup(&self, term: &str) -> Result<Option<TranslationRecord>> {
            let mut record = self.inner.lookup(term).await?.unwrap_or_default();
            let word = record.word.take().unwrap_or_default();
            record.word = Some(format!("{}{}", self.tag, word));
            Ok(Some(record))
        }
    }

    struct Echo;

    #[async_trait(?Send)]
    impl Lookup for Echo {
        async fn lookup(&self, term: &str) -> Result<Option<TranslationRecord>> {
            Ok(Some(TranslationRecord {
                word: Some(term.to_string()),
                ..Default::default()
            }))
        }
    }

    fn tag(tag: &'static str) -> impl Fn(Rc<dyn Lookup>) -> Rc<dyn Lookup> {
        move |inner| Rc::new(Tagged { tag, inner }) as Rc<dyn Lookup>
    }

    #[tokio::test]
    async fn test_first_layer_is_outermost() {
        let lookup = PipelineBuilder::new()
            .layer(tag("a"))
            .layer(tag("b"))
            .terminal(Echo)
            .build()
            .unwrap();

        let record = lookup.lookup("x").await.unwrap().unwrap();
        // b包住终端，a包住b，所以a最后写入
        assert_eq!(record.word.as_deref(), Some("abx"));
    }

    #[test]
    fn test_missing_terminal_fails_at_build() {
        let result = PipelineBuilder::new().layer(tag("a")).build();
        assert!(matches!(
            result,
            Err(LookupError::Configuration { ref field, .. }) if field == "pipeline"
        ));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_fetch() {
        let fetcher = CountingFetcher::page(DEFINITION_PAGE);
        let calls = fetcher.calls();
        let cache = Rc::new(RecordCache::new());
        let lookup = PipelineBuilder::new()
            .layer(CacheLayer::new(Rc::clone(&cache)))
            .terminal(ExtractStage::new(fetcher))
            .build()
            .unwrap();

        let first = lookup.lookup("test").await.unwrap();
        let second = lookup.lookup("test").await.unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[tokio::test]
    async fn test_missing_definition_not_cached() {
        let fetcher = CountingFetcher::page(EMPTY_PAGE);
        let calls = fetcher.calls();
        let cache = Rc::new(RecordCache::new());
        let lookup = PipelineBuilder::new()
            .layer(CacheLayer::new(Rc::clone(&cache)))
            .terminal(ExtractStage::new(fetcher))
            .build()
            .unwrap();

        assert_eq!(lookup.lookup("zzz").await.unwrap(), None);
        assert_eq!(lookup.lookup("zzz").await.unwrap(), None);
        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_busy_toggles_twice_and_passes_error_through() {
        let view = Rc::new(RecordingView::default());
        let lookup = PipelineBuilder::new()
            .layer(BusyLayer::new(view.clone()))
            .terminal(ExtractStage::new(CountingFetcher::status(503)))
            .build()
            .unwrap();

        let result = lookup.lookup("test").await;
        assert!(matches!(
            result,
            Err(LookupError::HttpStatus { status_code: 503, .. })
        ));
        assert_eq!(view.toggles.get(), 2);
        assert!(!view.is_loading());
    }
}
