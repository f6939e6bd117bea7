//! 弹窗视图模块
//!
//! 流水线只通过[`PopupView`]接触界面：切换加载区/结果区、替换展示内容、
//! 报告错误。终端实现把这些操作映射为日志和标准输出。

// 标准库导入
use std::cell::Cell;

// 第三方crate导入
use tracing::{debug, info, warn};

// 本地模块导入
use crate::error::LookupError;

/// 弹窗界面接口
pub trait PopupView {
    /// 成对切换加载区与结果区的可见性
    fn toggle_busy(&self);

    /// 用新的内容替换展示区，空字符串表示清空
    fn show(&self, markup: &str);

    /// 展示一次查词失败
    fn report_error(&self, error: &LookupError);
}

/// 终端视图
#[derive(Debug, Default)]
pub struct TerminalView {
    loading: Cell<bool>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载区当前是否可见
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }
}

impl PopupView for TerminalView {
    fn toggle_busy(&self) {
        let loading = !self.loading.get();
        self.loading.set(loading);
        if loading {
            info!("⏳ 正在查询...");
        } else {
            debug!("查询结束，显示结果区");
        }
    }

    fn show(&self, markup: &str) {
        if markup.is_empty() {
            info!("🔍 未找到释义");
            return;
        }
        println!("{}", markup);
    }

    fn report_error(&self, error: &LookupError) {
        warn!("❌ 查询失败: {}", error);
    }
}
