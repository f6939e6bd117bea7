//! Popup Dict - 划词词典核心库
//!
//! 提供词典页面抓取、释义抽取、会话缓存、去重提交和释义渲染等核心功能。

pub mod config;
pub mod defaults;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod html_processor;
pub mod input;
pub mod pipeline;
pub mod record;
pub mod renderer;
pub mod session;
pub mod stats;
pub mod utils;
pub mod view;

#[cfg(test)]
mod testing;
