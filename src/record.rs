//! 释义记录数据结构
//!
//! 抽取器的产出，也是缓存中唯一保存的值。字段缺失表示页面上没有对应数据，
//! 渲染时整块跳过。

use serde::Serialize;

/// 单个地区的发音
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PronounceEntry {
    pub locale: String,
}

/// 发音信息：多地区音标，或一整段自由文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Pronunciation {
    Text(String),
    Regions(Vec<PronounceEntry>),
}

impl Pronunciation {
    /// 合并为一行展示文本
    pub fn display_line(&self) -> String {
        match self {
            Pronunciation::Text(text) => text.clone(),
            Pronunciation::Regions(entries) => entries
                .iter()
                .map(|entry| entry.locale.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// 一条词性释义
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translate {
    pub pos: String,
    pub def: String,
}

/// 一条词形变化，如 `复数：` + `tests`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// 释义记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronounces: Option<Pronunciation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translates: Option<Vec<Translate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantForm>>,
}

impl TranslationRecord {
    /// 所有字段都缺失时视为空记录，不会被缓存
    pub fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.lang.is_none()
            && self.pronounces.is_none()
            && self.translates.is_none()
            && self.variants.is_none()
    }

    /// 合并另一份局部记录，对方已有的字段覆盖本方
    pub fn merge(&mut self, other: TranslationRecord) {
        if other.word.is_some() {
            self.word = other.word;
        }
        if other.lang.is_some() {
            self.lang = other.lang;
        }
        if other.pronounces.is_some() {
            self.pronounces = other.pronounces;
        }
        if other.translates.is_some() {
            self.translates = other.translates;
        }
        if other.variants.is_some() {
            self.variants = other.variants;
        }
    }
}
