//! 释义抽取模块
//!
//! 在词典页面中定位释义容器，并把容器的前三个子元素依次交给
//! 基础信息、释义列表、词形变化三个子抽取器，合并成一条释义记录。

// 第三方crate导入
use markup5ever_rcdom::{Handle, RcDom};
use tracing::debug;

// 本地模块导入
use crate::defaults::page_layout;
use crate::html_processor::{
    attr, descendant_elements, element_children, find_all_by_tag, find_by_class, find_by_id,
    tag_name, text_content,
};
use crate::record::{PronounceEntry, Pronunciation, Translate, TranslationRecord, VariantForm};

/// 子抽取器：读取容器中的一个区块，产出局部记录
type SubExtractor = fn(&Handle) -> Option<TranslationRecord>;

/// 容器子元素按位置对应的子抽取器
const SUB_EXTRACTORS: [SubExtractor; 3] = [extract_basic, extract_translates, extract_variants];

/// 从页面中抽取释义记录
///
/// 找不到释义容器时返回`None`，表示该词没有可用的释义，并非错误。
pub fn extract(dom: &RcDom) -> Option<TranslationRecord> {
    let container = find_by_class(&dom.document, page_layout::DEFINITION_CONTAINER_CLASS)?;
    let sections = element_children(&container);
    debug!("释义容器包含 {} 个子区块", sections.len());

    let mut record = TranslationRecord::default();
    for (section, sub_extractor) in sections.iter().zip(SUB_EXTRACTORS) {
        if let Some(partial) = sub_extractor(section) {
            record.merge(partial);
        }
    }

    Some(record)
}

/// 基础信息：词头、语言、发音
fn extract_basic(section: &Handle) -> Option<TranslationRecord> {
    let mut record = TranslationRecord::default();

    if let Some(headword) = find_by_id(section, page_layout::HEADWORD_ID) {
        record.word = Some(text_content(&headword));
        record.lang = attr(&headword, page_layout::LANG_ATTR).or_else(|| {
            descendant_elements(&headword)
                .iter()
                .find_map(|el| attr(el, page_layout::LANG_ATTR))
        });
    }

    if let Some(block) = find_by_class(section, page_layout::PRONOUNCE_BLOCK_CLASS) {
        record.pronounces = Some(extract_pronunciation(&block));
    }

    Some(record)
}

/// 发音区块的子元素两两一组（音标 + 发音按钮），只取每组第一个元素的文本；
/// 没有子元素时整块文本作为自由格式的发音
fn extract_pronunciation(block: &Handle) -> Pronunciation {
    let children = element_children(block);
    if children.is_empty() {
        return Pronunciation::Text(text_content(block));
    }

    let entries = children
        .chunks(2)
        .map(|pair| PronounceEntry {
            locale: text_content(&pair[0]),
        })
        .collect();
    Pronunciation::Regions(entries)
}

/// 释义列表：每个`li`读取词性和释义
fn extract_translates(section: &Handle) -> Option<TranslationRecord> {
    let translates = find_all_by_tag(section, "li")
        .iter()
        .map(|item| Translate {
            pos: class_text(item, page_layout::POS_CLASS),
            def: class_text(item, page_layout::DEF_CLASS),
        })
        .collect();

    Some(TranslationRecord {
        translates: Some(translates),
        ..Default::default()
    })
}

/// 词形变化：标签`span`开启一组，随后的链接`a`填入该组的值
fn extract_variants(section: &Handle) -> Option<TranslationRecord> {
    let block = find_by_class(section, page_layout::VARIANT_BLOCK_CLASS)?;

    let mut variants: Vec<VariantForm> = Vec::new();
    let mut pending: Option<VariantForm> = None;
    for el in descendant_elements(&block) {
        match tag_name(&el).as_deref() {
            Some("span") => {
                if let Some(open) = pending.take() {
                    variants.push(open);
                }
                pending = Some(VariantForm {
                    kind: text_content(&el),
                    value: String::new(),
                });
            }
            Some("a") => {
                let mut form = pending.take().unwrap_or_else(|| VariantForm {
                    kind: String::new(),
                    value: String::new(),
                });
                form.value = text_content(&el);
                variants.push(form);
            }
            _ => {}
        }
    }
    if let Some(open) = pending {
        variants.push(open);
    }

    Some(TranslationRecord {
        variants: Some(variants),
        ..Default::default()
    })
}

fn class_text(node: &Handle, class: &str) -> String {
    find_by_class(node, class)
        .map(|el| text_content(&el))
        .unwrap_or_default()
}
