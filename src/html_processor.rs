//! HTML处理模块
//!
//! 提供HTML解析以及抽取器所需的DOM查询工具：按class/id/标签查找、
//! 读取属性、读取规整后的文本

// 标准库导入
use std::sync::OnceLock;

// 第三方crate导入
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

// 本地模块导入
use crate::error::Result;

/// 将HTML字符串解析为DOM
pub fn parse_html(html: &str) -> Result<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| crate::lookup_error!(html_parse, format!("{:?}", e)))
}

/// 节点的标签名，非元素节点返回None
pub fn tag_name(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref().to_string()),
        _ => None,
    }
}

/// 读取元素属性
pub fn attr(node: &Handle, attr_name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 元素的class列表中是否包含给定class
pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// 直接子元素（跳过文本、注释节点），保持文档顺序
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// 按文档顺序（先序）列出所有后代元素，不含节点本身
pub fn descendant_elements(node: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut stack: Vec<Handle> = node.children.borrow().iter().rev().cloned().collect();

    while let Some(current) = stack.pop() {
        if matches!(current.data, NodeData::Element { .. }) {
            found.push(current.clone());
        }
        for child in current.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }

    found
}

/// 文档顺序下第一个满足条件的后代元素
pub fn find_first<F>(node: &Handle, predicate: F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    descendant_elements(node).into_iter().find(|el| predicate(el))
}

/// 按class查找第一个后代元素
pub fn find_by_class(node: &Handle, class: &str) -> Option<Handle> {
    find_first(node, |el| has_class(el, class))
}

/// 按id查找第一个后代元素
pub fn find_by_id(node: &Handle, id: &str) -> Option<Handle> {
    find_first(node, |el| attr(el, "id").as_deref() == Some(id))
}

/// 按标签名查找所有后代元素
pub fn find_all_by_tag(node: &Handle, tag: &str) -> Vec<Handle> {
    descendant_elements(node)
        .into_iter()
        .filter(|el| tag_name(el).as_deref() == Some(tag))
        .collect()
}

/// 节点下所有文本拼接后的结果，连续空白压缩为一个空格并去掉首尾空白
pub fn text_content(node: &Handle) -> String {
    let mut raw = String::new();
    collect_text(node, &mut raw);
    normalize_whitespace(&raw)
}

fn collect_text(node: &Handle, out: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
        NodeData::Element { ref name, .. }
            if matches!(name.local.as_ref(), "script" | "style") => {}
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

/// 压缩空白
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("静态正则表达式"));
    whitespace.replace_all(text.trim(), " ").into_owned()
}
