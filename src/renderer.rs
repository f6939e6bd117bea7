//! 释义渲染模块
//!
//! 按固定顺序输出发音、释义、词形变化三个区块，字段缺失则整块跳过。
//! 页面文本一律经过转义后再写入HTML。

// 本地模块导入
use crate::config::OutputFormat;
use crate::record::TranslationRecord;

/// 按输出格式渲染
pub fn render(format: OutputFormat, record: Option<&TranslationRecord>) -> String {
    match format {
        OutputFormat::Html => render_html(record),
        OutputFormat::Text => render_plain(record),
        OutputFormat::Json => render_json(record),
    }
}

/// 渲染为HTML片段，记录为空时返回空字符串
pub fn render_html(record: Option<&TranslationRecord>) -> String {
    let Some(record) = record else {
        return String::new();
    };
    let mut blocks = Vec::new();

    if let Some(pronounces) = &record.pronounces {
        blocks.push(format!(
            "<div class=\"pronounce\">{}</div>",
            escape_html(&pronounces.display_line())
        ));
    }

    if let Some(translates) = &record.translates {
        let lines: String = translates
            .iter()
            .map(|t| {
                format!(
                    "<p><b>{}：</b> {}</p>",
                    escape_html(&t.pos),
                    escape_html(&t.def)
                )
            })
            .collect();
        blocks.push(format!("<div class=\"translates\">{}</div>", lines));
    }

    if let Some(variants) = &record.variants {
        let lines: String = variants
            .iter()
            .map(|v| format!("<p>{}{}</p>", escape_html(&v.kind), escape_html(&v.value)))
            .collect();
        blocks.push(format!("<div class=\"variants\">{}</div>", lines));
    }

    blocks.join("\n")
}

/// 渲染为终端纯文本，区块之间空一行
pub fn render_plain(record: Option<&TranslationRecord>) -> String {
    let Some(record) = record else {
        return String::new();
    };
    let mut blocks: Vec<String> = Vec::new();

    if let Some(pronounces) = &record.pronounces {
        blocks.push(pronounces.display_line());
    }
    if let Some(translates) = &record.translates {
        blocks.push(
            translates
                .iter()
                .map(|t| format!("**{}：** {}", t.pos, t.def))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    if let Some(variants) = &record.variants {
        blocks.push(
            variants
                .iter()
                .map(|v| format!("{}{}", v.kind, v.value))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    blocks.join("\n\n")
}

/// 渲染为JSON
pub fn render_json(record: Option<&TranslationRecord>) -> String {
    record
        .and_then(|r| serde_json::to_string_pretty(r).ok())
        .unwrap_or_default()
}

/// HTML转义
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PronounceEntry, Pronunciation, Translate, VariantForm};

    fn translate_only() -> TranslationRecord {
        TranslationRecord {
            translates: Some(vec![Translate {
                pos: "n.".to_string(),
                def: "a test".to_string(),
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_none_renders_empty() {
        assert_eq!(render_html(None), "");
        assert_eq!(render_plain(None), "");
        assert_eq!(render_json(None), "");
    }

    #[test]
    fn test_translation_block_only() {
        let record = translate_only();
        assert_eq!(render_plain(Some(&record)), "**n.：** a test");
        assert_eq!(
            render_html(Some(&record)),
            "<div class=\"translates\"><p><b>n.：</b> a test</p></div>"
        );
    }

    #[test]
    fn test_region_pronunciations_joined() {
        let record = TranslationRecord {
            pronounces: Some(Pronunciation::Regions(vec![
                PronounceEntry { locale: "UK".to_string() },
                PronounceEntry { locale: "US".to_string() },
            ])),
            ..Default::default()
        };
        assert_eq!(render_plain(Some(&record)), "UK; US");
        assert_eq!(
            render_html(Some(&record)),
            "<div class=\"pronounce\">UK; US</div>"
        );
    }

    #[test]
    fn test_blocks_in_fixed_order() {
        let mut record = translate_only();
        record.variants = Some(vec![VariantForm {
            kind: "复数：".to_string(),
            value: "tests".to_string(),
        }]);
        record.pronounces = Some(Pronunciation::Text("[test]".to_string()));

        assert_eq!(
            render_plain(Some(&record)),
            "[test]\n\n**n.：** a test\n\n复数：tests"
        );
    }

    #[test]
    fn test_page_text_is_escaped() {
        let record = TranslationRecord {
            translates: Some(vec![Translate {
                pos: "<img src=x onerror=alert(1)>".to_string(),
                def: "\"quoted\" & 'single'".to_string(),
            }]),
            ..Default::default()
        };
        let html = render_html(Some(&record));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp; &#39;single&#39;"));
    }

    #[test]
    fn test_json_format() {
        let json = render(OutputFormat::Json, Some(&translate_only()));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["translates"][0]["pos"], "n.");
        assert!(value.get("variants").is_none());
    }
}
