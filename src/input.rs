//! 输入解析模块
//!
//! 交互模式下每行输入可以是普通查询词、外部消息`{"word": "..."}`，
//! 或者以冒号开头的会话命令。空行等同于禁用提交，直接忽略。

// 第三方crate导入
use serde::Deserialize;

// 本地模块导入
use crate::error::Result;
use crate::utils::validate_term;

/// 外部消息：预填查询词并触发提交
#[derive(Debug, Deserialize)]
pub struct PrefillMessage {
    pub word: String,
}

/// 一行输入对应的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// 提交查询词
    Submit(String),
    /// 打印会话统计
    Stats,
    /// 退出
    Quit,
}

/// 解析一行输入，空行返回`Ok(None)`
pub fn parse_line(line: &str) -> Result<Option<Trigger>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    match line {
        ":q" | ":quit" | ":exit" => return Ok(Some(Trigger::Quit)),
        ":stats" => return Ok(Some(Trigger::Stats)),
        _ => {}
    }

    if line.starts_with('{') {
        let message: PrefillMessage = serde_json::from_str(line)
            .map_err(|e| crate::lookup_error!(input_validation, line, e))?;
        return Ok(validate_term(&message.word).ok().map(Trigger::Submit));
    }

    Ok(Some(Trigger::Submit(line.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;

    #[test]
    fn test_plain_term() {
        assert_eq!(
            parse_line("  hello world \n").unwrap(),
            Some(Trigger::Submit("hello world".to_string()))
        );
    }

    #[test]
    fn test_empty_line_ignored() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   \t").unwrap(), None);
    }

    #[test]
    fn test_prefill_message() {
        assert_eq!(
            parse_line(r#"{"word": " 测试 "}"#).unwrap(),
            Some(Trigger::Submit("测试".to_string()))
        );
        assert_eq!(parse_line(r#"{"word": ""}"#).unwrap(), None);
        assert!(matches!(
            parse_line(r#"{"text": "x"}"#),
            Err(LookupError::InputValidation { .. })
        ));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line(":quit").unwrap(), Some(Trigger::Quit));
        assert_eq!(parse_line(":stats").unwrap(), Some(Trigger::Stats));
    }
}
