use crate::defaults::error_messages;
use crate::error::Result;

/// 初始化日志系统
///
/// 日志写到stderr，stdout只留给释义输出
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 校验查询词，去掉首尾空白后不能为空
pub fn validate_term(term: &str) -> Result<String> {
    let term = term.trim();
    if term.is_empty() {
        return Err(crate::lookup_error!(
            input_validation,
            term,
            error_messages::EMPTY_TERM
        ));
    }
    Ok(term.to_string())
}
