use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinHandle, LocalSet};
use tracing::{error, info, warn};

use popup_dict::config::Cli;
use popup_dict::fetcher::HttpFetcher;
use popup_dict::input::{parse_line, Trigger};
use popup_dict::session::{Session, SubmitOutcome};
use popup_dict::stats::print_session_stats;
use popup_dict::utils::{init_logging, validate_term};
use popup_dict::view::TerminalView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    // 会话状态基于Rc，所有提交都在同一个线程的LocalSet中执行
    LocalSet::new().run_until(run(cli)).await
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.lookup_config();
    let fetcher = HttpFetcher::new(&config).context("初始化词典抓取器失败")?;
    let view = Rc::new(TerminalView::new());
    let session = Rc::new(
        Session::with_fetcher(fetcher, view, &config, cli.format).context("组装查词流水线失败")?,
    );

    if !cli.quiet {
        info!("🌐 词典地址: {} ({})", config.endpoint(), config.method());
    }

    let started = Instant::now();

    match &cli.word {
        Some(word) => {
            let term = validate_term(word)?;
            let outcome = session.submit(&term).await;

            if cli.stats {
                print_session_stats(&session.stats(), started.elapsed());
            }
            if let SubmitOutcome::Failed(status) = outcome {
                error!("❌ 查询失败: {} (状态码: {:?})", term, status);
                std::process::exit(1);
            }
        }
        None => {
            run_interactive(&session, started, cli.quiet).await?;
            if cli.stats {
                print_session_stats(&session.stats(), started.elapsed());
            }
        }
    }

    Ok(())
}

/// 交互模式：逐行读取标准输入，每个查询词在本地任务中提交
///
/// 前一个查询未完成时也可以继续提交新的查询词。
async fn run_interactive(session: &Rc<Session>, started: Instant, quiet: bool) -> Result<()> {
    if !quiet {
        info!("📖 输入单词查询，或输入 {{\"word\": \"...\"}} 消息；:stats 查看统计，:quit 退出");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<JoinHandle<SubmitOutcome>> = Vec::new();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("读取输入失败")?,
            _ = tokio::signal::ctrl_c() => {
                info!("👋 收到中断信号，退出");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        match parse_line(&line) {
            Ok(Some(Trigger::Submit(term))) => {
                let session = Rc::clone(session);
                pending.push(tokio::task::spawn_local(async move {
                    session.submit(&term).await
                }));
            }
            Ok(Some(Trigger::Stats)) => {
                print_session_stats(&session.stats(), started.elapsed());
            }
            Ok(Some(Trigger::Quit)) => break,
            Ok(None) => {}
            Err(e) => warn!("⚠️  忽略无法识别的输入: {}", e),
        }

        pending.retain(|handle| !handle.is_finished());
    }

    // 等待尚未完成的查询
    for result in join_all(pending).await {
        if let Err(e) = result {
            warn!("查询任务异常结束: {}", e);
        }
    }

    Ok(())
}
