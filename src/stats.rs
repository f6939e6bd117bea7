use std::time::Duration;

use chrono::{DateTime, Local};

/// 会话统计
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub started_at: DateTime<Local>,
    pub submissions: usize,
    pub suppressed: usize,
    pub rendered: usize,
    pub cleared: usize,
    pub stale: usize,
    pub failures: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cached_terms: usize,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            started_at: Local::now(),
            submissions: 0,
            suppressed: 0,
            rendered: 0,
            cleared: 0,
            stale: 0,
            failures: 0,
            cache_hits: 0,
            cache_misses: 0,
            cached_terms: 0,
        }
    }
}

impl SessionStats {
    /// 缓存命中率，没有任何查询时返回None
    pub fn cache_hit_rate(&self) -> Option<f64> {
        let total = self.cache_hits + self.cache_misses;
        (total > 0).then(|| self.cache_hits as f64 / total as f64)
    }
}

/// 打印会话统计
pub fn print_session_stats(stats: &SessionStats, total_duration: Duration) {
    println!("\n📊 会话统计报告:");
    println!("═══════════════════════════════════════");
    println!(
        "🕒 开始时间: {}",
        stats.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("   会话时长: {}", format_duration(total_duration));

    println!("\n🔤 查询统计:");
    println!("   提交次数: {} 次", stats.submissions);
    println!("   重复拦截: {} 次", stats.suppressed);
    println!("   成功渲染: {} 次", stats.rendered);
    println!("   无释义: {} 次", stats.cleared);
    println!("   过期丢弃: {} 次", stats.stale);
    println!("   查询失败: {} 次", stats.failures);

    if let Some(hit_rate) = stats.cache_hit_rate() {
        println!("\n💾 缓存统计:");
        println!("   缓存命中: {} 次", stats.cache_hits);
        println!("   缓存未命中: {} 次", stats.cache_misses);
        println!("   已缓存词条: {} 个", stats.cached_terms);
        println!("   命中率: {:.1}%", hit_rate * 100.0);
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
