//! 端末表示用の整形

use idea_curator_common::{CurationStatus, DerivedIdea, HealthSnapshot, StatsSnapshot};
use std::collections::BTreeMap;

const TEXT_WIDTH: usize = 60;

/// アイデア1行分
pub fn idea_line(index: usize, idea: &DerivedIdea, status: Option<CurationStatus>) -> String {
    let mark = match status {
        Some(CurationStatus::Published) => "📢",
        Some(CurationStatus::Hold) => "⏸",
        Some(CurationStatus::Rejected) => "🚫",
        None => "  ",
    };
    let name = if idea.idea.service_name.is_empty() {
        "Untitled"
    } else {
        idea.idea.service_name.as_str()
    };
    format!(
        "{:>3}. {} [{}] {} (score: {:.2})  uid={}",
        index,
        mark,
        idea.grade(),
        name,
        idea.score(),
        idea.uid
    )
}

/// アイデア詳細（問題・コンセプト・バッチ）
pub fn idea_detail(idea: &DerivedIdea) -> Vec<String> {
    vec![
        format!("     問題: {}", truncate(&idea.idea.problem, TEXT_WIDTH)),
        format!("     コンセプト: {}", truncate(idea.idea.concept_text(), TEXT_WIDTH)),
        format!("     バッチ: {} ({})", idea.batch_id, idea.batch_ts),
    ]
}

/// "A:2 B:1 ?:1"
pub fn grade_distribution_line(dist: &BTreeMap<String, usize>) -> String {
    if dist.is_empty() {
        return "-".to_string();
    }
    dist.iter()
        .map(|(grade, count)| format!("{}:{}", grade, count))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn stats_lines(stats: &StatsSnapshot) -> Vec<String> {
    stats
        .entries()
        .into_iter()
        .map(|(key, value)| format!("  {}: {}", key, value))
        .collect()
}

pub fn health_lines(health: &HealthSnapshot) -> Vec<String> {
    vec![
        format!("  状態: {}", health.status),
        format!("  最終バッチ: {}", health.last_batch_id.as_deref().unwrap_or("-")),
        format!("  最終実行: {}", health.last_run_at.as_deref().unwrap_or("-")),
        format!("  稼働時間: {:.0}秒", health.uptime_sec),
    ]
}

/// 文字数で切り詰め
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}
