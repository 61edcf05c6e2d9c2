//! 対話的レビューセッション
//!
//! スケジューラを動かしたまま、1行コマンドでキュレーションやフィルタ変更を行う。
//! 番号は直前に表示したフィルタ結果の並び（1始まり）。

use crate::dashboard::{CurationOutcome, Dashboard, ResetOutcome};
use crate::export::ClipboardSink;
use crate::notify::DialoguerConfirmer;
use crate::render;
use crate::scheduler::RefreshScheduler;
use anyhow::{anyhow, bail, Result};
use idea_curator_common::{CurationFilter, CurationStatus, DerivedIdea, FeedbackAction};
use std::sync::Arc;

const HELP: &str = "\
コマンド:
  (空行) / ls        一覧を再表示
  p|h|r <番号>       公開/保留/却下をトグル
  g [等級]           等級フィルタ（省略で解除）
  c [状態]           キュレーションフィルタ (all/uncurated/published/hold/rejected)
  s [文字列]         検索（省略で解除）
  f <番号> <種別> [コメント]  フィードバック (like/dislike/blacklist/comment)
  x                  公開アイデアをエクスポート
  stats              統計を表示
  refresh            今すぐ再取得
  reset              全キュレーション状態を初期化
  ?                  ヘルプ
  q                  終了";

const SHOW_LIMIT: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewCommand {
    Show,
    Curate { index: usize, status: CurationStatus },
    Grade(Option<String>),
    Curation(CurationFilter),
    Search(Option<String>),
    Feedback { index: usize, action: FeedbackAction, comment: Option<String> },
    Export,
    Stats,
    Refresh,
    Reset,
    Help,
    Quit,
}

/// 1行をコマンドに変換
pub fn parse_command(line: &str) -> Result<ReviewCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());

    let command = match head {
        "" | "ls" => ReviewCommand::Show,
        "p" | "h" | "r" => ReviewCommand::Curate {
            index: parse_index(rest)?,
            status: head.parse()?,
        },
        "g" => ReviewCommand::Grade(optional(rest)),
        "c" => ReviewCommand::Curation(rest.parse()?),
        "s" => ReviewCommand::Search(optional(rest)),
        "f" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let index = parse_index(parts.next().unwrap_or(""))?;
            let action = parts
                .next()
                .ok_or_else(|| anyhow!("フィードバック種別を指定してください"))?
                .parse()?;
            let comment = parts.next().map(str::trim).and_then(optional);
            ReviewCommand::Feedback { index, action, comment }
        }
        "x" => ReviewCommand::Export,
        "stats" => ReviewCommand::Stats,
        "refresh" => ReviewCommand::Refresh,
        "reset" => ReviewCommand::Reset,
        "?" | "help" => ReviewCommand::Help,
        "q" | "quit" | "exit" => ReviewCommand::Quit,
        other => bail!("不明なコマンド: {}（? でヘルプ）", other),
    };
    Ok(command)
}

fn parse_index(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("番号は1以上の整数で指定してください: {:?}", s),
    }
}

pub async fn run(
    dashboard: Dashboard,
    mut scheduler: RefreshScheduler,
    sink: Arc<dyn ClipboardSink>,
) -> Result<()> {
    scheduler.start()?;
    dashboard.wait_loaded().await;

    println!("{}\n", HELP);
    let mut shown = show(&dashboard).await;

    loop {
        let line = tokio::task::spawn_blocking(|| {
            dialoguer::Input::<String>::new()
                .with_prompt("review")
                .allow_empty(true)
                .interact_text()
        })
        .await??;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ReviewCommand::Show => {}
            ReviewCommand::Curate { index, status } => {
                let Some(idea) = pick(&shown, index) else { continue };
                match dashboard.set_curation(idea, status).await {
                    CurationOutcome::Ignored => println!("IDの無いアイデアはキュレーションできません"),
                    CurationOutcome::Applied(Some(s)) => println!("✔ {} → {}", idea.uid, s),
                    CurationOutcome::Applied(None) => println!("✔ {} → 未キュレーション", idea.uid),
                    CurationOutcome::Failed => {}
                }
            }
            ReviewCommand::Grade(grade) => dashboard.update_filters(|f| f.grade = grade).await,
            ReviewCommand::Curation(filter) => dashboard.update_filters(|f| f.curation = filter).await,
            ReviewCommand::Search(query) => dashboard.update_filters(|f| f.search = query).await,
            ReviewCommand::Feedback { index, action, comment } => {
                if let Some(idea) = pick(&shown, index) {
                    dashboard.feedback().send_feedback(idea, action, comment).await;
                }
                continue;
            }
            ReviewCommand::Export => {
                dashboard.exporter(Arc::clone(&sink)).copy_published_md().await;
                continue;
            }
            ReviewCommand::Stats => {
                dashboard.fetch_stats().await;
                if let Some(stats) = dashboard.stats().await {
                    println!("統計:");
                    render::stats_lines(&stats).iter().for_each(|l| println!("{}", l));
                }
                continue;
            }
            ReviewCommand::Refresh => {
                dashboard.fetch_all().await;
            }
            ReviewCommand::Reset => {
                if dashboard.reset_curation(&DialoguerConfirmer).await == ResetOutcome::Declined {
                    println!("キャンセルしました");
                }
            }
            ReviewCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ReviewCommand::Quit => break,
        }

        shown = show(&dashboard).await;
    }

    scheduler.stop();
    Ok(())
}

fn pick(shown: &[DerivedIdea], index: usize) -> Option<&DerivedIdea> {
    let idea = shown.get(index - 1);
    if idea.is_none() {
        println!("番号 {} は一覧にありません", index);
    }
    idea
}

/// 現在のフィルタ結果を表示して返す
async fn show(dashboard: &Dashboard) -> Vec<DerivedIdea> {
    let state = dashboard.snapshot().await;
    let ideas = state.filtered_ideas();

    println!(
        "\n📋 {}件 / 全{}件  等級分布: {}  公開:{} 保留:{} 却下:{}  フィルタ: 等級={} 状態={} 検索={}",
        ideas.len(),
        state.batches.idea_count(),
        render::grade_distribution_line(&state.grade_distribution()),
        state.curation.count(CurationStatus::Published),
        state.curation.count(CurationStatus::Hold),
        state.curation.count(CurationStatus::Rejected),
        state.filters.grade.as_deref().unwrap_or("-"),
        state.filters.curation,
        state.filters.search.as_deref().unwrap_or("-"),
    );
    for (i, idea) in ideas.iter().take(SHOW_LIMIT).enumerate() {
        println!("{}", render::idea_line(i + 1, idea, state.curation_of(idea)));
    }
    if ideas.len() > SHOW_LIMIT {
        println!("  …ほか{}件（フィルタで絞り込んでください）", ideas.len() - SHOW_LIMIT);
    }
    ideas
}
