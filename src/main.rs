use anyhow::{bail, Result};
use clap::Parser;
use idea_curator::backend::HttpBackend;
use idea_curator::cli::{Cli, Commands};
use idea_curator::config::Config;
use idea_curator::dashboard::{Dashboard, ResetOutcome};
use idea_curator::export::{ClipboardSink, FileSink, StdoutSink};
use idea_curator::notify::{AssumeYes, Confirmer, ConsoleNotifier, DialoguerConfirmer};
use idea_curator::scheduler::RefreshScheduler;
use idea_curator::{logging, render, review};
use idea_curator_common::FilterCriteria;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    let base_url = cli.url.clone().unwrap_or_else(|| config.base_url());
    let backend = HttpBackend::new(base_url, config.request_timeout())?;
    let dashboard = Dashboard::new(Arc::new(backend), Arc::new(ConsoleNotifier), config.uid_fallback);

    match cli.command {
        Commands::List { grade, curation, search, date, limit } => {
            dashboard.set_date_filter(date).await;
            dashboard.set_filters(FilterCriteria { grade, curation, search }).await;

            let report = dashboard.fetch_all().await;
            if !report.batches_ok {
                bail!("バッチを取得できませんでした");
            }

            let state = dashboard.snapshot().await;
            let ideas = state.filtered_ideas();
            println!(
                "📋 {}件 / 全{}件（{}バッチ）",
                ideas.len(),
                state.batches.idea_count(),
                state.batches.len()
            );
            println!("等級分布: {}\n", render::grade_distribution_line(&state.grade_distribution()));

            for (i, idea) in ideas.iter().take(limit.unwrap_or(usize::MAX)).enumerate() {
                println!("{}", render::idea_line(i + 1, idea, state.curation_of(idea)));
                if cli.verbose {
                    render::idea_detail(idea).iter().for_each(|l| println!("{}", l));
                }
            }
        }

        Commands::Stats => {
            if !dashboard.fetch_stats().await {
                bail!("統計を取得できませんでした");
            }
            if let Some(stats) = dashboard.stats().await {
                println!("キュレーション統計:");
                render::stats_lines(&stats).iter().for_each(|l| println!("{}", l));
            }
        }

        Commands::Health => {
            if !dashboard.fetch_health().await {
                bail!("ヘルス情報を取得できませんでした");
            }
            if let Some(health) = dashboard.health().await {
                println!("システムヘルス:");
                render::health_lines(&health).iter().for_each(|l| println!("{}", l));
            }
        }

        Commands::Export { output } => {
            if dashboard.exporter(sink_for(output)).copy_published_md().await.is_none() {
                bail!("エクスポートできませんでした");
            }
        }

        Commands::Feedback { uid, action, comment } => {
            if !dashboard.fetch_batches().await {
                bail!("バッチを取得できませんでした");
            }
            let Some(idea) = dashboard.find_idea(&uid).await else {
                bail!("アイデアが見つかりません: {}", uid);
            };
            if !dashboard.feedback().send_feedback(&idea, action, comment).await {
                bail!("フィードバックを送信できませんでした");
            }
        }

        Commands::Reset { yes } => {
            let confirmer: Box<dyn Confirmer> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(DialoguerConfirmer)
            };
            match dashboard.reset_curation(confirmer.as_ref()).await {
                ResetOutcome::Cleared => {}
                ResetOutcome::Declined => println!("キャンセルしました"),
                ResetOutcome::Failed => bail!("初期化できませんでした"),
            }
        }

        Commands::Review { date, output } => {
            dashboard.set_date_filter(date).await;
            let scheduler = RefreshScheduler::new(dashboard.clone(), config.refresh_interval())
                .with_overlap(config.overlap)
                .with_health_interval(config.health_interval());
            review::run(dashboard, scheduler, sink_for(output)).await?;
        }

        Commands::Config { set_url, show } => {
            if let Some(url) = set_url {
                config.set_base_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  バックエンドURL: {}", config.base_url());
                println!("  更新間隔: {}秒", config.refresh_interval_secs);
                match config.health_interval_secs {
                    Some(secs) => println!("  ヘルス確認間隔: {}秒", secs),
                    None => println!("  ヘルス確認間隔: 無効"),
                }
                println!("  タイムアウト: {}秒", config.request_timeout_secs);
                println!("  重複更新: {:?}", config.overlap);
                println!("  UID生成: {}", config.uid_fallback);
            }
        }
    }

    Ok(())
}

fn sink_for(output: Option<PathBuf>) -> Arc<dyn ClipboardSink> {
    match output {
        Some(path) => Arc::new(FileSink::new(path)),
        None => Arc::new(StdoutSink),
    }
}
