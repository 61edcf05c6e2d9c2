use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use idea_curator_common::{CurationFilter, FeedbackAction};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idea-curator")]
#[command(about = "アイデアバッチのレビュー・キュレーションツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アイデア一覧をフィルタして表示
    List {
        /// 等級 (S/A/B/C/D)
        #[arg(short, long)]
        grade: Option<String>,

        /// キュレーション状態 (all/uncurated/published/hold/rejected)
        #[arg(short, long, default_value = "all")]
        curation: CurationFilter,

        /// サービス名・問題・コンセプトの部分一致検索
        #[arg(short, long)]
        search: Option<String>,

        /// バッチの日付 (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// 表示件数の上限
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// キュレーション統計を表示
    Stats,

    /// システムヘルスを表示
    Health,

    /// 公開済みアイデアをマークダウンで出力
    Export {
        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// アイデアにフィードバックを送信
    Feedback {
        /// アイデアのUID
        #[arg(required = true)]
        uid: String,

        /// like/dislike/blacklist/comment
        #[arg(required = true)]
        action: FeedbackAction,

        /// コメント
        #[arg(long)]
        comment: Option<String>,
    },

    /// 全キュレーション状態を初期化
    Reset {
        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 対話的レビュー（定期更新あり）
    Review {
        /// バッチの日付 (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// 出力ファイル（エクスポート時、省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
