use anyhow::{bail, Context, Result};
use clap::Parser;
use gallery_sync::{cli, config, sync};
use cli::{Cli, Commands};
use config::Config;
use sync::{GallerySync, Scope, SyncOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Warn)
            .filter_module("gallery_sync", log::LevelFilter::Debug)
            .filter_module("gallery_sync_common", log::LevelFilter::Debug)
            .format_timestamp_secs()
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config_file = cli.config_file.as_deref();
    // config サブコマンドは新しい設定ファイルを作れるようにする
    let config = match &cli.command {
        Commands::Config { .. } => Config::load_or_default(config_file),
        _ => Config::load(config_file),
    }
    .context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Update { category, auto, dry_run } => {
            let options = SyncOptions {
                scope: category.map(Scope::Category).unwrap_or(Scope::All),
                auto,
                dry_run,
            };
            log::debug!("update: root={:?} options={:?}", cli.root, options);

            let report = GallerySync::new(&cli.root, config)
                .update(&options)
                .context("インデックスの更新に失敗しました")?;

            for line in report.summary(auto) {
                println!("{}", line);
            }
        }

        Commands::Check => {
            let report = GallerySync::new(&cli.root, config)
                .check()
                .context("インデックスの確認に失敗しました")?;

            for issue in &report.issues {
                println!("✖ {}", issue);
            }
            for pending in &report.pending {
                println!("+ {}: 未登録 {}枚 ({})", pending.category, pending.names.len(), pending.names.join(", "));
            }
            for entry in &report.stale {
                println!("- {}: {} はディスク上にありません", entry.category, entry.name);
            }
            for dir in &report.missing_dirs {
                println!("! カテゴリフォルダがありません: {}", dir);
            }
            for dir in &report.untracked_dirs {
                println!("? インデックスにないフォルダ: {}", dir);
            }
            println!(
                "未登録 {}枚 / 削除済み {}枚 / 不整合 {}件",
                report.pending_count(),
                report.stale.len(),
                report.issues.len()
            );

            if !report.is_consistent() {
                bail!("インデックスに不整合があります");
            }
        }

        Commands::Format { layout } => {
            let layout = layout.unwrap_or(config.layout);
            let backup = GallerySync::new(&cli.root, config)
                .reformat(layout)
                .context("インデックスの書き直しに失敗しました")?;
            println!("✔ {} 形式で書き直しました（バックアップ: {}）", layout, backup.display());
        }

        Commands::Config { set_host, show } => {
            let mut config = config;

            if let Some(host) = set_host {
                config.set_host(host, config_file)?;
                println!("✔ ホストを設定しました");
            }

            if show {
                println!("設定:");
                println!("  ホスト: {}", config.url_scheme().host());
                println!("  インデックス: {}", config.index_file);
                println!("  書式: {}", config.layout);
                println!("  拡張子: {}", config.extensions.join(", "));
                println!("  除外フォルダ: {}", config.excluded_dirs.join(", "));
            }
        }
    }

    Ok(())
}
