use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::time::Duration;

use lottery_core::{
    config::Config,
    services::{DrawService, ParticipantService, PrizeService, WinnerService},
    state::AppState,
    storage::JsonStore,
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 恢复上次退出时的数据集合
    let store = JsonStore::new(&config.storage.data_dir);
    let state = AppState::load(&store).await.into_shared();

    // 创建服务
    let participant_service = ParticipantService::new(state.clone(), store.clone());
    let prize_service = PrizeService::new(state.clone(), store.clone());
    let winner_service = WinnerService::new(state.clone(), store.clone());
    let draw_service = DrawService::new(
        state.clone(),
        store.clone(),
        Duration::from_millis(config.draw.tick_interval_ms),
    );

    // 桌面前端在此之上接入各服务;这里输出启动概要
    log::info!(
        "Lottery core ready: {} participants, {} prizes remaining, {} winner records",
        participant_service.list_participants().await.len(),
        prize_service.remaining_total().await,
        winner_service.list_winners().await.len(),
    );
    if let Some(prize) = draw_service.next_prize().await {
        log::info!("Next prize up: {} ({})", prize.name, prize.level_label());
    }
}
