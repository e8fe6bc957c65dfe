use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult};
use crate::models::{DrawOrder, Participant, Prize, WinnerRecord};
use crate::state::SharedState;
use crate::storage::{JsonStore, keys};

/// 抽奖引擎
///
/// 每次抽奖会话对应一个 Idle → Selecting → Committing → Idle 周期,
/// 只针对一件奖品。Selecting 期间由后台滚动任务按固定间隔在候选名单
/// 中均匀采样,采样结果仅用于展示;stop 时先取消滚动任务并等待其退出,
/// 再对最后一次采样的候选人执行提交,库存扣减与台账追加在同一个
/// 临界区内完成。会话进行中再次 start 会直接报错,不排队。
#[derive(Clone)]
pub struct DrawService {
    state: SharedState,
    store: JsonStore,
    tick_interval: Duration,
    session: Arc<Mutex<Option<DrawSession>>>,
}

/// 进行中的抽奖会话:滚动任务句柄与最近一次采样的候选人
struct DrawSession {
    ticker: JoinHandle<()>,
    candidate_rx: watch::Receiver<Option<Participant>>,
}

impl DrawService {
    pub fn new(state: SharedState, store: JsonStore, tick_interval: Duration) -> Self {
        Self {
            state,
            store,
            tick_interval,
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// 开始抽奖 (Idle → Selecting)
    ///
    /// 要求至少有一名可抽人员和一件有库存的奖品,否则保持 Idle 并报错。
    pub async fn start(&self) -> AppResult<()> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            return Err(AppError::DrawInProgress);
        }

        let eligible = {
            let state = self.state.read().await;
            let eligible = state.eligible_participants();
            if eligible.is_empty() {
                return Err(AppError::NoEligibleParticipants);
            }
            if !state.prizes.iter().any(Prize::is_available) {
                return Err(AppError::NoPrizesRemaining);
            }
            eligible
        };

        let (tx, rx) = watch::channel(None);
        let interval = self.tick_interval;
        let ticker = tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);
            // interval 的首个 tick 立即完成,先消费掉,
            // 使第一次采样发生在一个完整间隔之后
            tick.tick().await;
            loop {
                tick.tick().await;
                let idx = rand::thread_rng().gen_range(0..eligible.len());
                if tx.send(Some(eligible[idx].clone())).is_err() {
                    break;
                }
            }
        });

        *session = Some(DrawSession {
            ticker,
            candidate_rx: rx,
        });
        log::info!("Draw session started");
        Ok(())
    }

    /// 当前滚动展示的候选人
    pub async fn current_candidate(&self) -> Option<Participant> {
        let session = self.session.lock().await;
        session.as_ref().and_then(|s| s.candidate_rx.borrow().clone())
    }

    pub async fn is_selecting(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// 停止抽奖并提交结果 (Selecting → Committing → Idle)
    ///
    /// 先取消滚动任务并等待其真正退出,之后才进入提交逻辑,
    /// 迟到的采样不可能再出现。从未采样到候选人(立即停止)或
    /// 引擎本就处于 Idle 时,不产生任何副作用,返回 None。
    pub async fn stop(&self) -> AppResult<Option<WinnerRecord>> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.take() else {
            return Ok(None);
        };

        session.ticker.abort();
        let _ = session.ticker.await;

        let candidate = session.candidate_rx.borrow().clone();
        match candidate {
            Some(candidate) => self.commit(candidate).await,
            None => Ok(None),
        }
    }

    /// 按当前配置返回下一件待抽奖品
    pub async fn next_prize(&self) -> Option<Prize> {
        let state = self.state.read().await;
        next_prize(&state.prizes, state.draw_order).cloned()
    }

    /// 当前可参与抽奖的人员
    pub async fn eligible_participants(&self) -> Vec<Participant> {
        self.state.read().await.eligible_participants()
    }

    /// 提交一次抽奖结果
    ///
    /// 目标奖品在此处按选奖算法重新解析:库存在 Selecting 期间
    /// 未变化时结果与开始时一致。扣减库存与追加台账记录同锁完成,
    /// 之后分别落盘;落盘失败只记录日志。
    async fn commit(&self, candidate: Participant) -> AppResult<Option<WinnerRecord>> {
        let mut state = self.state.write().await;

        // Selecting 期间名单或台账可能已变化,候选人失去资格则放弃提交
        let eligible: HashSet<String> = state
            .eligible_participants()
            .into_iter()
            .map(|p| p.id)
            .collect();
        if !eligible.contains(&candidate.id) {
            log::warn!("Draw candidate no longer eligible, commit skipped");
            return Ok(None);
        }

        let order = state.draw_order;
        let Some(prize) = next_prize(&state.prizes, order).cloned() else {
            // 奖品在 Selecting 期间被删除或抽完
            log::warn!("No prize remaining at commit time, commit skipped");
            return Ok(None);
        };

        if let Some(p) = state.prizes.iter_mut().find(|p| p.id == prize.id) {
            p.count -= 1;
        }
        state.remaining_prizes -= 1;

        let record = WinnerRecord::new(&candidate, &prize);
        state.winners.push(record.clone());

        if let Err(e) = self.store.save(keys::PRIZES, &state.prizes).await {
            log::error!("Failed to persist prizes: {e}");
        }
        if let Err(e) = self.store.save(keys::WINNERS, &state.winners).await {
            log::error!("Failed to persist winner records: {e}");
        }

        log::info!(
            "Draw committed: {} won {} ({})",
            record.winner_name,
            record.prize_name,
            prize.level_label()
        );
        Ok(Some(record))
    }
}

/// 选奖算法:在仍有库存的奖品里按配置顺序取下一件
///
/// level-desc: 特别奖(4) > 一等(1) > 二等(2) > 三等(3)
/// level-asc:  与上相反,特别奖排在最后
/// 同级奖品取先配置者;random 为均匀随机
fn next_prize(prizes: &[Prize], order: DrawOrder) -> Option<&Prize> {
    let available: Vec<&Prize> = prizes.iter().filter(|p| p.is_available()).collect();
    if available.is_empty() {
        return None;
    }

    match order {
        DrawOrder::Random => {
            let idx = rand::thread_rng().gen_range(0..available.len());
            Some(available[idx])
        }
        DrawOrder::LevelDesc => {
            let mut chosen = available[0];
            for &p in &available[1..] {
                if p.sort_key() < chosen.sort_key() {
                    chosen = p;
                }
            }
            Some(chosen)
        }
        DrawOrder::LevelAsc => {
            let mut chosen = available[0];
            for &p in &available[1..] {
                if p.sort_key() > chosen.sort_key() {
                    chosen = p;
                }
            }
            Some(chosen)
        }
    }
}
