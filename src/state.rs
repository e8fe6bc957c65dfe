use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{DrawOrder, Participant, Prize, WinnerRecord};
use crate::storage::{JsonStore, keys};

/// 全部服务共享的应用状态句柄,读写都经过同一把锁
pub type SharedState = Arc<RwLock<AppState>>;

/// 应用内存状态
///
/// 持有参与者名单、奖品配置、抽奖顺序设置与中奖台账的权威副本,
/// `remaining_prizes` 为派生的剩余奖品总数,随各写操作同步维护。
/// 构造顺序:从存储恢复各集合 → 计算派生总数 → 通过服务暴露写接口。
#[derive(Debug, Default)]
pub struct AppState {
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub draw_order: DrawOrder,
    pub winners: Vec<WinnerRecord>,
    pub remaining_prizes: i64,
}

impl AppState {
    /// 从存储恢复上次退出时的状态
    pub async fn load(store: &JsonStore) -> Self {
        let participants: Vec<Participant> = store.load(keys::PARTICIPANTS).await;
        let prizes: Vec<Prize> = store.load(keys::PRIZES).await;
        let winners: Vec<WinnerRecord> = store.load(keys::WINNERS).await;
        let draw_order: DrawOrder = store.load(keys::DRAW_ORDER).await;
        let remaining_prizes = prizes.iter().map(|p| p.count).sum();

        AppState {
            participants,
            prizes,
            draw_order,
            winners,
            remaining_prizes,
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// 当前可参与抽奖的人员:名单里从未出现在中奖台账的参与者
    pub fn eligible_participants(&self) -> Vec<Participant> {
        let winner_ids: HashSet<&str> = self
            .winners
            .iter()
            .map(|w| w.participant_id.as_str())
            .collect();
        self.participants
            .iter()
            .filter(|p| !winner_ids.contains(p.id.as_str()))
            .cloned()
            .collect()
    }
}
