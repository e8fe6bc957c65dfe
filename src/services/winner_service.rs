use std::collections::HashSet;

use crate::error::{AppError, AppResult};
use crate::models::WinnerRecord;
use crate::state::SharedState;
use crate::storage::{JsonStore, keys};

/// 中奖台账(只追加)
///
/// 台账是"某人是否已中过奖"的唯一事实来源,独立于名单与奖品的
/// 存储键持久化。清空属于不可恢复操作,确认交互由展示层负责。
#[derive(Clone)]
pub struct WinnerService {
    state: SharedState,
    store: JsonStore,
}

impl WinnerService {
    pub fn new(state: SharedState, store: JsonStore) -> Self {
        Self { state, store }
    }

    /// 全部中奖记录,按中奖时间倒序;同一时刻的记录保持写入顺序
    pub async fn list_winners(&self) -> Vec<WinnerRecord> {
        let mut records = self.state.read().await.winners.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// 中过奖的参与者 id 集合,抽奖引擎以此计算资格
    pub async fn winner_ids(&self) -> HashSet<String> {
        self.state
            .read()
            .await
            .winners
            .iter()
            .map(|w| w.participant_id.clone())
            .collect()
    }

    /// 追加一条记录,只要求关键字段非空
    pub async fn append(&self, record: WinnerRecord) -> AppResult<()> {
        if record.participant_id.trim().is_empty() || record.prize_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "participantId and prizeId are required".to_string(),
            ));
        }
        let mut state = self.state.write().await;
        state.winners.push(record);
        self.sync(&state.winners).await;
        Ok(())
    }

    /// 清空全部中奖记录,之前被排除的参与者重新获得抽奖资格
    pub async fn clear(&self) -> AppResult<()> {
        let mut state = self.state.write().await;
        let removed = state.winners.len();
        state.winners.clear();
        self.sync(&state.winners).await;
        log::info!("Winner ledger cleared ({removed} records removed)");
        Ok(())
    }

    async fn sync(&self, winners: &Vec<WinnerRecord>) {
        if let Err(e) = self.store.save(keys::WINNERS, winners).await {
            log::error!("Failed to persist winner records: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, Prize};
    use crate::state::AppState;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn test_service() -> WinnerService {
        let store = JsonStore::new(
            std::env::temp_dir().join(format!("lottery-winners-test-{}", Uuid::new_v4())),
        );
        WinnerService::new(AppState::default().into_shared(), store)
    }

    fn record(participant_id: &str, prize_id: &str) -> WinnerRecord {
        let participant = Participant {
            id: participant_id.to_string(),
            name: format!("name-{participant_id}"),
            department: "技术部".to_string(),
            employee_id: format!("e-{participant_id}"),
        };
        let prize = Prize {
            id: prize_id.to_string(),
            name: format!("prize-{prize_id}"),
            count: 1,
            level: 1,
        };
        WinnerRecord::new(&participant, &prize)
    }

    #[tokio::test]
    async fn test_append_requires_key_fields() {
        let service = test_service();
        let mut bad = record("a", "p1");
        bad.participant_id = String::new();
        assert!(matches!(
            service.append(bad).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(service.list_winners().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_winners_newest_first() {
        let service = test_service();
        let mut first = record("a", "p1");
        first.timestamp = Utc::now() - Duration::minutes(5);
        let second = record("b", "p2");
        service.append(first).await.unwrap();
        service.append(second).await.unwrap();

        let winners = service.list_winners().await;
        assert_eq!(winners[0].participant_id, "b");
        assert_eq!(winners[1].participant_id, "a");
    }

    #[tokio::test]
    async fn test_list_winners_is_idempotent() {
        let service = test_service();
        service.append(record("a", "p1")).await.unwrap();
        service.append(record("b", "p1")).await.unwrap();
        assert_eq!(service.list_winners().await, service.list_winners().await);
    }

    #[tokio::test]
    async fn test_clear_restores_eligibility() {
        let state = AppState {
            participants: vec![
                Participant {
                    id: "a".to_string(),
                    name: "张三".to_string(),
                    department: "技术部".to_string(),
                    employee_id: "001".to_string(),
                },
                Participant {
                    id: "b".to_string(),
                    name: "李四".to_string(),
                    department: "市场部".to_string(),
                    employee_id: "002".to_string(),
                },
            ],
            ..Default::default()
        }
        .into_shared();
        let store = JsonStore::new(
            std::env::temp_dir().join(format!("lottery-winners-test-{}", Uuid::new_v4())),
        );
        let service = WinnerService::new(state.clone(), store);

        service.append(record("a", "p1")).await.unwrap();
        assert_eq!(state.read().await.eligible_participants().len(), 1);
        assert_eq!(service.winner_ids().await.len(), 1);

        service.clear().await.unwrap();
        assert!(service.list_winners().await.is_empty());
        assert_eq!(state.read().await.eligible_participants().len(), 2);
    }
}
