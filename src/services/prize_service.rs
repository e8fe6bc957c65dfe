use crate::error::{AppError, AppResult};
use crate::models::{DrawOrder, NewPrize, Prize, SPECIAL_LEVEL};
use crate::state::SharedState;
use crate::storage::{JsonStore, keys};

/// 奖品配置与抽奖顺序设置管理
///
/// 剩余奖品总数 `remaining_prizes` 随增删改同步维护,
/// 始终等于全部奖品 count 之和。
#[derive(Clone)]
pub struct PrizeService {
    state: SharedState,
    store: JsonStore,
}

impl PrizeService {
    pub fn new(state: SharedState, store: JsonStore) -> Self {
        Self { state, store }
    }

    pub async fn add_prize(&self, new: NewPrize) -> AppResult<Prize> {
        validate_prize(&new.name, new.count, new.level)?;

        let prize = new.into_prize();
        let mut state = self.state.write().await;
        state.remaining_prizes += prize.count;
        state.prizes.push(prize.clone());
        self.sync(&state.prizes).await;
        Ok(prize)
    }

    /// 编辑奖品,剩余总数按库存变化量调整
    pub async fn edit_prize(&self, prize: Prize) -> AppResult<Prize> {
        validate_prize(&prize.name, prize.count, prize.level)?;

        let mut state = self.state.write().await;
        let idx = state
            .prizes
            .iter()
            .position(|p| p.id == prize.id)
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?;

        let delta = prize.count - state.prizes[idx].count;
        state.remaining_prizes += delta;
        state.prizes[idx] = prize.clone();
        self.sync(&state.prizes).await;
        Ok(prize)
    }

    /// 删除奖品,剩余总数扣除该奖品的库存
    pub async fn remove_prize(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let idx = state
            .prizes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?;
        let removed = state.prizes.remove(idx);
        state.remaining_prizes -= removed.count;
        self.sync(&state.prizes).await;
        Ok(())
    }

    /// 按配置顺序返回奖品列表
    pub async fn list_prizes(&self) -> Vec<Prize> {
        self.state.read().await.prizes.clone()
    }

    /// 展示用排序:特别奖最前,其余按等级升序
    pub async fn list_prizes_by_level(&self) -> Vec<Prize> {
        let mut prizes = self.state.read().await.prizes.clone();
        prizes.sort_by_key(Prize::sort_key);
        prizes
    }

    pub async fn remaining_total(&self) -> i64 {
        self.state.read().await.remaining_prizes
    }

    /// 修改抽奖顺序设置,下一次选奖时生效
    pub async fn set_draw_order(&self, order: DrawOrder) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.draw_order = order;
        if let Err(e) = self.store.save(keys::DRAW_ORDER, &order).await {
            log::error!("Failed to persist draw order setting: {e}");
        }
        Ok(())
    }

    pub async fn draw_order(&self) -> DrawOrder {
        self.state.read().await.draw_order
    }

    async fn sync(&self, prizes: &Vec<Prize>) {
        if let Err(e) = self.store.save(keys::PRIZES, prizes).await {
            log::error!("Failed to persist prizes: {e}");
        }
    }
}

fn validate_prize(name: &str, count: i64, level: i32) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Prize name is required".to_string(),
        ));
    }
    if count < 0 {
        return Err(AppError::ValidationError(
            "Prize count must be non-negative".to_string(),
        ));
    }
    if !(1..=SPECIAL_LEVEL).contains(&level) {
        return Err(AppError::ValidationError(
            "Prize level must be between 1 and 4".to_string(),
        ));
    }
    Ok(())
}
