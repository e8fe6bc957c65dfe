use std::collections::HashSet;

use crate::error::{AppError, AppResult};
use crate::models::{NewParticipant, Participant};
use crate::state::SharedState;
use crate::storage::{JsonStore, keys};

/// 参与者名单管理
///
/// 所有写操作先校验、再修改内存集合、最后同步落盘;
/// 落盘失败只记录日志,不回滚内存状态。
#[derive(Clone)]
pub struct ParticipantService {
    state: SharedState,
    store: JsonStore,
}

impl ParticipantService {
    pub fn new(state: SharedState, store: JsonStore) -> Self {
        Self { state, store }
    }

    /// 批量导入参与者(整表替换)
    ///
    /// 批次内出现重复工号时整体拒绝,现有名单保持不变,
    /// 全部重复的工号汇总在一条错误信息里返回。
    pub async fn replace_participants(&self, list: Vec<Participant>) -> AppResult<()> {
        for p in &list {
            validate_required_fields(&p.name, &p.employee_id)?;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicated: Vec<String> = Vec::new();
        for p in &list {
            if !seen.insert(p.employee_id.as_str()) && !duplicated.contains(&p.employee_id) {
                duplicated.push(p.employee_id.clone());
            }
        }
        if !duplicated.is_empty() {
            return Err(AppError::DuplicateKey(format!(
                "Duplicate employee ids in import batch: {}",
                duplicated.join(", ")
            )));
        }

        let mut state = self.state.write().await;
        state.participants = list;
        log::info!("Imported {} participants", state.participants.len());
        self.sync(&state.participants).await;
        Ok(())
    }

    /// 手工新增一名参与者
    pub async fn add_participant(&self, new: NewParticipant) -> AppResult<Participant> {
        validate_required_fields(&new.name, &new.employee_id)?;

        let mut state = self.state.write().await;
        if state
            .participants
            .iter()
            .any(|p| p.employee_id == new.employee_id)
        {
            return Err(AppError::DuplicateKey(format!(
                "Employee id '{}' already exists",
                new.employee_id
            )));
        }

        let participant = new.into_participant();
        state.participants.push(participant.clone());
        self.sync(&state.participants).await;
        Ok(participant)
    }

    /// 编辑参与者,工号仍需在名单其余人员中唯一
    pub async fn edit_participant(&self, participant: Participant) -> AppResult<Participant> {
        validate_required_fields(&participant.name, &participant.employee_id)?;

        let mut state = self.state.write().await;
        let idx = state
            .participants
            .iter()
            .position(|p| p.id == participant.id)
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;

        if state
            .participants
            .iter()
            .any(|p| p.id != participant.id && p.employee_id == participant.employee_id)
        {
            return Err(AppError::DuplicateKey(format!(
                "Employee id '{}' already exists",
                participant.employee_id
            )));
        }

        state.participants[idx] = participant.clone();
        self.sync(&state.participants).await;
        Ok(participant)
    }

    pub async fn remove_participant(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let idx = state
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;
        state.participants.remove(idx);
        self.sync(&state.participants).await;
        Ok(())
    }

    pub async fn list_participants(&self) -> Vec<Participant> {
        self.state.read().await.participants.clone()
    }

    async fn sync(&self, participants: &Vec<Participant>) {
        if let Err(e) = self.store.save(keys::PARTICIPANTS, participants).await {
            log::error!("Failed to persist participants: {e}");
        }
    }
}

fn validate_required_fields(name: &str, employee_id: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Participant name is required".to_string(),
        ));
    }
    if employee_id.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Employee id is required".to_string(),
        ));
    }
    Ok(())
}
