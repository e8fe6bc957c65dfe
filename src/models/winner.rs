use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Participant, Prize};

/// 中奖记录(历史快照)
///
/// 姓名、部门、奖品名称等字段在记录生成时拷贝自当时的参与者与奖品,
/// 之后不随名单或奖品配置的修改而变化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRecord {
    pub participant_id: String,
    pub prize_id: String,
    pub prize_name: String,
    pub prize_level: i32,
    pub winner_name: String,
    pub winner_department: String,
    pub timestamp: DateTime<Utc>,
}

impl WinnerRecord {
    /// 以当前时间为中奖时间生成一条记录
    pub fn new(participant: &Participant, prize: &Prize) -> Self {
        WinnerRecord {
            participant_id: participant.id.clone(),
            prize_id: prize.id.clone(),
            prize_name: prize.name.clone(),
            prize_level: prize.level,
            winner_name: participant.name.clone(),
            winner_department: participant.department.clone(),
            timestamp: Utc::now(),
        }
    }
}
