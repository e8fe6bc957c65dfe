use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 抽奖参与者
///
/// `employee_id` 在当前名单内必须唯一,由写入方校验。
/// 序列化保持桌面端既有的 camelCase 字段名,与历史数据文件兼容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub department: String,
    pub employee_id: String,
}

/// 手工录入参与者的请求(id 由服务端生成)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    pub name: String,
    pub department: String,
    pub employee_id: String,
}

impl NewParticipant {
    pub fn into_participant(self) -> Participant {
        Participant {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            department: self.department,
            employee_id: self.employee_id,
        }
    }
}
