use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 特别奖的等级编号,排序时优先级高于一等奖
pub const SPECIAL_LEVEL: i32 = 4;

/// 奖品配置
///
/// 概念说明:
/// - count: 该奖项的剩余库存,每次成功抽奖扣减 1,不允许为负
/// - level: 奖品等级,1/2/3 为一二三等奖,4 为特别奖
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub name: String,
    pub count: i64,
    pub level: i32,
}

impl Prize {
    /// 是否还有库存
    pub fn is_available(&self) -> bool {
        self.count > 0
    }

    /// 排序键:特别奖取 -1,排在所有数字等级之前
    pub fn sort_key(&self) -> i32 {
        if self.level == SPECIAL_LEVEL {
            -1
        } else {
            self.level
        }
    }

    /// 等级显示文案
    pub fn level_label(&self) -> String {
        match self.level {
            1 => "一等奖".to_string(),
            2 => "二等奖".to_string(),
            3 => "三等奖".to_string(),
            4 => "特别奖".to_string(),
            n => format!("{n}等奖"),
        }
    }
}

/// 新增奖品的请求(id 由服务端生成)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrize {
    pub name: String,
    pub count: i64,
    pub level: i32,
}

impl NewPrize {
    pub fn into_prize(self) -> Prize {
        Prize {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            count: self.count,
            level: self.level,
        }
    }
}

/// 抽奖顺序设置:决定下一件待抽奖品的选取策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawOrder {
    /// 从高到低:特别奖 > 一等 > 二等 > 三等
    #[default]
    LevelDesc,
    /// 从低到高:三等 > 二等 > 一等 > 特别奖
    LevelAsc,
    /// 在有库存的奖品里均匀随机
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prize(level: i32) -> Prize {
        Prize {
            id: level.to_string(),
            name: format!("prize-{level}"),
            count: 1,
            level,
        }
    }

    #[test]
    fn test_special_sorts_before_first() {
        assert_eq!(prize(4).sort_key(), -1);
        assert_eq!(prize(1).sort_key(), 1);
        assert!(prize(4).sort_key() < prize(1).sort_key());
    }

    #[test]
    fn test_level_label() {
        assert_eq!(prize(1).level_label(), "一等奖");
        assert_eq!(prize(2).level_label(), "二等奖");
        assert_eq!(prize(3).level_label(), "三等奖");
        assert_eq!(prize(4).level_label(), "特别奖");
    }

    #[test]
    fn test_is_available() {
        let mut p = prize(1);
        assert!(p.is_available());
        p.count = 0;
        assert!(!p.is_available());
    }

    #[test]
    fn test_draw_order_serde() {
        assert_eq!(
            serde_json::to_value(DrawOrder::LevelDesc).unwrap(),
            "level-desc"
        );
        let order: DrawOrder = serde_json::from_str("\"level-asc\"").unwrap();
        assert_eq!(order, DrawOrder::LevelAsc);
        assert_eq!(DrawOrder::default(), DrawOrder::LevelDesc);
    }
}
