// 宝可梦进化规则
// 开发心理：进化条件按种族定义好顺序，追踪器按顺序逐条检查，先到先得
// 规则本身只描述条件，检查时需要的角色状态由追踪器从宿主读取

use serde::{Deserialize, Serialize};

use super::{Gender, ItemId, KindId};
use crate::constants::{DAY_START_HOUR, NIGHT_START_HOUR};

// 触发方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionRequirement {
    Level(u32),    // 升级时达到等级
    Item(ItemId),  // 使用道具
}

// 攻防比较条件（如 Tyrogue 的三分支）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherEvolutionRequirement {
    #[default]
    None,
    Attack,   // 攻击 > 防御
    Defense,  // 防御 > 攻击
    Balanced, // 攻击 == 防御
}

impl OtherEvolutionRequirement {
    pub fn satisfied(&self, attack: i32, defense: i32) -> bool {
        match self {
            OtherEvolutionRequirement::None => true,
            OtherEvolutionRequirement::Attack => attack > defense,
            OtherEvolutionRequirement::Defense => defense > attack,
            OtherEvolutionRequirement::Balanced => attack == defense,
        }
    }
}

// 时间段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Any,
    Day,   // 7:00-19:00
    Night, // 19:00-7:00
}

impl TimeOfDay {
    pub fn from_hour(hour: u8) -> Self {
        if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }

    pub fn matches(&self, hour: u8) -> bool {
        match self {
            TimeOfDay::Any => true,
            window => *window == TimeOfDay::from_hour(hour),
        }
    }
}

// 进化数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    pub target: KindId,
    pub requirement: EvolutionRequirement,
    #[serde(default)]
    pub friendship: i32,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub other_requirement: OtherEvolutionRequirement,
}

impl Evolution {
    pub fn by_level(target: KindId, level: u32) -> Self {
        Self {
            target,
            requirement: EvolutionRequirement::Level(level),
            friendship: 0,
            gender: None,
            time_of_day: TimeOfDay::Any,
            other_requirement: OtherEvolutionRequirement::None,
        }
    }

    pub fn by_item(target: KindId, item: ItemId) -> Self {
        Self {
            requirement: EvolutionRequirement::Item(item),
            ..Self::by_level(target, 0)
        }
    }

    pub fn level_requirement(&self) -> Option<u32> {
        match self.requirement {
            EvolutionRequirement::Level(level) => Some(level),
            EvolutionRequirement::Item(_) => None,
        }
    }

    pub fn is_triggered_by(&self, item: &ItemId) -> bool {
        matches!(&self.requirement, EvolutionRequirement::Item(required) if required == item)
    }

    /// 未指定性别的规则对所有个体生效
    pub fn gender_matches(&self, gender: Gender) -> bool {
        self.gender.map_or(true, |required| required == gender)
    }
}
