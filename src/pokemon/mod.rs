// 宝可梦系统模块 - 等级、经验与进化
// 开发心理：宝可梦附着在宿主的角色上，这里只持有模组自己的数据（种族定义、经验曲线、进化规则）
// 以及驱动进化的状态机，角色本身通过 host 模块的能力接口访问

pub mod evolution;
pub mod experience;
pub mod level_tracker;
pub mod species;
pub mod stats;
mod transplant;

// 重新导出主要类型
pub use evolution::{Evolution, EvolutionRequirement, OtherEvolutionRequirement, TimeOfDay};
pub use experience::{ExpCategory, ExpTable};
pub use level_tracker::{EvolutionCheck, LevelTracker, TickOutcome, TrackerCommand};
pub use species::{SpeciesDef, SpeciesRegistry};
pub use stats::{Nature, StatBaseline, StatBlock, StatKey};

use serde::{Deserialize, Serialize};
use std::fmt;

/// 物种（宿主里的 PawnKindDef）标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindId(pub String);

impl KindId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 道具定义标识（进化石、精灵球等）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// 招式标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub String);

/// 形态标识（地区形态等）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Genderless
    }
}
