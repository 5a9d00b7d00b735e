// 宿主数据类型
// 开发心理：宿主角色上的各种状态用值类型表达，进化搬运时整块读出、整块写入

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::pokemon::{FormId, ItemId, MoveId, StatBaseline};

/// 宿主角色句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapId(pub u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub map: MapId,
    pub cell: Cell,
}

impl Location {
    pub fn new(map: MapId, x: i32, z: i32) -> Self {
        Self { map, cell: Cell { x, z } }
    }
}

// 社交关系
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationKind {
    pub def_name: String,
    /// 对称关系（如 Bond）由宿主自动维护反向边
    pub reflexive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectRelation {
    pub kind: RelationKind,
    pub other: ActorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainableId(pub String);

impl TrainableId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeState {
    pub biological_ticks: i64,
    pub chronological_ticks: i64,
    pub birth_abs_ticks: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostilityResponse {
    Ignore,
    #[default]
    Flee,
    Attack,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicalCare {
    NoCare,
    NoMeds,
    HerbalOrWorse,
    #[default]
    NormalOrWorse,
    Best,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaId(pub u32);

/// 玩家为这只宝可梦配置的选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub released_on_death: bool,
    pub area_restriction: Option<AreaId>,
    pub display_order: i32,
    pub follow_drafted: bool,
    pub follow_fieldwork: bool,
    pub hostility_response: HostilityResponse,
    pub join_tick: i64,
    pub master: Option<ActorId>,
    pub medical_care: MedicalCare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorName {
    pub text: String,
    /// 宿主自动生成的编号名（如 "Pikachu 3"）
    pub numerical: bool,
}

impl ActorName {
    pub fn custom(text: impl Into<String>) -> Self {
        Self { text: text.into(), numerical: false }
    }

    pub fn numerical(text: impl Into<String>) -> Self {
        Self { text: text.into(), numerical: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records(pub BTreeMap<String, f32>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCondition {
    pub def_name: String,
    pub part: Option<String>,
    /// 植入物/义体，进化时要掉落成物品
    pub counts_as_implant: bool,
}

/// 宝可梦附加组件上的状态（亲密度、精灵球、能力值、招式、闪光、形态）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanionState {
    pub friendship: i32,
    pub max_friendship_notified: bool,
    pub ball: Option<ItemId>,
    pub stats: StatBaseline,
    pub unlocked_moves: Vec<MoveId>,
    pub shiny: bool,
    pub form: Option<FormId>,
}

/// 发给玩家的提示，`translation_key` 对应宿主的翻译键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LevelIncrease { level: u32 },
    LevelMilestone { label: String, level: u32 },
    Evolving { label: String },
    EverstonePreventsEvolution { label: String },
    StoppedEvolving { label: String },
    ScaredStoppedEvolving { label: String },
}

impl Notice {
    pub fn translation_key(&self) -> &'static str {
        match self {
            Notice::LevelIncrease { .. } => "PW_LevelIncrease",
            Notice::LevelMilestone { .. } => "PW_MessageLevelIncrease",
            Notice::Evolving { .. } => "PW_MessageEvolving",
            Notice::EverstonePreventsEvolution { .. } => "PW_MessageEverstonePreventsEvolution",
            Notice::StoppedEvolving { .. } => "PW_MessageStoppedEvolving",
            Notice::ScaredStoppedEvolving { .. } => "PW_MessageScaredStoppedEvolving",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LevelIncrease { level } => write!(f, "Lv. {}", level),
            Notice::LevelMilestone { label, level } => {
                write!(f, "{} reached level {}!", label, level)
            }
            Notice::Evolving { label } => write!(f, "What? {} is evolving!", label),
            Notice::EverstonePreventsEvolution { label } => {
                write!(f, "The everstone is keeping {} from evolving.", label)
            }
            Notice::StoppedEvolving { label } => write!(f, "{} stopped evolving.", label),
            Notice::ScaredStoppedEvolving { label } => {
                write!(f, "{} got scared and stopped evolving.", label)
            }
        }
    }
}
