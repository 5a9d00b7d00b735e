// 能力值数据
// 开发心理：进化时要把进化前的个体值/努力值/性格带到新个体上，由宿主重新按新种族计算
// 追踪器只搬运数据，自己不计算能力值

use serde::{Deserialize, Serialize};

/// 宿主统计项的键，对应宿主里的 StatDef 名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Attack,
    Defense,
}

impl StatKey {
    pub fn def_name(&self) -> &'static str {
        match self {
            StatKey::Attack => "PW_Attack",
            StatKey::Defense => "PW_Defense",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nature {
    #[default]
    Hardy, Lonely, Brave, Adamant, Naughty,
    Bold, Docile, Relaxed, Impish, Lax,
    Timid, Hasty, Serious, Jolly, Naive,
    Modest, Mild, Quiet, Bashful, Rash,
    Calm, Gentle, Sassy, Careful, Quirky,
}

/// 进化前个体的能力值基线
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBaseline {
    pub ivs: StatBlock,
    pub evs: StatBlock,
    pub nature: Nature,
}
