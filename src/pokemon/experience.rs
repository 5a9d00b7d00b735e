// 经验曲线
// 开发心理：每个物种带一个经验类别字符串，按类别和当前等级查出升到下一级所需经验
// 内置六种成长曲线，设置里可以追加自定义表

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::constants::MAX_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpCategory {
    Fast,        // 800,000 exp to level 100
    MediumFast,  // 1,000,000 exp to level 100
    MediumSlow,  // 1,059,860 exp to level 100
    Slow,        // 1,250,000 exp to level 100
    Erratic,     // 600,000 exp to level 100
    Fluctuating, // 1,640,000 exp to level 100
}

impl ExpCategory {
    pub const ALL: [ExpCategory; 6] = [
        ExpCategory::Fast,
        ExpCategory::MediumFast,
        ExpCategory::MediumSlow,
        ExpCategory::Slow,
        ExpCategory::Erratic,
        ExpCategory::Fluctuating,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExpCategory::Fast => "Fast",
            ExpCategory::MediumFast => "MediumFast",
            ExpCategory::MediumSlow => "MediumSlow",
            ExpCategory::Slow => "Slow",
            ExpCategory::Erratic => "Erratic",
            ExpCategory::Fluctuating => "Fluctuating",
        }
    }

    /// 宽松匹配："Medium Fast"、"medium_fast"、"MediumFast" 都可以
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|category| category.name().to_ascii_lowercase() == normalized)
    }

    /// 达到某等级时的累计经验
    pub fn total_exp_at(&self, level: u32) -> i64 {
        if level <= 1 {
            return 0;
        }

        let n = level as i64;
        let cube = n * n * n;
        let total = match self {
            ExpCategory::Fast => 4 * cube / 5,
            ExpCategory::MediumFast => cube,
            ExpCategory::MediumSlow => 6 * cube / 5 - 15 * n * n + 100 * n - 140,
            ExpCategory::Slow => 5 * cube / 4,
            ExpCategory::Erratic => {
                if n < 50 {
                    cube * (100 - n) / 50
                } else if n < 68 {
                    cube * (150 - n) / 100
                } else if n < 98 {
                    cube * ((1911 - 10 * n) / 3) / 500
                } else {
                    cube * (160 - n) / 100
                }
            }
            ExpCategory::Fluctuating => {
                if n < 15 {
                    cube * ((n + 1) / 3 + 24) / 50
                } else if n < 36 {
                    cube * (n + 14) / 50
                } else {
                    cube * (n / 2 + 32) / 50
                }
            }
        };

        total.max(0)
    }
}

/// 经验表：内置曲线 + 自定义表
#[derive(Debug, Clone, Default)]
pub struct ExpTable {
    custom: HashMap<String, Vec<u32>>,
}

impl ExpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom(tables: &BTreeMap<String, Vec<u32>>) -> Self {
        let mut table = Self::new();
        for (name, levels) in tables {
            table.insert(name.clone(), levels.clone());
        }
        table
    }

    pub fn insert(&mut self, category: impl Into<String>, per_level: Vec<u32>) {
        self.custom.insert(category.into(), per_level);
    }

    pub fn knows(&self, category: &str) -> bool {
        self.custom.contains_key(category) || ExpCategory::from_name(category).is_some()
    }

    /// 从 level 升到 level+1 所需经验；满级返回 0
    pub fn exp_to_next_level(&self, category: &str, level: u32) -> u32 {
        if level >= MAX_LEVEL {
            return 0;
        }
        let level = level.max(1);

        if let Some(per_level) = self.custom.get(category) {
            // 表比等级短时沿用最后一项
            let index = (level as usize - 1).min(per_level.len().saturating_sub(1));
            return per_level.get(index).copied().unwrap_or(1).max(1);
        }

        let curve = ExpCategory::from_name(category).unwrap_or_else(|| {
            warn!("未知的经验类别 {}，按 MediumFast 处理", category);
            ExpCategory::MediumFast
        });

        let delta = curve.total_exp_at(level + 1) - curve.total_exp_at(level);
        u32::try_from(delta.max(1)).unwrap_or(u32::MAX)
    }
}
