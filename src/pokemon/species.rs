// 宝可梦种族数据模块
// 开发心理：定义每个物种的等级/进化相关数据，对应宿主里 CompProperties 上的字段
// 设计原则：数据驱动、TOML 加载、定义顺序即进化规则顺序

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use super::{Evolution, ExpTable, KindId};
use crate::constants::{MAX_LEVEL, MIN_LEVEL};
use crate::core::{GameError, GameResult, PokeWorldSettings};
use crate::host::TrainableId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub kind: KindId,
    pub label: String,
    #[serde(default = "default_generation")]
    pub generation: u8,
    #[serde(default = "default_exp_category")]
    pub exp_category: String,
    #[serde(default = "default_level_min")]
    pub wild_level_min: u32,
    #[serde(default = "default_level_max")]
    pub wild_level_max: u32,
    #[serde(default = "default_true")]
    pub can_evolve: bool,
    #[serde(default = "default_true")]
    pub has_genders: bool,
    #[serde(default)]
    pub evolutions: Vec<Evolution>,
}

fn default_generation() -> u8 {
    1
}

fn default_exp_category() -> String {
    "MediumFast".to_string()
}

fn default_level_min() -> u32 {
    MIN_LEVEL
}

fn default_level_max() -> u32 {
    MIN_LEVEL
}

fn default_true() -> bool {
    true
}

impl SpeciesDef {
    pub fn new(kind: KindId, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            generation: default_generation(),
            exp_category: default_exp_category(),
            wild_level_min: MIN_LEVEL,
            wild_level_max: MIN_LEVEL,
            can_evolve: true,
            has_genders: true,
            evolutions: Vec::new(),
        }
    }
}

// 种族数据文件格式
#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    trainables: Vec<TrainableId>,
    #[serde(default)]
    species: Vec<SpeciesDef>,
}

/// 物种注册表，同时持有经验表和宿主的全部可训练项
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    species: IndexMap<KindId, SpeciesDef>,
    exp_table: ExpTable,
    trainables: Vec<TrainableId>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str, settings: &PokeWorldSettings) -> GameResult<Self> {
        let file: RegistryFile = toml::from_str(content)
            .map_err(|e| GameError::Data(format!("解析种族数据失败: {}", e)))?;

        let mut registry = Self {
            species: IndexMap::new(),
            exp_table: ExpTable::with_custom(&settings.exp_tables),
            trainables: file.trainables,
        };
        for def in file.species {
            registry.insert(def);
        }

        registry.validate()?;
        debug!("载入 {} 个物种", registry.len());
        Ok(registry)
    }

    pub fn load(path: &Path, settings: &PokeWorldSettings) -> GameResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content, settings)
    }

    pub fn insert(&mut self, def: SpeciesDef) {
        self.species.insert(def.kind.clone(), def);
    }

    pub fn set_exp_table(&mut self, table: ExpTable) {
        self.exp_table = table;
    }

    pub fn add_trainable(&mut self, trainable: TrainableId) {
        if !self.trainables.contains(&trainable) {
            self.trainables.push(trainable);
        }
    }

    pub fn get(&self, kind: &KindId) -> Option<&SpeciesDef> {
        self.species.get(kind)
    }

    pub fn require(&self, kind: &KindId) -> GameResult<&SpeciesDef> {
        self.get(kind).ok_or_else(|| GameError::Species(kind.to_string()))
    }

    pub fn exp_table(&self) -> &ExpTable {
        &self.exp_table
    }

    pub fn trainables(&self) -> &[TrainableId] {
        &self.trainables
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDef> {
        self.species.values()
    }

    pub fn validate(&self) -> GameResult<()> {
        for def in self.species.values() {
            if def.wild_level_min < MIN_LEVEL
                || def.wild_level_max > MAX_LEVEL
                || def.wild_level_min > def.wild_level_max
            {
                return Err(GameError::Data(format!(
                    "{} 的野生等级范围无效: {}-{}",
                    def.kind, def.wild_level_min, def.wild_level_max
                )));
            }

            if !self.exp_table.knows(&def.exp_category) {
                return Err(GameError::Data(format!(
                    "{} 使用了未知的经验类别 {}",
                    def.kind, def.exp_category
                )));
            }

            for evolution in &def.evolutions {
                if !self.species.contains_key(&evolution.target) {
                    return Err(GameError::Species(format!(
                        "{} 的进化目标 {} 不存在",
                        def.kind, evolution.target
                    )));
                }
                if let Some(level) = evolution.level_requirement() {
                    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
                        return Err(GameError::Data(format!(
                            "{} -> {} 的进化等级无效: {}",
                            def.kind, evolution.target, level
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
