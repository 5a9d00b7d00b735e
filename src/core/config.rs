/*
* 开发心理过程：
* 1. 模组设置对应宿主里的 PokeWorld 设置面板，只保留追踪器真正读取的项
* 2. 世代开关：关闭的世代不会作为进化目标，也不显示不灭之石按钮
* 3. 自定义经验曲线表可以覆盖或补充内置的六种成长曲线
* 4. TOML 加载/保存，缺省字段全部走 serde 默认值，兼容旧配置文件
*/

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info};

use crate::core::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokeWorldSettings {
    /// 允许出现的世代，空表示全部允许
    pub allowed_generations: Vec<u8>,
    /// 进化烟尘特效的缩放
    pub puff_scale: f32,
    /// 日志级别，交给 `init` 使用
    pub log_level: String,
    /// 自定义经验曲线：第 i 项是从 i+1 级升到 i+2 级所需经验
    pub exp_tables: BTreeMap<String, Vec<u32>>,
}

impl Default for PokeWorldSettings {
    fn default() -> Self {
        Self {
            allowed_generations: Vec::new(),
            puff_scale: 2.0,
            log_level: "info".to_string(),
            exp_tables: BTreeMap::new(),
        }
    }
}

impl PokeWorldSettings {
    /// 世代开关
    pub fn generation_allowed(&self, generation: u8) -> bool {
        self.allowed_generations.is_empty() || self.allowed_generations.contains(&generation)
    }

    pub fn from_toml_str(content: &str) -> GameResult<Self> {
        let settings: PokeWorldSettings = toml::from_str(content)
            .map_err(|e| GameError::Config(format!("解析设置失败: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        if !path.exists() {
            info!("设置文件不存在，使用默认设置: {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        info!("成功加载设置文件: {:?}", path);
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> GameResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GameError::Config(format!("序列化设置失败: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        debug!("设置已保存到: {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.allowed_generations.contains(&0) {
            return Err(GameError::Config("世代编号从1开始".to_string()));
        }

        if !(self.puff_scale.is_finite() && self.puff_scale > 0.0) {
            return Err(GameError::Config("特效缩放必须为正数".to_string()));
        }

        for (name, table) in &self.exp_tables {
            if table.is_empty() {
                return Err(GameError::Config(format!("经验曲线 {} 为空", name)));
            }
            if table.contains(&0) {
                return Err(GameError::Config(format!("经验曲线 {} 含有0经验的等级", name)));
            }
        }

        Ok(())
    }
}
