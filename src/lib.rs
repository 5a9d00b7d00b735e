// 宝可梦世界进化模组库入口
// 开发心理：宿主引擎负责角色、地图和存档，这里只实现等级追踪和进化状态机
// 架构：宿主通过 host 模块的能力接口接入，追踪器本身不依赖任何引擎类型

// 核心模块
pub mod core;
pub mod utils;

// 宿主接口与宝可梦系统
pub mod host;
pub mod pokemon;
pub mod save;

#[cfg(test)]
mod testing;

// 重新导出核心类型
pub use core::{GameError, GameResult, PokeWorldSettings, Result};
pub use host::{ActorHost, ActorId, HostServices, Notice};
pub use pokemon::{
    Evolution, EvolutionCheck, KindId, LevelTracker, SpeciesDef, SpeciesRegistry, TickOutcome,
    TrackerCommand,
};
pub use save::{JsonScribe, Scribe, ScribeMode};

// 版本信息
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "pokeworld";

// 游戏常量
pub mod constants {
    pub const MAX_LEVEL: u32 = 100;
    pub const MIN_LEVEL: u32 = 1;

    // 进化过程
    pub const EVOLUTION_COUNTDOWN_TICKS: i32 = 300;
    pub const EVOLUTION_PULSE_TICKS: i32 = 60;
    pub const EVOLUTION_PULSE_PUFFS: u32 = 3;
    pub const EVOLUTION_COMPLETE_PUFFS: u32 = 10;

    // 每 10 级发一条消息
    pub const LEVEL_MILESTONE_INTERVAL: u32 = 10;

    // 白天 7:00-19:00
    pub const DAY_START_HOUR: u8 = 7;
    pub const NIGHT_START_HOUR: u8 = 19;
}

// 便利函数
pub fn init() -> Result<()> {
    install_logger("pokeworld=info")
}

/// 按设置里的日志级别初始化
pub fn init_with(settings: &PokeWorldSettings) -> Result<()> {
    install_logger(&format!("{}={}", NAME, settings.log_level))
}

fn install_logger(default_filter: &str) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(default_filter);

    // 宿主可能已经装好了日志器，重复初始化不算错误
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        log::debug!("日志系统已初始化: {}", e);
    }

    log::info!("宝可梦世界进化模组初始化完成 v{}", VERSION);
    Ok(())
}
