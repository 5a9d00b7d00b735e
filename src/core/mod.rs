// 核心模块 - 错误类型与模组设置
// 开发心理：建立稳固的基础，为追踪器和宿主适配层提供统一的错误和配置

pub mod config;
pub mod error;

// 重新导出核心类型
pub use config::PokeWorldSettings;
pub use error::{GameError, GameResult, Result};
