// 错误处理系统
// 开发心理：统一的错误类型，只覆盖真正会失败的路径（配置、数据、存档、进化生成）
// 追踪器本身的常规分支（条件不满足、被否决）不是错误

use std::io;
use thiserror::Error;

// 模组主要错误类型
#[derive(Debug, Clone, Error)]
pub enum GameError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据错误: {0}")]
    Data(String),

    #[error("未知物种: {0}")]
    Species(String),

    #[error("生成失败: {0}")]
    Spawn(String),

    #[error("存档错误: {0}")]
    Save(String),

    #[error("文件错误: {0}")]
    Io(String),

    #[error("解析错误: {0}")]
    Parse(String),
}

pub type GameResult<T> = std::result::Result<T, GameError>;
pub type Result<T> = GameResult<T>;

// 错误转换实现
impl From<io::Error> for GameError {
    fn from(error: io::Error) -> Self {
        GameError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(error: serde_json::Error) -> Self {
        GameError::Parse(error.to_string())
    }
}

impl From<toml::de::Error> for GameError {
    fn from(error: toml::de::Error) -> Self {
        GameError::Parse(error.to_string())
    }
}
