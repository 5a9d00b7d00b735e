// 工具模块 - 通用辅助功能

pub mod random;

pub use random::RandomGenerator;
