/*
* 开发心理过程：
* 1. 野生宝可梦的初始等级需要随机，测试里需要可重现
* 2. 包一层带种子的 StdRng，种子可取回便于复现问题
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 可重现的随机数生成器
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: StdRng,
    seed: u64,
}

impl RandomGenerator {
    /// 创建新的随机数生成器
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// 使用指定种子创建
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 生成指定范围的整数 [min, max] (包含max)
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}
