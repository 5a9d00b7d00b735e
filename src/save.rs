// 存档系统 - 追踪器字段的保存和加载
// 开发心理：宿主按字段键读写存档，每个字段带一个稳定的键名和旧存档缺省时使用的默认值
// 同一个 expose 函数既负责保存也负责加载，由 Scribe 的模式决定方向

use log::warn;
use serde_json::{Map, Value};

use crate::core::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScribeMode {
    Saving,
    Loading,
}

/// 存档读写接口（宿主的 Scribe）
pub trait Scribe {
    fn mode(&self) -> ScribeMode;
    fn look_int(&mut self, key: &str, value: &mut i64, default: i64);
    fn look_bool(&mut self, key: &str, value: &mut bool, default: bool);
    fn look_strings(&mut self, key: &str, value: &mut Vec<String>);

    fn look_u32(&mut self, key: &str, value: &mut u32, default: u32) {
        let mut wide = i64::from(*value);
        self.look_int(key, &mut wide, i64::from(default));
        if self.mode() == ScribeMode::Loading {
            *value = u32::try_from(wide).unwrap_or_else(|_| {
                warn!("存档字段 {} 超出范围: {}，使用默认值", key, wide);
                default
            });
        }
    }

    fn look_i32(&mut self, key: &str, value: &mut i32, default: i32) {
        let mut wide = i64::from(*value);
        self.look_int(key, &mut wide, i64::from(default));
        if self.mode() == ScribeMode::Loading {
            *value = i32::try_from(wide).unwrap_or_else(|_| {
                warn!("存档字段 {} 超出范围: {}，使用默认值", key, wide);
                default
            });
        }
    }
}

/// 基于 JSON 对象的 Scribe 实现
#[derive(Debug, Clone)]
pub struct JsonScribe {
    mode: ScribeMode,
    node: Map<String, Value>,
}

impl JsonScribe {
    pub fn saving() -> Self {
        Self {
            mode: ScribeMode::Saving,
            node: Map::new(),
        }
    }

    pub fn loading(value: Value) -> GameResult<Self> {
        match value {
            Value::Object(node) => Ok(Self {
                mode: ScribeMode::Loading,
                node,
            }),
            other => Err(GameError::Save(format!("存档节点必须是对象: {}", other))),
        }
    }

    pub fn from_json_str(content: &str) -> GameResult<Self> {
        Self::loading(serde_json::from_str(content)?)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.node)
    }

    pub fn to_json_string(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(&self.node)?)
    }

    fn loaded(&self, key: &str) -> Option<&Value> {
        self.node.get(key).filter(|value| !value.is_null())
    }
}

impl Scribe for JsonScribe {
    fn mode(&self) -> ScribeMode {
        self.mode
    }

    fn look_int(&mut self, key: &str, value: &mut i64, default: i64) {
        match self.mode {
            ScribeMode::Saving => {
                self.node.insert(key.to_string(), Value::from(*value));
            }
            ScribeMode::Loading => {
                *value = match self.loaded(key) {
                    None => default,
                    Some(found) => found.as_i64().unwrap_or_else(|| {
                        warn!("存档字段 {} 不是整数: {}", key, found);
                        default
                    }),
                };
            }
        }
    }

    fn look_bool(&mut self, key: &str, value: &mut bool, default: bool) {
        match self.mode {
            ScribeMode::Saving => {
                self.node.insert(key.to_string(), Value::Bool(*value));
            }
            ScribeMode::Loading => {
                *value = match self.loaded(key) {
                    None => default,
                    Some(found) => found.as_bool().unwrap_or_else(|| {
                        warn!("存档字段 {} 不是布尔值: {}", key, found);
                        default
                    }),
                };
            }
        }
    }

    fn look_strings(&mut self, key: &str, value: &mut Vec<String>) {
        match self.mode {
            ScribeMode::Saving => {
                let list = value.iter().cloned().map(Value::String).collect();
                self.node.insert(key.to_string(), Value::Array(list));
            }
            ScribeMode::Loading => {
                value.clear();
                match self.loaded(key) {
                    None => {}
                    Some(Value::Array(items)) => {
                        for item in items {
                            match item.as_str() {
                                Some(text) => value.push(text.to_string()),
                                None => warn!("存档列表 {} 含有非字符串项: {}", key, item),
                            }
                        }
                    }
                    Some(found) => warn!("存档字段 {} 不是列表: {}", key, found),
                }
            }
        }
    }
}
