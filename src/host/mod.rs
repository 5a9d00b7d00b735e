// 宿主能力接口
// 开发心理：模组不拥有角色对象，只通过一组窄接口读写宿主状态
// 角色能力按用途拆成四组，追踪器只依赖这些 trait，测试时可以整体替换成假对象

mod types;

pub use types::*;

use crate::core::{GameResult, PokeWorldSettings};
use crate::pokemon::{
    FormId, Gender, ItemId, KindId, LevelTracker, MoveId, SpeciesRegistry, StatBaseline, StatKey,
};

/// 角色的身份、位置与环境
pub trait Creature {
    fn id(&self) -> ActorId;
    fn kind(&self) -> &KindId;
    fn label(&self) -> String;
    fn faction(&self) -> Option<Faction>;
    fn location(&self) -> Location;
    fn gender(&self) -> Gender;
    fn set_gender(&mut self, gender: Gender);
    fn has_genders(&self) -> bool;
    fn stat_value(&self, stat: StatKey) -> f32;
    /// 所在地图的当地小时 (0-23)
    fn local_hour(&self) -> u8;
    /// 已被标记屠宰等待销毁，进化必须让路
    fn pending_destruction(&self) -> bool;

    fn is_player_owned(&self) -> bool {
        self.faction() == Some(Faction::Player)
    }
}

/// 宝可梦附加组件
pub trait Companion {
    fn level_tracker_mut(&mut self) -> Option<&mut LevelTracker>;
    fn companion(&self) -> CompanionState;
    fn friendship(&self) -> i32;
    fn increase_friendship_level_up(&mut self);
    fn set_friendship(&mut self, friendship: i32, max_friendship_notified: bool);
    fn set_ball(&mut self, ball: Option<ItemId>);
    fn copy_pre_evolution_stats(&mut self, baseline: &StatBaseline);
    /// 重新计算战斗能力值
    fn update_stats(&mut self);
    fn unlock_moves_from_pre_evolution(&mut self, moves: &[MoveId]);
    fn set_shiny(&mut self, shiny: bool);
    fn supports_forms(&self) -> bool;
    fn inherit_form(&mut self, form: &FormId);
}

/// 驯养相关：记录、年龄、训练、玩家设置、名字
pub trait Husbandry {
    fn records(&self) -> Records;
    fn set_records(&mut self, records: Records);
    fn age(&self) -> AgeState;
    fn set_age(&mut self, age: AgeState);
    fn can_be_trained(&self, trainable: &TrainableId) -> bool;
    fn has_learned(&self, trainable: &TrainableId) -> bool;
    fn is_wanted(&self, trainable: &TrainableId) -> bool;
    fn train(&mut self, trainable: &TrainableId);
    fn set_wanted_recursive(&mut self, trainable: &TrainableId, wanted: bool);
    fn player_settings(&self) -> Option<PlayerSettings>;
    fn set_player_settings(&mut self, settings: PlayerSettings);
    fn name(&self) -> Option<ActorName>;
    fn set_name(&mut self, name: ActorName);
}

/// 身体与物品
pub trait Body {
    fn reset_health(&mut self);
    fn health_conditions(&self) -> Vec<HealthCondition>;
    /// 把植入物类状态对应的物品生成在地上
    fn spawn_things_from_condition(&mut self, condition: &HealthCondition, at: Location);
    fn drop_inventory(&mut self, near: Location);
    fn drop_carried_thing(&mut self, near: Location);
    fn destroy(&mut self);
}

/// 完整的宿主角色
pub trait ActorHost: Creature + Companion + Husbandry + Body {}

impl<T: Creature + Companion + Husbandry + Body> ActorHost for T {}

/// 生成新角色（对应 PawnGenerator + GenSpawn）
pub trait ActorFactory<A: ActorHost> {
    /// 生成但不放入地图，新角色自带按物种初始化的等级追踪器
    fn generate(&mut self, kind: &KindId, faction: Option<Faction>) -> GameResult<A>;
    fn spawn(&mut self, actor: A, at: Location) -> ActorId;
}

/// 提示与特效
pub trait EventSink {
    fn throw_text(&mut self, at: Location, notice: &Notice);
    fn message(&mut self, about: ActorId, notice: &Notice);
    fn dust_puff(&mut self, at: Location, scale: f32);
}

/// 图鉴：记录玩家已获得的物种，重复登记无副作用
pub trait SpeciesLedger {
    fn add_caught(&mut self, kind: &KindId);
}

/// 角色间关系图
pub trait RelationGraph {
    fn direct_relations(&self, actor: ActorId) -> Vec<DirectRelation>;
    fn related_actors(&self, actor: ActorId) -> Vec<ActorId>;
    fn add_direct_relation(&mut self, from: ActorId, kind: &RelationKind, to: ActorId);
    fn clear_all_relations(&mut self, actor: ActorId);
}

/// 一次回调里追踪器可以使用的宿主服务
pub struct HostServices<'a, A: ActorHost> {
    pub factory: &'a mut dyn ActorFactory<A>,
    pub events: &'a mut dyn EventSink,
    pub ledger: &'a mut dyn SpeciesLedger,
    pub relations: &'a mut dyn RelationGraph,
    pub species: &'a SpeciesRegistry,
    pub settings: &'a PokeWorldSettings,
}
