/*
* 开发心理过程：
* 1. 每只宝可梦一个等级追踪器：经验累积、连续升级、进化资格检查
* 2. 进化不是立即发生，而是进入 300 tick 的过渡期，期间可以被打断
* 3. 角色被标记屠宰（等待销毁）时，任何入口都不能开始进化，进行中的进化也要取消
* 4. 倒计时结束后把旧角色的全部状态搬到新生成的角色上（见 transplant 模块）
* 5. 追踪器不持有角色，每次回调由宿主把角色和服务一起传进来
*/

use log::{debug, warn};
use smallvec::SmallVec;

use super::{
    Evolution, EvolutionRequirement, ExpTable, ItemId, KindId, SpeciesDef, SpeciesRegistry, StatKey,
};
use crate::constants::{
    EVOLUTION_COUNTDOWN_TICKS, EVOLUTION_PULSE_PUFFS, EVOLUTION_PULSE_TICKS,
    LEVEL_MILESTONE_INTERVAL, MAX_LEVEL, MIN_LEVEL,
};
use crate::core::{GameResult, PokeWorldSettings};
use crate::host::{ActorHost, ActorId, Companion, Creature, EventSink, HostServices, Notice};
use crate::save::{Scribe, ScribeMode};
use crate::utils::RandomGenerator;

/// 升级后的进化检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvolutionCheck {
    AlreadyEvolving,
    /// 角色等待销毁
    Vetoed,
    NoMatch,
    /// 不灭之石阻止了进化
    BlockedByEverstone,
    Started(KindId),
}

/// 每 tick 的推进结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Progressing { remaining: i32 },
    Cancelled,
    /// 旧角色已销毁，返回新角色
    Evolved(Vec<ActorId>),
}

/// 玩家可用的操作按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    ToggleEverstone { active: bool },
    StopEvolution,
}

impl TrackerCommand {
    pub fn label_key(&self) -> &'static str {
        match self {
            TrackerCommand::ToggleEverstone { active: true } => "PW_TakeBackEverstone",
            TrackerCommand::ToggleEverstone { active: false } => "PW_GiveEverstone",
            TrackerCommand::StopEvolution => "PW_StopEvolution",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelTracker {
    pub(super) level: u32,
    pub(super) experience: u32,
    pub(super) exp_to_next_level: u32,
    pub(super) exp_category: String,
    pub(super) wild_level_min: u32,
    pub(super) wild_level_max: u32,
    pub(super) can_evolve: bool,
    pub(super) evolutions: Vec<Evolution>,
    pub(super) everstone_on: bool,
    pub(super) everstone_alert_pending: bool,
    pub(super) is_evolving: bool,
    pub(super) evolution_countdown: i32,
    pub(super) pending_evolutions: SmallVec<[KindId; 2]>,
}

impl LevelTracker {
    /// 按物种定义创建，初始等级在野生等级范围内随机
    pub fn new(species: &SpeciesDef, table: &ExpTable, rng: &mut RandomGenerator) -> Self {
        let level = rng
            .range_inclusive(species.wild_level_min, species.wild_level_max)
            .clamp(MIN_LEVEL, MAX_LEVEL);

        let mut tracker = Self {
            level,
            experience: 0,
            exp_to_next_level: 0,
            exp_category: species.exp_category.clone(),
            wild_level_min: species.wild_level_min,
            wild_level_max: species.wild_level_max,
            can_evolve: species.can_evolve,
            evolutions: species.evolutions.clone(),
            everstone_on: false,
            everstone_alert_pending: true,
            is_evolving: false,
            evolution_countdown: EVOLUTION_COUNTDOWN_TICKS,
            pending_evolutions: SmallVec::new(),
        };
        tracker.update_exp_to_next_level(table);
        tracker
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn exp_to_next_level(&self) -> u32 {
        self.exp_to_next_level
    }

    pub fn exp_category(&self) -> &str {
        &self.exp_category
    }

    pub fn wild_level_range(&self) -> (u32, u32) {
        (self.wild_level_min, self.wild_level_max)
    }

    pub fn can_evolve(&self) -> bool {
        self.can_evolve
    }

    pub fn evolutions(&self) -> &[Evolution] {
        &self.evolutions
    }

    pub fn everstone_on(&self) -> bool {
        self.everstone_on
    }

    pub fn is_evolving(&self) -> bool {
        self.is_evolving
    }

    pub fn evolution_countdown(&self) -> i32 {
        self.evolution_countdown
    }

    pub fn pending_evolutions(&self) -> &[KindId] {
        &self.pending_evolutions
    }

    /// 增加经验，返回升了几级
    pub fn increase_experience<A: ActorHost>(
        &mut self,
        amount: u32,
        actor: &mut A,
        services: &mut HostServices<'_, A>,
    ) -> u32 {
        if self.level >= MAX_LEVEL {
            self.level = MAX_LEVEL;
            self.experience = 0;
            return 0;
        }

        self.experience = self.experience.saturating_add(amount);
        self.try_gain_level(actor, services)
    }

    fn try_gain_level<A: ActorHost>(
        &mut self,
        actor: &mut A,
        services: &mut HostServices<'_, A>,
    ) -> u32 {
        if self.experience < self.exp_to_next_level {
            return 0;
        }

        let table = services.species.exp_table();
        let start_level = self.level;
        let player_owned = actor.is_player_owned();

        while self.experience >= self.exp_to_next_level {
            self.level += 1;

            if player_owned {
                actor.increase_friendship_level_up();
                services
                    .events
                    .throw_text(actor.location(), &Notice::LevelIncrease { level: self.level });
                if self.level % LEVEL_MILESTONE_INTERVAL == 0 {
                    services.events.message(
                        actor.id(),
                        &Notice::LevelMilestone { label: actor.label(), level: self.level },
                    );
                }
            }

            if self.level >= MAX_LEVEL {
                self.level = MAX_LEVEL;
                self.experience = 0;
                self.update_exp_to_next_level(table);
                break;
            }

            self.experience -= self.exp_to_next_level;
            self.update_exp_to_next_level(table);
        }

        debug!("{} 升级: {} -> {}", actor.kind(), start_level, self.level);
        actor.update_stats();

        if self.can_evolve && player_owned {
            self.try_evolve_after_level_up(&*actor, services);
        }

        self.level - start_level
    }

    pub fn update_exp_to_next_level(&mut self, table: &ExpTable) {
        self.exp_to_next_level = table.exp_to_next_level(&self.exp_category, self.level);
    }

    /// 按定义顺序检查等级进化规则，第一条满足的规则生效
    pub fn try_evolve_after_level_up<A: ActorHost>(
        &mut self,
        actor: &A,
        services: &mut HostServices<'_, A>,
    ) -> EvolutionCheck {
        if self.is_evolving {
            return EvolutionCheck::AlreadyEvolving;
        }
        if actor.pending_destruction() {
            return EvolutionCheck::Vetoed;
        }

        let Some(rule) = self
            .evolutions
            .iter()
            .find(|rule| self.level_rule_satisfied(rule, actor, services.species, services.settings))
        else {
            return EvolutionCheck::NoMatch;
        };
        let target = rule.target.clone();

        if self.everstone_on {
            if self.everstone_alert_pending {
                services.events.message(
                    actor.id(),
                    &Notice::EverstonePreventsEvolution { label: actor.label() },
                );
                self.everstone_alert_pending = false;
            }
            debug!("不灭之石阻止了 {} -> {}", actor.kind(), target);
            return EvolutionCheck::BlockedByEverstone;
        }

        self.pending_evolutions.push(target.clone());
        self.begin_evolution_process(actor, &mut *services.events);
        EvolutionCheck::Started(target)
    }

    fn level_rule_satisfied<A: Creature + Companion>(
        &self,
        rule: &Evolution,
        actor: &A,
        species: &SpeciesRegistry,
        settings: &PokeWorldSettings,
    ) -> bool {
        let EvolutionRequirement::Level(required) = rule.requirement else {
            return false;
        };

        if !target_generation_allowed(&rule.target, species, settings)
            || self.level < required
            || actor.friendship() < rule.friendship
            || !rule.gender_matches(actor.gender())
        {
            return false;
        }

        // 宿主的统计值是浮点数，按整数比较
        let attack = actor.stat_value(StatKey::Attack) as i32;
        let defense = actor.stat_value(StatKey::Defense) as i32;
        if !rule.other_requirement.satisfied(attack, defense) {
            return false;
        }

        rule.time_of_day.matches(actor.local_hour())
    }

    /// 使用道具进化；返回是否开始了进化，宿主只在开始时消耗道具
    pub fn try_evolve_with_item<A: Creature>(
        &mut self,
        item: &ItemId,
        actor: &A,
        events: &mut dyn EventSink,
    ) -> bool {
        if self.is_evolving || actor.pending_destruction() {
            return false;
        }

        let before = self.pending_evolutions.len();
        self.pending_evolutions.extend(
            self.evolutions
                .iter()
                .filter(|rule| rule.is_triggered_by(item))
                .map(|rule| rule.target.clone()),
        );
        if self.pending_evolutions.len() == before {
            return false;
        }

        self.begin_evolution_process(actor, events)
    }

    /// 开始进化过程（目标已经排进队列）
    pub fn begin_evolution_process<A: Creature>(
        &mut self,
        actor: &A,
        events: &mut dyn EventSink,
    ) -> bool {
        if self.is_evolving || actor.pending_destruction() {
            return false;
        }
        if self.pending_evolutions.is_empty() {
            warn!("{} 没有进化目标，不开始进化", actor.kind());
            return false;
        }

        events.message(actor.id(), &Notice::Evolving { label: actor.label() });
        self.is_evolving = true;
        self.evolution_countdown = EVOLUTION_COUNTDOWN_TICKS;
        debug!("{} 开始进化: {:?}", actor.kind(), self.pending_evolutions);
        true
    }

    /// 每 tick 调用一次
    pub fn level_tick<A: ActorHost>(
        &mut self,
        actor: &mut A,
        services: &mut HostServices<'_, A>,
    ) -> GameResult<TickOutcome> {
        if !self.is_evolving {
            return Ok(TickOutcome::Idle);
        }

        if actor.pending_destruction() {
            self.cancel_evolution(true, &*actor, &mut *services.events);
            return Ok(TickOutcome::Cancelled);
        }

        if self.evolution_countdown % EVOLUTION_PULSE_TICKS == 0 {
            let at = actor.location();
            for _ in 0..EVOLUTION_PULSE_PUFFS {
                services.events.dust_puff(at, services.settings.puff_scale);
            }
        }

        self.evolution_countdown -= 1;
        if self.evolution_countdown > 0 {
            return Ok(TickOutcome::Progressing { remaining: self.evolution_countdown });
        }

        self.is_evolving = false;
        let targets: Vec<KindId> = self.pending_evolutions.drain(..).collect();
        if targets.is_empty() {
            warn!("{} 倒计时结束但没有进化目标", actor.kind());
            self.cancel_evolution(false, &*actor, &mut *services.events);
            return Ok(TickOutcome::Cancelled);
        }

        let spawned = self.evolve(&targets, actor, services)?;
        self.evolution_countdown = EVOLUTION_COUNTDOWN_TICKS;
        Ok(TickOutcome::Evolved(spawned))
    }

    pub fn cancel_evolution<A: Creature>(
        &mut self,
        scared: bool,
        actor: &A,
        events: &mut dyn EventSink,
    ) {
        let label = actor.label();
        let notice = if scared {
            Notice::ScaredStoppedEvolving { label }
        } else {
            Notice::StoppedEvolving { label }
        };
        events.message(actor.id(), &notice);

        self.is_evolving = false;
        self.pending_evolutions.clear();
        self.evolution_countdown = EVOLUTION_COUNTDOWN_TICKS;
        debug!("{} 进化取消 (scared: {})", actor.kind(), scared);
    }

    /// 玩家可用的按钮，只对玩家的宝可梦显示
    pub fn commands<A: Creature>(
        &self,
        actor: &A,
        species: &SpeciesRegistry,
        settings: &PokeWorldSettings,
    ) -> Vec<TrackerCommand> {
        if !actor.is_player_owned() || !self.can_evolve {
            return Vec::new();
        }

        if self.is_evolving {
            return vec![TrackerCommand::StopEvolution];
        }

        let gender = actor.gender();
        let has_level_rule = self.evolutions.iter().any(|rule| {
            rule.level_requirement().is_some()
                && rule.gender_matches(gender)
                && target_generation_allowed(&rule.target, species, settings)
        });

        if has_level_rule {
            vec![TrackerCommand::ToggleEverstone { active: self.everstone_on }]
        } else {
            Vec::new()
        }
    }

    /// 切换不灭之石，返回切换后的状态；重新放上时再提醒一次
    pub fn toggle_everstone(&mut self) -> bool {
        if self.is_evolving {
            return self.everstone_on;
        }

        self.everstone_on = !self.everstone_on;
        if self.everstone_on {
            self.everstone_alert_pending = true;
        }
        self.everstone_on
    }

    /// 玩家手动停止进化
    pub fn stop_evolution<A: Creature>(&mut self, actor: &A, events: &mut dyn EventSink) -> bool {
        if !self.is_evolving {
            return false;
        }
        self.cancel_evolution(true, actor, events);
        true
    }

    /// 进化后的新角色继承等级进度
    pub(crate) fn inherit_progress(&mut self, from: &LevelTracker, table: &ExpTable) {
        self.level = from.level;
        self.experience = from.experience;
        self.everstone_on = from.everstone_on;
        self.update_exp_to_next_level(table);
    }

    /// 保存/加载
    pub fn expose_data(&mut self, scribe: &mut dyn Scribe) {
        scribe.look_u32("PW_experience", &mut self.experience, 0);
        scribe.look_u32("PW_totalExpForNextLevel", &mut self.exp_to_next_level, 1);
        scribe.look_u32("PW_level", &mut self.level, 1);
        scribe.look_bool("PW_flagEverstoneOn", &mut self.everstone_on, false);
        scribe.look_bool(
            "PW_flagEverstoneAlertEvolution",
            &mut self.everstone_alert_pending,
            true,
        );
        scribe.look_bool("PW_flagIsEvolving", &mut self.is_evolving, false);
        scribe.look_i32(
            "PW_evolutionCountDown",
            &mut self.evolution_countdown,
            EVOLUTION_COUNTDOWN_TICKS,
        );

        let mut kinds: Vec<String> = self
            .pending_evolutions
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect();
        scribe.look_strings("PW_evolutionDefList", &mut kinds);

        if scribe.mode() == ScribeMode::Loading {
            self.pending_evolutions = kinds.into_iter().map(KindId).collect();
            self.post_load();
        }
    }

    fn post_load(&mut self) {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            warn!("存档等级 {} 超出范围", self.level);
            self.level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        }
        if self.level == MAX_LEVEL {
            self.experience = 0;
        }

        if self.is_evolving && self.pending_evolutions.is_empty() {
            warn!("存档处于进化中但没有进化目标，重置进化状态");
            self.is_evolving = false;
            self.evolution_countdown = EVOLUTION_COUNTDOWN_TICKS;
        }
        // 未在进化时队列必须为空，否则下次进化会重复生成
        if !self.is_evolving {
            if !self.pending_evolutions.is_empty() {
                warn!("存档未在进化却留有进化目标，已丢弃");
                self.pending_evolutions.clear();
            }
            self.evolution_countdown = EVOLUTION_COUNTDOWN_TICKS;
        }
    }

    /// 加载完成后由宿主调用，按当前等级重算升级所需经验
    pub fn refresh_after_load(&mut self, table: &ExpTable) {
        let saved = self.exp_to_next_level;
        self.update_exp_to_next_level(table);
        if saved != self.exp_to_next_level {
            debug!("存档经验阈值 {} 已重算为 {}", saved, self.exp_to_next_level);
        }
    }
}

/// 世代开关；注册表里找不到的目标视为不可用
fn target_generation_allowed(
    target: &KindId,
    species: &SpeciesRegistry,
    settings: &PokeWorldSettings,
) -> bool {
    match species.get(target) {
        Some(def) => settings.generation_allowed(def.generation),
        None => {
            warn!("进化目标 {} 不在物种注册表中", target);
            false
        }
    }
}

impl std::fmt::Display for LevelTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lv.{} ({}/{})", self.level, self.experience, self.exp_to_next_level)?;
        if self.is_evolving {
            write!(f, " evolving in {}", self.evolution_countdown)?;
        }
        Ok(())
    }
}
