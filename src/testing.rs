// 测试用宿主替身
// 开发心理：追踪器只认能力接口，测试里用内存假对象实现全部接口，并记录每一次调用

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::{GameError, GameResult, PokeWorldSettings};
use crate::host::*;
use crate::pokemon::{
    FormId, Gender, ItemId, KindId, LevelTracker, MoveId, SpeciesDef, SpeciesRegistry,
    StatBaseline, StatKey,
};
use crate::utils::RandomGenerator;

pub const SAMPLE_SPECIES: &str = r#"
    trainables = ["Obedience", "Release", "Rescue", "Haul"]

    [[species]]
    kind = "PW_Magikarp"
    label = "magikarp"
    exp_category = "Slow"
    can_evolve = false

    [[species]]
    kind = "PW_Charmander"
    label = "charmander"
    exp_category = "MediumSlow"
    wild_level_min = 2
    wild_level_max = 8

    [[species.evolutions]]
    target = "PW_Charmeleon"
    requirement = { level = 16 }

    [[species]]
    kind = "PW_Charmeleon"
    label = "charmeleon"
    exp_category = "MediumSlow"

    [[species.evolutions]]
    target = "PW_Charizard"
    requirement = { level = 36 }

    [[species]]
    kind = "PW_Charizard"
    label = "charizard"
    exp_category = "MediumSlow"
    can_evolve = false

    [[species]]
    kind = "PW_Wurmple"
    label = "wurmple"
    wild_level_min = 3
    wild_level_max = 3

    [[species.evolutions]]
    target = "PW_Silcoon"
    requirement = { level = 7 }

    [[species.evolutions]]
    target = "PW_Cascoon"
    requirement = { level = 7 }

    [[species]]
    kind = "PW_Silcoon"
    label = "silcoon"

    [[species]]
    kind = "PW_Cascoon"
    label = "cascoon"

    [[species]]
    kind = "PW_Tyrogue"
    label = "tyrogue"
    generation = 2
    wild_level_min = 10
    wild_level_max = 10

    [[species.evolutions]]
    target = "PW_Hitmonlee"
    requirement = { level = 20 }
    other_requirement = "attack"

    [[species.evolutions]]
    target = "PW_Hitmonchan"
    requirement = { level = 20 }
    other_requirement = "defense"

    [[species.evolutions]]
    target = "PW_Hitmontop"
    requirement = { level = 20 }
    other_requirement = "balanced"

    [[species]]
    kind = "PW_Hitmonlee"
    label = "hitmonlee"
    has_genders = false

    [[species]]
    kind = "PW_Hitmonchan"
    label = "hitmonchan"
    has_genders = false

    [[species]]
    kind = "PW_Hitmontop"
    label = "hitmontop"
    generation = 2
    has_genders = false

    [[species]]
    kind = "PW_Eevee"
    label = "eevee"
    wild_level_min = 5
    wild_level_max = 5

    [[species.evolutions]]
    target = "PW_Vaporeon"
    requirement = { item = "PW_WaterStone" }

    [[species.evolutions]]
    target = "PW_Flareon"
    requirement = { item = "PW_FireStone" }

    [[species.evolutions]]
    target = "PW_Espeon"
    requirement = { level = 2 }
    friendship = 220
    time_of_day = "day"

    [[species.evolutions]]
    target = "PW_Umbreon"
    requirement = { level = 2 }
    friendship = 220
    time_of_day = "night"

    [[species]]
    kind = "PW_Vaporeon"
    label = "vaporeon"
    can_evolve = false

    [[species]]
    kind = "PW_Flareon"
    label = "flareon"
    can_evolve = false

    [[species]]
    kind = "PW_Espeon"
    label = "espeon"
    generation = 2
    can_evolve = false

    [[species]]
    kind = "PW_Umbreon"
    label = "umbreon"
    generation = 2
    can_evolve = false

    [[species]]
    kind = "PW_Kirlia"
    label = "kirlia"
    generation = 3
    exp_category = "Slow"

    [[species.evolutions]]
    target = "PW_Gallade"
    requirement = { level = 30 }
    gender = "Male"

    [[species.evolutions]]
    target = "PW_Gardevoir"
    requirement = { level = 30 }

    [[species]]
    kind = "PW_Gallade"
    label = "gallade"
    generation = 4
    exp_category = "Slow"

    [[species]]
    kind = "PW_Gardevoir"
    label = "gardevoir"
    generation = 3
    exp_category = "Slow"

    [[species]]
    kind = "PW_Pikachu"
    label = "pikachu"

    [[species.evolutions]]
    target = "PW_Raichu"
    requirement = { item = "PW_ThunderStone" }

    [[species]]
    kind = "PW_Raichu"
    label = "raichu"
"#;

pub fn sample_registry() -> SpeciesRegistry {
    SpeciesRegistry::from_toml_str(SAMPLE_SPECIES, &PokeWorldSettings::default()).unwrap()
}

pub fn home() -> Location {
    Location::new(MapId(1), 10, 20)
}

/// 记录所有调用的假角色
#[derive(Debug, Clone)]
pub struct FakeActor {
    pub id: ActorId,
    pub kind: KindId,
    pub label: String,
    pub faction: Option<Faction>,
    pub location: Location,
    pub gender: Gender,
    pub has_genders: bool,
    pub attack: f32,
    pub defense: f32,
    pub hour: u8,
    pub marked_for_slaughter: bool,
    pub tracker: Option<LevelTracker>,

    pub companion: CompanionState,
    pub friendship_level_ups: u32,
    pub stat_updates: u32,
    pub supports_forms: bool,

    pub records: Records,
    pub age: AgeState,
    pub learned: HashSet<TrainableId>,
    pub wanted: HashSet<TrainableId>,
    pub untrainable: HashSet<TrainableId>,
    pub player_settings: Option<PlayerSettings>,
    pub name: Option<ActorName>,

    pub conditions: Vec<HealthCondition>,
    pub health_resets: u32,
    pub spawned_from_conditions: Vec<String>,
    pub dropped_inventory: bool,
    pub dropped_carried: bool,
    pub destroyed: bool,
}

impl FakeActor {
    pub fn new(id: ActorId, def: &SpeciesDef, faction: Option<Faction>) -> Self {
        Self {
            id,
            kind: def.kind.clone(),
            label: def.label.clone(),
            faction,
            location: home(),
            gender: if def.has_genders { Gender::Male } else { Gender::Genderless },
            has_genders: def.has_genders,
            attack: 50.0,
            defense: 50.0,
            hour: 12,
            marked_for_slaughter: false,
            tracker: None,
            companion: CompanionState { friendship: 70, ..CompanionState::default() },
            friendship_level_ups: 0,
            stat_updates: 0,
            supports_forms: true,
            records: Records::default(),
            age: AgeState::default(),
            learned: HashSet::new(),
            wanted: HashSet::new(),
            untrainable: HashSet::new(),
            player_settings: None,
            name: None,
            conditions: Vec::new(),
            health_resets: 0,
            spawned_from_conditions: Vec::new(),
            dropped_inventory: false,
            dropped_carried: false,
            destroyed: false,
        }
    }
}

impl Creature for FakeActor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn kind(&self) -> &KindId {
        &self.kind
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn faction(&self) -> Option<Faction> {
        self.faction
    }

    fn location(&self) -> Location {
        self.location
    }

    fn gender(&self) -> Gender {
        self.gender
    }

    fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    fn has_genders(&self) -> bool {
        self.has_genders
    }

    fn stat_value(&self, stat: StatKey) -> f32 {
        match stat {
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
        }
    }

    fn local_hour(&self) -> u8 {
        self.hour
    }

    fn pending_destruction(&self) -> bool {
        self.marked_for_slaughter
    }
}

impl Companion for FakeActor {
    fn level_tracker_mut(&mut self) -> Option<&mut LevelTracker> {
        self.tracker.as_mut()
    }

    fn companion(&self) -> CompanionState {
        self.companion.clone()
    }

    fn friendship(&self) -> i32 {
        self.companion.friendship
    }

    fn increase_friendship_level_up(&mut self) {
        self.friendship_level_ups += 1;
        self.companion.friendship += 1;
    }

    fn set_friendship(&mut self, friendship: i32, max_friendship_notified: bool) {
        self.companion.friendship = friendship;
        self.companion.max_friendship_notified = max_friendship_notified;
    }

    fn set_ball(&mut self, ball: Option<ItemId>) {
        self.companion.ball = ball;
    }

    fn copy_pre_evolution_stats(&mut self, baseline: &StatBaseline) {
        self.companion.stats = baseline.clone();
    }

    fn update_stats(&mut self) {
        self.stat_updates += 1;
    }

    fn unlock_moves_from_pre_evolution(&mut self, moves: &[MoveId]) {
        self.companion.unlocked_moves.extend_from_slice(moves);
    }

    fn set_shiny(&mut self, shiny: bool) {
        self.companion.shiny = shiny;
    }

    fn supports_forms(&self) -> bool {
        self.supports_forms
    }

    fn inherit_form(&mut self, form: &FormId) {
        self.companion.form = Some(form.clone());
    }
}

impl Husbandry for FakeActor {
    fn records(&self) -> Records {
        self.records.clone()
    }

    fn set_records(&mut self, records: Records) {
        self.records = records;
    }

    fn age(&self) -> AgeState {
        self.age
    }

    fn set_age(&mut self, age: AgeState) {
        self.age = age;
    }

    fn can_be_trained(&self, trainable: &TrainableId) -> bool {
        !self.untrainable.contains(trainable)
    }

    fn has_learned(&self, trainable: &TrainableId) -> bool {
        self.learned.contains(trainable)
    }

    fn is_wanted(&self, trainable: &TrainableId) -> bool {
        self.wanted.contains(trainable)
    }

    fn train(&mut self, trainable: &TrainableId) {
        self.learned.insert(trainable.clone());
    }

    fn set_wanted_recursive(&mut self, trainable: &TrainableId, wanted: bool) {
        if wanted {
            self.wanted.insert(trainable.clone());
        } else {
            self.wanted.remove(trainable);
        }
    }

    fn player_settings(&self) -> Option<PlayerSettings> {
        self.player_settings.clone()
    }

    fn set_player_settings(&mut self, settings: PlayerSettings) {
        self.player_settings = Some(settings);
    }

    fn name(&self) -> Option<ActorName> {
        self.name.clone()
    }

    fn set_name(&mut self, name: ActorName) {
        self.name = Some(name);
    }
}

impl Body for FakeActor {
    fn reset_health(&mut self) {
        self.conditions.clear();
        self.health_resets += 1;
    }

    fn health_conditions(&self) -> Vec<HealthCondition> {
        self.conditions.clone()
    }

    fn spawn_things_from_condition(&mut self, condition: &HealthCondition, _at: Location) {
        self.spawned_from_conditions.push(condition.def_name.clone());
    }

    fn drop_inventory(&mut self, _near: Location) {
        self.dropped_inventory = true;
    }

    fn drop_carried_thing(&mut self, _near: Location) {
        self.dropped_carried = true;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

pub struct FakeFactory {
    pub species: SpeciesRegistry,
    pub rng: RandomGenerator,
    pub next_id: u64,
    pub spawned: Vec<(FakeActor, Location)>,
    pub fail_on: Option<KindId>,
    /// 新生成的角色学不会这些训练项
    pub untrainable: HashSet<TrainableId>,
}

impl FakeFactory {
    pub fn new(species: SpeciesRegistry) -> Self {
        Self {
            species,
            rng: RandomGenerator::with_seed(7),
            next_id: 0,
            spawned: Vec::new(),
            fail_on: None,
            untrainable: HashSet::new(),
        }
    }
}

impl ActorFactory<FakeActor> for FakeFactory {
    fn generate(&mut self, kind: &KindId, faction: Option<Faction>) -> GameResult<FakeActor> {
        if self.fail_on.as_ref() == Some(kind) {
            return Err(GameError::Spawn(format!("无法生成 {}", kind)));
        }

        let def = self.species.require(kind)?;
        let tracker = LevelTracker::new(def, self.species.exp_table(), &mut self.rng);

        self.next_id += 1;
        let mut actor = FakeActor::new(ActorId(self.next_id), def, faction);
        actor.untrainable = self.untrainable.clone();
        actor.tracker = Some(tracker);
        Ok(actor)
    }

    fn spawn(&mut self, mut actor: FakeActor, at: Location) -> ActorId {
        let id = actor.id;
        actor.location = at;
        self.spawned.push((actor, at));
        id
    }
}

#[derive(Debug, Default)]
pub struct FakeEvents {
    pub texts: Vec<Notice>,
    pub messages: Vec<(ActorId, Notice)>,
    pub puffs: Vec<(Location, f32)>,
}

impl EventSink for FakeEvents {
    fn throw_text(&mut self, _at: Location, notice: &Notice) {
        self.texts.push(notice.clone());
    }

    fn message(&mut self, about: ActorId, notice: &Notice) {
        self.messages.push((about, notice.clone()));
    }

    fn dust_puff(&mut self, at: Location, scale: f32) {
        self.puffs.push((at, scale));
    }
}

#[derive(Debug, Default)]
pub struct FakeLedger {
    pub caught: HashSet<KindId>,
}

impl SpeciesLedger for FakeLedger {
    fn add_caught(&mut self, kind: &KindId) {
        self.caught.insert(kind.clone());
    }
}

/// 对称关系自动补反向边，和宿主一致
#[derive(Debug, Default)]
pub struct FakeRelations {
    pub edges: HashMap<ActorId, Vec<DirectRelation>>,
}

impl FakeRelations {
    pub fn has(&self, from: ActorId, def_name: &str, to: ActorId) -> bool {
        self.edges.get(&from).map_or(false, |list| {
            list.iter().any(|r| r.kind.def_name == def_name && r.other == to)
        })
    }

    fn push(&mut self, from: ActorId, kind: &RelationKind, to: ActorId) {
        let list = self.edges.entry(from).or_default();
        if !list.iter().any(|r| r.kind == *kind && r.other == to) {
            list.push(DirectRelation { kind: kind.clone(), other: to });
        }
    }
}

impl RelationGraph for FakeRelations {
    fn direct_relations(&self, actor: ActorId) -> Vec<DirectRelation> {
        self.edges.get(&actor).cloned().unwrap_or_default()
    }

    fn related_actors(&self, actor: ActorId) -> Vec<ActorId> {
        let mut related = BTreeSet::new();
        for (from, list) in &self.edges {
            for relation in list {
                if *from == actor {
                    related.insert(relation.other);
                } else if relation.other == actor {
                    related.insert(*from);
                }
            }
        }
        related.into_iter().collect()
    }

    fn add_direct_relation(&mut self, from: ActorId, kind: &RelationKind, to: ActorId) {
        self.push(from, kind, to);
        if kind.reflexive {
            self.push(to, kind, from);
        }
    }

    fn clear_all_relations(&mut self, actor: ActorId) {
        self.edges.remove(&actor);
        for list in self.edges.values_mut() {
            list.retain(|r| r.other != actor);
        }
    }
}

/// 一组假宿主服务
pub struct World {
    pub factory: FakeFactory,
    pub events: FakeEvents,
    pub ledger: FakeLedger,
    pub relations: FakeRelations,
    pub species: SpeciesRegistry,
    pub settings: PokeWorldSettings,
}

impl World {
    pub fn new(species: SpeciesRegistry) -> Self {
        Self {
            factory: FakeFactory::new(species.clone()),
            events: FakeEvents::default(),
            ledger: FakeLedger::default(),
            relations: FakeRelations::default(),
            species,
            settings: PokeWorldSettings::default(),
        }
    }

    /// 生成一只带追踪器的角色（不放进 spawned 列表）
    pub fn actor(&mut self, kind: &str, faction: Option<Faction>) -> FakeActor {
        self.factory.generate(&KindId::new(kind), faction).unwrap()
    }

    pub fn services(&mut self) -> HostServices<'_, FakeActor> {
        HostServices {
            factory: &mut self.factory,
            events: &mut self.events,
            ledger: &mut self.ledger,
            relations: &mut self.relations,
            species: &self.species,
            settings: &self.settings,
        }
    }
}
