// 进化搬运
// 开发心理：进化 = 生成新角色 + 把旧角色的状态一项不漏地搬过去 + 销毁旧角色
// 全部新角色先生成出来，任何一个失败都不动旧角色；搬运时关系列表先做快照再修改

use log::{debug, info, warn};

use super::{KindId, LevelTracker};
use crate::constants::{EVOLUTION_COMPLETE_PUFFS, EVOLUTION_COUNTDOWN_TICKS};
use crate::core::GameResult;
use crate::host::{ActorHost, ActorId, Faction, HostServices};

impl LevelTracker {
    /// 生成全部进化目标并销毁旧角色，返回新角色
    pub(crate) fn evolve<A: ActorHost>(
        &mut self,
        targets: &[KindId],
        actor: &mut A,
        services: &mut HostServices<'_, A>,
    ) -> GameResult<Vec<ActorId>> {
        let faction = actor.faction();
        let at = actor.location();

        let mut successors = Vec::with_capacity(targets.len());
        for kind in targets {
            match services.factory.generate(kind, faction) {
                Ok(successor) => successors.push(successor),
                Err(e) => {
                    warn!("{} -> {} 生成失败: {}", actor.kind(), kind, e);
                    self.cancel_evolution(false, &*actor, &mut *services.events);
                    return Err(e);
                }
            }
        }

        let mut spawned = Vec::with_capacity(successors.len());
        for mut successor in successors {
            self.copy_onto(&*actor, &mut successor, services);
            successor.reset_health();

            let kind = successor.kind().clone();
            spawned.push(services.factory.spawn(successor, at));
            if faction == Some(Faction::Player) {
                services.ledger.add_caught(&kind);
            }
        }

        actor.drop_inventory(at);
        actor.drop_carried_thing(at);
        for condition in actor.health_conditions() {
            if condition.counts_as_implant {
                actor.spawn_things_from_condition(&condition, at);
            }
        }

        for _ in 0..EVOLUTION_COMPLETE_PUFFS {
            services.events.dust_puff(at, services.settings.puff_scale);
        }

        let old = actor.id();
        services.relations.clear_all_relations(old);
        info!("{} 进化为 {:?}", actor.kind(), targets);
        actor.destroy();

        self.is_evolving = false;
        self.pending_evolutions.clear();
        self.evolution_countdown = EVOLUTION_COUNTDOWN_TICKS;
        Ok(spawned)
    }

    /// 把旧角色的状态复制到一个新角色上
    fn copy_onto<A: ActorHost>(&self, from: &A, to: &mut A, services: &mut HostServices<'_, A>) {
        let table = services.species.exp_table();
        let inherited = to
            .level_tracker_mut()
            .map(|tracker| tracker.inherit_progress(self, table))
            .is_some();
        if !inherited {
            warn!("{} 没有等级追踪器，跳过等级继承", to.kind());
        }

        let companion = from.companion();
        to.set_friendship(companion.friendship, companion.max_friendship_notified);
        to.set_ball(companion.ball.clone());
        to.copy_pre_evolution_stats(&companion.stats);
        to.update_stats();
        to.unlock_moves_from_pre_evolution(&companion.unlocked_moves);
        to.set_shiny(companion.shiny);
        if let Some(form) = &companion.form {
            if to.supports_forms() {
                to.inherit_form(form);
            }
        }

        if to.has_genders() {
            to.set_gender(from.gender());
        }
        to.set_records(from.records());
        transplant_relations(from.id(), to.id(), services);
        to.set_age(from.age());

        for trainable in services.species.trainables() {
            if !to.can_be_trained(trainable) {
                continue;
            }
            if from.has_learned(trainable) {
                to.train(trainable);
            }
            if from.is_wanted(trainable) {
                to.set_wanted_recursive(trainable, true);
            }
        }

        match from.player_settings() {
            Some(settings) => to.set_player_settings(settings),
            None => debug!("{} 没有玩家设置", from.kind()),
        }

        // 自动编号的名字不继承
        if let Some(name) = from.name().filter(|name| !name.numerical) {
            to.set_name(name);
        }
    }
}

fn transplant_relations<A: ActorHost>(old: ActorId, new: ActorId, services: &mut HostServices<'_, A>) {
    let relations = &mut *services.relations;
    relations.clear_all_relations(new);

    for relation in relations.direct_relations(old) {
        if relation.other == old || relation.other == new {
            continue;
        }
        relations.add_direct_relation(new, &relation.kind, relation.other);
    }

    // 其他角色指向旧角色的单向关系改指新角色；对称关系在上面已经由宿主补上反向边
    for other in relations.related_actors(old) {
        if other == old || other == new {
            continue;
        }
        for relation in relations.direct_relations(other) {
            if relation.other == old && !relation.kind.reflexive {
                relations.add_direct_relation(other, &relation.kind, new);
            }
        }
    }
}
