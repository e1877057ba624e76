//! Live actor collection
//!
//! Insertion order is iteration order. Removal never happens mid-pass: the
//! update pass marks actors off-screen, then a single compaction keeps the
//! survivors in their original relative order.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{
    Actor, ActorId, ActorKind, AllyShip, AllySpec, Arena, Color, HostileShip, PlayerShip,
};
use super::aim::AimVector;
use crate::config::GameConfig;
use crate::error::GameError;

/// What one `tick` changed, for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub removed: usize,
    pub spawned: usize,
}

#[derive(Debug, Clone)]
pub struct Population {
    actors: Vec<Actor>,
    player_id: ActorId,
    next_id: ActorId,
    /// Minimum live non-player ships
    floor: usize,
    paused: bool,
    rng: Pcg32,
}

impl Population {
    /// Player ship plus a random number of hostiles in the configured range
    pub fn new(config: &GameConfig, arena: &Arena) -> Self {
        let mut population = Self::with_player(config, arena);
        let count = population
            .rng
            .random_range(config.initial_hostiles_min..=config.initial_hostiles_max);
        for _ in 0..count {
            population.spawn_hostile(arena);
        }
        log::info!("Population ready: player + {count} hostiles");
        population
    }

    /// Only the player ship, no hostiles yet
    pub fn with_player(config: &GameConfig, arena: &Arena) -> Self {
        let mut population = Self {
            actors: Vec::new(),
            player_id: 0,
            next_id: 1,
            floor: config.min_ships,
            paused: false,
            rng: Pcg32::seed_from_u64(config.seed),
        };
        let id = population.next_actor_id();
        population.player_id = id;
        population.actors.push(Actor::new(
            id,
            ActorKind::Player(PlayerShip::new(arena.center())),
        ));
        population
    }

    fn next_actor_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an actor, inheriting the current pause state
    fn push(&mut self, kind: ActorKind) -> ActorId {
        let id = self.next_actor_id();
        let mut actor = Actor::new(id, kind);
        actor.set_paused(self.paused);
        self.actors.push(actor);
        id
    }

    pub fn push_hostile(&mut self, ship: HostileShip) -> ActorId {
        self.push(ActorKind::Hostile(ship))
    }

    pub fn spawn_hostile(&mut self, arena: &Arena) -> ActorId {
        let ship = HostileShip::spawn(&mut self.rng, arena);
        self.push_hostile(ship)
    }

    /// Add a support ship. Safe between ticks; it moves from the next tick on.
    pub fn add_ally(&mut self, spec: &AllySpec, arena: &Arena) -> ActorId {
        let ship = AllyShip::spawn(spec, &mut self.rng, arena);
        let id = self.push(ActorKind::Ally(ship));
        log::info!("{} ally {id} joined", spec.class.as_str());
        id
    }

    /// One frame: update everyone in order, drop off-screen actors, refill
    /// hostiles up to the floor.
    pub fn tick(&mut self, aim: Option<&AimVector>, arena: &Arena) -> TickReport {
        for actor in &mut self.actors {
            actor.update(aim, arena);
        }

        let removed = self.prune();
        let spawned = self.replenish(arena);
        TickReport { removed, spawned }
    }

    /// Compact away every marked actor. The player is never removed.
    fn prune(&mut self) -> usize {
        let marked: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|a| !a.is_player() && a.is_out_of_range())
            .map(|a| a.id)
            .collect();
        if marked.is_empty() {
            return 0;
        }
        self.remove_all(&marked)
    }

    fn replenish(&mut self, arena: &Arena) -> usize {
        let mut spawned = 0;
        while self.non_player_count() < self.floor {
            let id = self.spawn_hostile(arena);
            log::debug!("Replenished hostile {id}");
            spawned += 1;
        }
        spawned
    }

    /// Remove one actor by identity
    pub fn remove(&mut self, id: ActorId) -> Result<Actor, GameError> {
        if id == self.player_id {
            return Err(GameError::PlayerRemoval);
        }
        let index = self
            .actors
            .iter()
            .position(|a| a.id == id)
            .ok_or(GameError::ActorMissing(id))?;
        Ok(self.actors.remove(index))
    }

    /// Remove a batch by identity in one compaction. Ids no longer present
    /// are logged and skipped. Returns how many actors were removed.
    pub fn remove_all(&mut self, ids: &[ActorId]) -> usize {
        let doomed: HashSet<ActorId> = ids
            .iter()
            .copied()
            .filter(|&id| id != self.player_id)
            .collect();
        for &id in &doomed {
            if !self.contains(id) {
                log::warn!("{}", GameError::ActorMissing(id));
            }
        }

        let before = self.actors.len();
        self.actors.retain(|a| !doomed.contains(&a.id));
        before - self.actors.len()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.iter().any(|a| a.id == id)
    }

    // === Pause / resume ===

    /// Freeze every actor. Calling twice is the same as once.
    pub fn pause(&mut self) {
        self.paused = true;
        for actor in &mut self.actors {
            actor.set_paused(true);
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
        for actor in &mut self.actors {
            actor.set_paused(false);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // === Player ===

    pub fn player(&self) -> &PlayerShip {
        self.actors
            .iter()
            .find_map(|a| match &a.kind {
                ActorKind::Player(ship) => Some(ship),
                _ => None,
            })
            .unwrap_or_else(|| unreachable!("population always holds the player ship"))
    }

    pub fn player_mut(&mut self) -> &mut PlayerShip {
        self.actors
            .iter_mut()
            .find_map(|a| match &mut a.kind {
                ActorKind::Player(ship) => Some(ship),
                _ => None,
            })
            .unwrap_or_else(|| unreachable!("population always holds the player ship"))
    }

    pub fn player_id(&self) -> ActorId {
        self.player_id
    }

    /// Safe between ticks; bullets already in flight keep their color
    pub fn change_bullet_color(&mut self, color: Color) {
        self.player_mut().change_bullet_color(color);
        log::info!("Bullet color set to {color:?}");
    }

    // === Queries ===

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.iter().map(|a| a.id).collect()
    }

    pub fn non_player_count(&self) -> usize {
        self.actors.iter().filter(|a| !a.is_player()).count()
    }

    pub fn floor(&self) -> usize {
        self.floor
    }
}
