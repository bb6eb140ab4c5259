//! Game state: arena, active piece, spawn RNG and the gravity clock.

use crate::GameConfig;
use crate::arena::Arena;
use crate::piece::{PieceKind, PieceSet, Rotation};
use crate::player::{Direction, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Whole game: the only writer of arena and piece. Input handlers and the
/// frame loop call in here one at a time.
#[derive(Debug)]
pub struct GameState {
    pub arena: Arena,
    pub player: Player,
    pieces: PieceSet,
    rng: StdRng,
    /// Time accumulated toward the next automatic drop.
    drop_counter: Duration,
    drop_interval: Duration,
    /// Clock reading at the previous `update`.
    last_time: Duration,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let arena = Arena::new(config.width, config.height);
        let kind = pick(&config.pieces, &mut rng);
        Self {
            player: Player::spawn(kind, arena.width()),
            arena,
            pieces: config.pieces.clone(),
            rng,
            drop_counter: Duration::ZERO,
            drop_interval: config.drop_interval,
            last_time: Duration::ZERO,
        }
    }

    /// Advance the clock to `now` (monotonic, since start). Drops the piece
    /// once the accumulated time exceeds the drop interval.
    pub fn update(&mut self, now: Duration) {
        let delta = now.saturating_sub(self.last_time);
        self.last_time = now;
        self.drop_counter += delta;
        if self.drop_counter > self.drop_interval {
            self.drop_piece();
        }
    }

    pub fn move_piece(&mut self, dir: Direction) {
        self.player.shift(&self.arena, dir);
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        if !self.player.rotate(&self.arena, rotation) {
            tracing::debug!(kind = %self.player.kind, x = self.player.pos.x, "rotation blocked");
        }
    }

    /// One row down. When blocked, lock the piece into the arena, clear full
    /// rows and spawn the next one. Always restarts the drop counter.
    pub fn drop_piece(&mut self) {
        if !self.player.fall(&self.arena) {
            let Player { kind, matrix, pos } = &self.player;
            tracing::debug!(kind = %kind, x = pos.x, y = pos.y, "piece locked");
            self.arena.merge(matrix, *pos);
            let cleared = self.arena.sweep();
            if cleared > 0 {
                tracing::info!(rows = cleared, "rows cleared");
            }
            self.reset();
        }
        self.drop_counter = Duration::ZERO;
    }

    /// Spawn a random piece at the top centre. If it already collides the
    /// board is topped out and every cell is cleared.
    pub fn reset(&mut self) {
        let kind = pick(&self.pieces, &mut self.rng);
        self.player = Player::spawn(kind, self.arena.width());
        tracing::trace!(kind = %kind, x = self.player.pos.x, "spawned");
        if self.player.collides(&self.arena) {
            tracing::info!("board topped out, clearing arena");
            self.arena.clear();
        }
    }
}

fn pick(pieces: &PieceSet, rng: &mut impl Rng) -> PieceKind {
    let kinds = pieces.kinds();
    kinds[rng.random_range(0..kinds.len())]
}
