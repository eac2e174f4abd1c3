use crate::domain::model::Stats;
use rand::Rng;

pub const STAT_MIN: u8 = 70;
pub const STAT_MAX: u8 = 99;

/// Draws all five stats independently and uniformly from `STAT_MIN..=STAT_MAX`.
///
/// Markup never carries stats, so every extracted record gets a synthesized set.
pub fn synthesize<R: Rng + ?Sized>(rng: &mut R) -> Stats {
    Stats {
        strength: roll(rng),
        agility: roll(rng),
        intelligence: roll(rng),
        web_slinging: roll(rng),
        combat: roll(rng),
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(STAT_MIN..=STAT_MAX)
}
