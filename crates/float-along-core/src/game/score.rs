use serde::{Deserialize, Serialize};

/// Points and the post-goal animation countdown.
///
/// `timer` is `Some` exactly while a goal is being celebrated; the point is
/// only awarded once the countdown runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    points: u32,
    timer: Option<u32>,
}

impl ScoreState {
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn is_scored(&self) -> bool {
        self.timer.is_some()
    }

    /// Remaining animation ticks, `None` when not animating
    pub fn timer(&self) -> Option<u32> {
        self.timer
    }

    pub fn start(&mut self, ticks: u32) {
        self.timer = Some(ticks);
    }

    /// Advance the animation by one tick. Returns true when it just finished
    /// and the point was awarded.
    pub fn countdown(&mut self) -> bool {
        match self.timer {
            Some(remaining) if remaining > 1 => {
                self.timer = Some(remaining - 1);
                false
            }
            Some(_) => {
                self.timer = None;
                self.points += 1;
                true
            }
            None => false,
        }
    }

    /// Fraction of the animation already played, in `[0, 1]`
    pub fn progress(&self, total_ticks: u32) -> Option<f32> {
        let remaining = self.timer?;
        if total_ticks == 0 {
            return Some(1.0);
        }
        Some((1.0 - remaining as f32 / total_ticks as f32).clamp(0.0, 1.0))
    }
}
