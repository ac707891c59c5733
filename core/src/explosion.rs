use serde::{Deserialize, Serialize};

/// Number of frames in the explosion sequence.
pub const EXPLOSION_FRAMES: u8 = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationStep {
    Frame(u8),
    /// The last frame was just shown, the tick source should stop.
    Finished,
}

/// Frame counter for the explosion drawn over the detonated mine, no game state lives here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionAnimator {
    index: u8,
    active: bool,
}

impl ExplosionAnimator {
    pub const LAST_FRAME: u8 = EXPLOSION_FRAMES - 1;

    pub fn start(&mut self) {
        self.index = 0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frame the renderer should draw.
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn tick(&mut self) -> AnimationStep {
        if !self.active {
            return AnimationStep::Finished;
        }

        self.index = (self.index + 1).min(Self::LAST_FRAME);
        if self.index == Self::LAST_FRAME {
            self.active = false;
            AnimationStep::Finished
        } else {
            AnimationStep::Frame(self.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_eight_ticks_then_stops() {
        let mut animator = ExplosionAnimator::default();
        animator.start();

        for frame in 1..ExplosionAnimator::LAST_FRAME {
            assert_eq!(animator.tick(), AnimationStep::Frame(frame));
        }
        assert_eq!(animator.tick(), AnimationStep::Finished);
        assert_eq!(animator.index(), 8);
        assert!(!animator.is_active());

        // late ticks do not move past the final frame
        assert_eq!(animator.tick(), AnimationStep::Finished);
        assert_eq!(animator.index(), 8);
    }

    #[test]
    fn restart_rewinds() {
        let mut animator = ExplosionAnimator::default();
        animator.start();
        animator.tick();
        animator.start();

        assert_eq!(animator.index(), 0);
        assert!(animator.is_active());
    }
}
