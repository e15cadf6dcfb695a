//! Fixed timestep accumulator
//!
//! Wall-clock time goes in once per frame; whole simulation steps come out.
//! Whatever is left over is the interpolation fraction for drawing.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    lag: Duration,
    max_substeps: u32,
    max_frame: Duration,
}

impl FixedStep {
    pub fn new(step: Duration, max_substeps: u32, max_frame: Duration) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            lag: Duration::ZERO,
            max_substeps: max_substeps.max(1),
            max_frame,
        }
    }

    /// Accumulate `elapsed` and return how many steps to run now.
    ///
    /// Long frames are clamped to `max_frame`, and at most `max_substeps`
    /// steps are handed out. Whole steps beyond that are dropped so a slow
    /// machine does not spiral.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let elapsed = if elapsed > self.max_frame {
            log::warn!(
                "Frame took {:?}, clamping to {:?}",
                elapsed,
                self.max_frame
            );
            self.max_frame
        } else {
            elapsed
        };
        self.lag += elapsed;

        let mut steps = 0;
        while self.lag >= self.step && steps < self.max_substeps {
            self.lag -= self.step;
            steps += 1;
        }

        if self.lag >= self.step {
            let dropped = self.lag.as_nanos() / self.step.as_nanos();
            log::warn!("Substep cap hit, dropping {} step(s)", dropped);
            let rem = self.lag.as_nanos() % self.step.as_nanos();
            self.lag = Duration::from_nanos(rem as u64);
        }

        steps
    }

    /// Leftover fraction of a step, in `[0, 1)`
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.lag.as_secs_f32() / self.step.as_secs_f32()
    }

    #[inline]
    pub fn lag(&self) -> Duration {
        self.lag
    }

    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    #[inline]
    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }
}
