/// The session parameters of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Geometric position.
    pub morph: f32,
    /// Cross-dissolve weight of the target.
    pub blend: f32,
    /// Temporal position between consecutive warps.
    pub tween: f32,
}

/// The frames of one morph window, in display order.
///
/// For every geometric step `m` in `1..morph_steps`, `tweens` frames fade from the previous warp
/// into the warp at `m / morph_steps`, while the blend moves steadily from the source to the
/// target.
///
/// # Example
///
/// ```
/// use morphimate::pipeline::FrameSchedule;
///
/// let frames = FrameSchedule::new(3, 2).collect::<Vec<_>>();
/// assert_eq!(frames.len(), 4);
/// assert_eq!(frames[1].tween, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct FrameSchedule {
    morph_steps: usize,
    tweens: usize,
    step: usize,
    tween: usize,
}

impl FrameSchedule {
    /// Create the schedule of one window.
    pub fn new(morph_steps: usize, tweens: usize) -> Self {
        Self {
            morph_steps,
            tweens,
            step: 1,
            tween: 0,
        }
    }

    fn remaining(&self) -> usize {
        if self.tweens == 0 || self.step >= self.morph_steps {
            return 0;
        }
        (self.morph_steps - self.step) * self.tweens - self.tween
    }
}

impl Iterator for FrameSchedule {
    type Item = FrameParams;

    fn next(&mut self) -> Option<FrameParams> {
        if self.remaining() == 0 {
            return None;
        }

        let (m, t) = (self.step, self.tween);
        let total = (self.morph_steps * self.tweens) as f32;
        let params = FrameParams {
            morph: m as f32 / self.morph_steps as f32,
            blend: ((m - 1) * self.tweens + t) as f32 / total,
            tween: t as f32 / self.tweens as f32,
        };

        self.tween += 1;
        if self.tween == self.tweens {
            self.tween = 0;
            self.step += 1;
        }

        Some(params)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for FrameSchedule {}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::FrameSchedule;

    #[test]
    fn schedule_values() {
        let frames = FrameSchedule::new(3, 2).collect::<Vec<_>>();
        let expected = [
            (1.0 / 3.0, 0.0, 0.0),
            (1.0 / 3.0, 1.0 / 6.0, 0.5),
            (2.0 / 3.0, 2.0 / 6.0, 0.0),
            (2.0 / 3.0, 3.0 / 6.0, 0.5),
        ];
        assert_eq!(frames.len(), expected.len());
        for (frame, (morph, blend, tween)) in frames.iter().zip(expected) {
            assert_relative_eq!(frame.morph, morph);
            assert_relative_eq!(frame.blend, blend);
            assert_relative_eq!(frame.tween, tween);
        }
    }

    #[test]
    fn schedule_len() {
        let mut schedule = FrameSchedule::new(50, 50);
        assert_eq!(schedule.len(), 49 * 50);
        schedule.next();
        assert_eq!(schedule.len(), 49 * 50 - 1);
        assert_eq!(FrameSchedule::new(1, 5).count(), 0);
        assert_eq!(FrameSchedule::new(5, 0).count(), 0);
    }

    #[test]
    fn blend_increases() {
        let blends = FrameSchedule::new(7, 4).map(|f| f.blend).collect::<Vec<_>>();
        assert!(blends.windows(2).all(|w| w[0] < w[1]));
        assert!(blends.iter().all(|b| (0.0..1.0).contains(b)));
    }
}
