use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The exploration probability at time `t`
    pub fn epsilon(&self, t: u32) -> f32 {
        self.epsilon.evaluate(t as f32)
    }

    /// Invoke epsilon greedy policy at time `t`, drawing from `rng`
    pub fn choose<R: Rng + ?Sized>(&self, t: u32, rng: &mut R) -> Choice {
        if rng.gen::<f32>() < self.epsilon(t) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay;

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let greedy = EpsilonGreedy::new(decay::Constant::new(0.0));
        let random = EpsilonGreedy::new(decay::Constant::new(1.0));
        for t in 0..100 {
            assert_eq!(greedy.choose(t, &mut rng), Choice::Exploit, "epsilon 0 never explores");
            assert_eq!(random.choose(t, &mut rng), Choice::Explore, "epsilon 1 always explores");
        }
    }

    #[test]
    fn epsilon_follows_decay() {
        let policy = EpsilonGreedy::new(decay::Linear::new(0.1, 0.5, 0.0).unwrap());
        assert_eq!(policy.epsilon(0), 0.5);
        assert!((policy.epsilon(2) - 0.3).abs() < 1e-6);
        assert_eq!(policy.epsilon(10), 0.0);
    }
}
