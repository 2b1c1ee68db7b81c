use rand::Rng;

/// Decides when the flaky endpoint pretends the upstream fell over.
///
/// A request fails when a uniform draw from `0..one_in` lands on zero, so the
/// long-run failure rate is `1 / one_in`. `one_in == 0` never fails.
#[derive(Debug, Clone, Copy)]
pub struct FailureGate {
    one_in: u32,
}

impl FailureGate {
    pub fn new(one_in: u32) -> Self {
        Self { one_in }
    }

    pub fn one_in(&self) -> u32 {
        self.one_in
    }

    pub fn should_fail<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        match self.one_in {
            0 => false,
            n => rng.random_range(0..n) == 0,
        }
    }

    /// Draws from the thread-local generator.
    pub fn roll(&self) -> bool {
        self.should_fail(&mut rand::rng())
    }
}
