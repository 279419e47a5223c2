//! Load profiles
//!
//! Describes how the virtual-user count changes over time. A profile is
//! built once in `main` and handed to the load engine as a default; it is
//! never mutated during a run. The engine owns all scheduling.

use std::time::Duration;

/// One ramp segment: reach `target` concurrent virtual users by the end of
/// `duration`. Repeating the previous target holds the level steady.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

impl Stage {
    pub const fn new(duration: Duration, target: usize) -> Self {
        Self { duration, target }
    }
}

/// Ordered sequence of ramp stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProfile {
    stages: Vec<Stage>,
}

impl LoadProfile {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Renders the profile as the engine's test-plan string, one
    /// `target,duration` pair per stage, e.g. `"20,30s;50,60s;0,30s"`.
    pub fn test_plan(&self) -> String {
        self.stages
            .iter()
            .map(|stage| format!("{},{}s", stage.target, stage.duration.as_secs()))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Flat vus/iterations shape used by the functional scripts.
///
/// `iterations` is the run total, divided across the virtual users the same
/// way the profile was originally expressed (5 users sharing 10 iterations
/// run 2 each). Division rounds up when uneven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedProfile {
    pub vus: usize,
    pub iterations: usize,
}

impl FixedProfile {
    pub const fn new(vus: usize, iterations: usize) -> Self {
        Self { vus, iterations }
    }

    /// Iterations each virtual user runs before stopping
    pub fn iterations_per_user(&self) -> usize {
        if self.vus == 0 {
            return 0;
        }
        self.iterations.div_ceil(self.vus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_plan_rendering() {
        let profile = LoadProfile::new(vec![
            Stage::new(Duration::from_secs(30), 20),
            Stage::new(Duration::from_secs(60), 50),
            Stage::new(Duration::from_secs(30), 0),
        ]);

        assert_eq!(profile.test_plan(), "20,30s;50,60s;0,30s");
    }

    #[test]
    fn test_single_stage_has_no_separator() {
        let profile = LoadProfile::new(vec![Stage::new(Duration::from_secs(10), 100)]);

        assert_eq!(profile.test_plan(), "100,10s");
    }

    #[test]
    fn test_even_iteration_split() {
        let profile = FixedProfile::new(5, 10);

        assert_eq!(profile.iterations_per_user(), 2);
    }

    #[test]
    fn test_uneven_iteration_split_rounds_up() {
        let profile = FixedProfile::new(3, 10);

        assert_eq!(profile.iterations_per_user(), 4);
    }

    #[test]
    fn test_zero_users_runs_nothing() {
        let profile = FixedProfile::new(0, 10);

        assert_eq!(profile.iterations_per_user(), 0);
    }
}
