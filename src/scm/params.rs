//! Samples SCM parameters for every node and edge of a graph.

use crate::error::{check_probability, Result, TwinError};
use crate::graph::{round3, CausalGraph, EdgeParams, NodeParams};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Tolerance used when deciding whether the upper bound lies on the step grid.
const GRID_EPSILON: f64 = 1e-9;

/// Largest number of steps a candidate grid may span.
const MAX_GRID_STEPS: u64 = 1_000_000;

/// An inclusive probability interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct ParamRange {
    low: f64,
    high: f64,
}

impl ParamRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        check_probability("range lower bound", low)?;
        check_probability("range upper bound", high)?;
        if low > high {
            return Err(TwinError::InvalidArgument(format!(
                "Inverted range [{}, {}]",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 { self.low }
    pub fn high(&self) -> f64 { self.high }

    /// Index of the last grid point `low + k * step` that does not exceed `high`.
    fn last_step(&self, step: f64) -> Result<u64> {
        check_step(step)?;
        let steps = ((self.high - self.low) / step + GRID_EPSILON).floor();
        if !steps.is_finite() || steps > MAX_GRID_STEPS as f64 {
            return Err(TwinError::InvalidArgument(format!(
                "step {} is too fine for [{}, {}]: at most {} grid steps allowed",
                step, self.low, self.high, MAX_GRID_STEPS
            )));
        }
        Ok(steps as u64)
    }

    /// The discretized candidate set `{low, low + step, ..., high}`, rounded to 3 decimals.
    pub fn candidates(&self, step: f64) -> Result<Vec<f64>> {
        let last = self.last_step(step)?;
        Ok((0..=last).map(|k| round3(self.low + k as f64 * step)).collect())
    }

    /// Draws one candidate uniformly without materializing the whole set.
    pub fn sample<R: Rng + ?Sized>(&self, step: f64, rng: &mut R) -> Result<f64> {
        let last = self.last_step(step)?;
        let k = rng.gen_range(0..=last);
        Ok(round3(self.low + k as f64 * step))
    }
}

impl TryFrom<[f64; 2]> for ParamRange {
    type Error = TwinError;

    fn try_from(bounds: [f64; 2]) -> Result<Self> {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<ParamRange> for [f64; 2] {
    fn from(range: ParamRange) -> Self {
        [range.low, range.high]
    }
}

fn check_step(step: f64) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(TwinError::InvalidArgument(format!("step must be positive, got {}", step)))
    }
}

/// Ranges from which node and edge parameters are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpace {
    pub lam: ParamRange,
    pub v_self: ParamRange,
    pub v_prop: ParamRange,
    /// Largest lag; lags are drawn uniformly from `1..=lag_max`.
    pub lag_max: usize,
    /// Probability resolution of the candidate grids.
    pub step: f64,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self {
            lam: ParamRange { low: 0.0, high: 0.1 },
            v_self: ParamRange { low: 0.5, high: 0.9 },
            v_prop: ParamRange { low: 0.5, high: 1.0 },
            lag_max: 3,
            step: 0.01,
        }
    }
}

impl ParameterSpace {
    pub fn new(lam: ParamRange, v_self: ParamRange, v_prop: ParamRange, lag_max: usize, step: f64) -> Result<Self> {
        let space = Self { lam, v_self, v_prop, lag_max, step };
        space.validate()?;
        Ok(space)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lag_max < 1 {
            return Err(TwinError::InvalidArgument(format!("lag_max must be >= 1, got {}", self.lag_max)));
        }
        for range in [self.lam, self.v_self, self.v_prop] {
            range.last_step(self.step)?;
        }
        Ok(())
    }

    /// Draws fresh parameters for every node and edge of `graph`, replacing any
    /// already attached.
    ///
    /// Draw order: `lam` then `v_self` for each node in ascending id, then
    /// `v_prop` then `lag` for each edge in insertion order.
    pub fn parametrize<R: Rng + ?Sized>(&self, graph: &mut CausalGraph, rng: &mut R) -> Result<()> {
        self.validate()?;

        let nodes: Vec<_> = graph.node_ids().collect();
        for id in nodes {
            let lam = self.lam.sample(self.step, rng)?;
            let v_self = self.v_self.sample(self.step, rng)?;
            graph.set_node_params(id, NodeParams::new(lam, v_self)?)?;
        }

        let edges: Vec<_> = graph.edges().collect();
        for (cause, effect) in edges {
            let v_prop = self.v_prop.sample(self.step, rng)?;
            let lag = rng.gen_range(1..=self.lag_max);
            graph.set_edge_params(cause, effect, EdgeParams::new(v_prop, lag)?)?;
        }

        info!(nodes = graph.node_count(), edges = graph.edge_count(), "parametrized DAG");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scm::generator::generate_dag;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn space() -> ParameterSpace {
        ParameterSpace::new(
            ParamRange::new(0.0, 0.1).unwrap(),
            ParamRange::new(0.5, 0.9).unwrap(),
            ParamRange::new(0.3, 1.0).unwrap(),
            4,
            0.01,
        )
        .unwrap()
    }

    fn is_rounded(value: f64) -> bool {
        (value * 1000.0 - (value * 1000.0).round()).abs() < 1e-6
    }

    #[test]
    fn test_candidates_include_upper_bound() {
        let values = ParamRange::new(0.1, 0.2).unwrap().candidates(0.05).unwrap();
        assert_eq!(values, vec![0.1, 0.15, 0.2]);

        let steps = ParamRange::new(0.0, 1.0).unwrap().candidates(0.01).unwrap();
        assert_eq!(steps.len(), 101);
        assert_eq!(steps.last(), Some(&1.0));
    }

    #[test]
    fn test_off_grid_upper_bound_is_excluded() {
        let values = ParamRange::new(0.0, 0.25).unwrap().candidates(0.1).unwrap();
        assert_eq!(values, vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn test_degenerate_range_has_single_candidate() {
        let range = ParamRange::new(0.3, 0.3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(range.sample(0.01, &mut rng).unwrap(), 0.3);
        }
    }

    #[test]
    fn test_invalid_ranges_and_space() {
        assert!(ParamRange::new(0.6, 0.2).is_err());
        assert!(ParamRange::new(-0.1, 0.2).is_err());
        assert!(ParamRange::new(0.1, 1.2).is_err());
        assert!(ParamRange::new(0.1, 0.2).unwrap().candidates(0.0).is_err());

        let r = ParamRange::new(0.1, 0.2).unwrap();
        assert!(ParameterSpace::new(r, r, r, 0, 0.01).is_err());
        assert!(ParameterSpace::new(r, r, r, 2, -0.01).is_err());
    }

    #[test]
    fn test_too_fine_step_is_rejected() {
        let range = ParamRange::new(0.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(range.candidates(1e-300), Err(TwinError::InvalidArgument(_))));
        assert!(matches!(range.sample(1e-300, &mut rng), Err(TwinError::InvalidArgument(_))));
        assert_eq!(range.candidates(0.001).unwrap().len(), 1001);

        assert!(matches!(
            ParameterSpace::new(range, range, range, 2, 1e-300),
            Err(TwinError::InvalidArgument(_))
        ));
        let point = ParamRange::new(0.3, 0.3).unwrap();
        assert!(ParameterSpace::new(point, point, point, 2, 1e-300).is_ok());
    }

    #[test]
    fn test_range_deserialization_validates() {
        let ok: ParamRange = serde_json::from_str("[0.2, 0.4]").unwrap();
        assert_eq!((ok.low(), ok.high()), (0.2, 0.4));
        assert!(serde_json::from_str::<ParamRange>("[0.4, 0.2]").is_err());
    }

    #[test]
    fn test_parametrize_covers_every_node_and_edge() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut graph = generate_dag(30, 0.3, &mut rng).unwrap();
        let space = space();
        space.parametrize(&mut graph, &mut rng).unwrap();

        assert!(graph.is_parametrized());
        for id in graph.node_ids() {
            let p = graph.node_params(id).unwrap();
            assert!((0.0..=0.1).contains(&p.lam) && is_rounded(p.lam));
            assert!((0.5..=0.9).contains(&p.v_self) && is_rounded(p.v_self));
        }
        for (cause, effect) in graph.edges() {
            let p = graph.edge_params(cause, effect).unwrap();
            assert!((0.3..=1.0).contains(&p.v_prop) && is_rounded(p.v_prop));
            assert!((1..=4).contains(&p.lag));
        }
    }

    #[test]
    fn test_parametrize_is_seed_deterministic() {
        let base = generate_dag(12, 0.5, &mut StdRng::seed_from_u64(5)).unwrap();
        let (mut a, mut b) = (base.clone(), base);
        space().parametrize(&mut a, &mut StdRng::seed_from_u64(8)).unwrap();
        space().parametrize(&mut b, &mut StdRng::seed_from_u64(8)).unwrap();
        for id in a.node_ids() {
            assert_eq!(a.node_params(id), b.node_params(id));
        }
        for (cause, effect) in a.edges() {
            assert_eq!(a.edge_params(cause, effect), b.edge_params(cause, effect));
        }
    }
}
