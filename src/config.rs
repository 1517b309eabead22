//! Benchmark configuration: graph size, parameter ranges, series length, seed.

use crate::compute::{synthesize, TimeSeriesTable};
use crate::error::{check_probability, Result, TwinError};
use crate::graph::CausalGraph;
use crate::scm::{generate_dag, ParamRange, ParameterSpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkConfig {
    pub nodes: usize,
    pub edge_probability: f64,
    pub lam: ParamRange,
    pub v_self: ParamRange,
    pub v_prop: ParamRange,
    pub lag_max: usize,
    pub step: f64,
    pub length: usize,
    /// `None` seeds from OS entropy; `resolve_seed` pins one so the run can be repeated.
    pub seed: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        let space = ParameterSpace::default();
        Self {
            nodes: 10,
            edge_probability: 0.3,
            lam: space.lam,
            v_self: space.v_self,
            v_prop: space.v_prop,
            lag_max: space.lag_max,
            step: space.step,
            length: 1000,
            seed: None,
        }
    }
}

/// The products of one benchmark run.
#[derive(Debug, Clone)]
pub struct Benchmark {
    pub graph: CausalGraph,
    pub table: TimeSeriesTable,
}

impl BenchmarkConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes == 0 {
            return Err(TwinError::InvalidArgument("nodes must be positive".into()));
        }
        if self.length == 0 {
            return Err(TwinError::InvalidArgument("length must be positive".into()));
        }
        check_probability("edge_probability", self.edge_probability)?;
        self.parameter_space().map(|_| ())
    }

    pub fn parameter_space(&self) -> Result<ParameterSpace> {
        ParameterSpace::new(self.lam, self.v_self, self.v_prop, self.lag_max, self.step)
    }

    /// Returns the configured seed, drawing and recording a fresh one first if
    /// none was set.
    pub fn resolve_seed(&mut self) -> u64 {
        *self.seed.get_or_insert_with(|| StdRng::from_entropy().gen())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate -> parametrize -> synthesize, all drawing from `rng`.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Benchmark> {
        self.validate()?;
        let mut graph = generate_dag(self.nodes, self.edge_probability, rng)?;
        self.parameter_space()?.parametrize(&mut graph, rng)?;
        let table = synthesize(&graph, self.length, rng)?;
        Ok(Benchmark { graph, table })
    }
}
