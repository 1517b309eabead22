//! Defines the per-node and per-edge parameters of the structural causal model,
//! plus the `Edge` key used for ground truth and scoring.

use crate::error::{check_probability, Result, TwinError};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique, stable identifier for a node within the graph.
///
/// This is a type alias for `petgraph::graph::NodeIndex`; the integer label of a
/// node is its index.
pub type NodeId = NodeIndex;

/// Rounds a sampled probability to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Fault parameters of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeParams {
    /// Probability that a new fault is injected at this node on any sample.
    pub lam: f64,
    /// Probability that an active fault persists from the previous sample.
    pub v_self: f64,
}

impl NodeParams {
    pub fn new(lam: f64, v_self: f64) -> Result<Self> {
        let params = Self { lam, v_self };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        check_probability("lam", self.lam)?;
        check_probability("v_self", self.v_self)
    }
}

/// Propagation parameters of a single cause -> effect edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Probability that an active parent state reaches the child.
    pub v_prop: f64,
    /// Delay, in samples, between the parent state and its effect. Always >= 1.
    pub lag: usize,
}

impl EdgeParams {
    pub fn new(v_prop: f64, lag: usize) -> Result<Self> {
        let params = Self { v_prop, lag };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        check_probability("v_prop", self.v_prop)?;
        if self.lag < 1 {
            return Err(TwinError::InvalidArgument(format!(
                "lag must be >= 1, got {}",
                self.lag
            )));
        }
        Ok(())
    }
}

/// A directed cause -> effect pair, keyed by node label.
///
/// Renders as `"u->v"`, the text form discovery tools usually emit, and parses
/// back from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub cause: u32,
    pub effect: u32,
}

impl Edge {
    pub fn new(cause: u32, effect: u32) -> Self {
        Self { cause, effect }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.cause, self.effect)
    }
}

impl FromStr for Edge {
    type Err = TwinError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TwinError::InvalidArgument(format!("Malformed edge '{}', expected 'u->v'", s));
        let (cause, effect) = s.trim().split_once("->").ok_or_else(invalid)?;
        let cause = cause.trim().parse().map_err(|_| invalid())?;
        let effect = effect.trim().parse().map_err(|_| invalid())?;
        Ok(Self { cause, effect })
    }
}
