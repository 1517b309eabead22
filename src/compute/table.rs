//! table.rs
//! Column-per-node storage for synthesized alert signals.

use crate::error::{Result, TwinError};
use crate::graph::NodeId;
use serde::Serialize;
use std::io::Write;

/// One binary (0/1) column per node, all of the same `length`.
///
/// Columns are indexed by node label. A table is only handed out once every
/// column is complete, after which it is read-only. Serialization is
/// export-only; tables are never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesTable {
    length: usize,
    columns: Vec<Vec<u8>>,
}

impl TimeSeriesTable {
    pub(crate) fn from_columns(length: usize, columns: Vec<Vec<u8>>) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == length));
        Self { length, columns }
    }

    /// Number of samples per column.
    pub fn length(&self) -> usize { self.length }

    /// Number of columns (nodes).
    pub fn width(&self) -> usize { self.columns.len() }

    pub fn column(&self, node: NodeId) -> Option<&[u8]> {
        self.columns.get(node.index()).map(Vec::as_slice)
    }

    #[inline(always)]
    pub fn get(&self, node: NodeId, sample: usize) -> Option<u8> {
        self.column(node)?.get(sample).copied()
    }

    /// Fraction of samples in which `node` was alerting.
    pub fn activity(&self, node: NodeId) -> Option<f64> {
        let column = self.column(node)?;
        let active = column.iter().filter(|&&v| v == 1).count();
        Some(active as f64 / column.len() as f64)
    }

    /// Writes the table as CSV: a header of node labels, then one row per sample.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record((0..self.width()).map(|i| i.to_string()))?;
        for sample in 0..self.length {
            let row = self
                .columns
                .iter()
                .enumerate()
                .map(|(node, c)| {
                    c.get(sample).map(u8::to_string).ok_or_else(|| {
                        TwinError::InvalidArgument(format!("Column {} has no sample {}", node, sample))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
