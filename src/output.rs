//! Result record serialization
//!
//! The record layout depends on the reporting mode: either
//! `{m1, m1err, c2, c2err}` or `{c1, c1err, c2, c2err}`, all 32-bit floats.
//! A run writes exactly one record and truncates any pre-existing file.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::bias::BiasEstimate;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("Failed to access the result file {0:?}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Failed to serialize the result file {0:?}")]
    Pickle(PathBuf, #[source] serde_pickle::Error),
}

#[derive(Serialize, Deserialize, Debug)]
struct MultiplicativeRecord {
    m1: f32,
    m1err: f32,
    c2: f32,
    c2err: f32,
}

#[derive(Serialize, Deserialize, Debug)]
struct AdditiveRecord {
    c1: f32,
    c1err: f32,
    c2: f32,
    c2err: f32,
}

/// Writes the single result record, overwriting `path`
pub fn write(estimate: &BiasEstimate, path: &Path) -> Result<(), OutputError> {
    log::info!("Writing {:?}...", path);
    let mut file = File::create(path).map_err(|e| OutputError::Io(path.to_path_buf(), e))?;
    match *estimate {
        BiasEstimate::Multiplicative { m1, m1err, c2, c2err } => {
            let record = MultiplicativeRecord {
                m1: m1 as f32,
                m1err: m1err as f32,
                c2: c2 as f32,
                c2err: c2err as f32,
            };
            serde_pickle::to_writer(&mut file, &record, Default::default())
        }
        BiasEstimate::Additive { c1, c1err, c2, c2err } => {
            let record = AdditiveRecord {
                c1: c1 as f32,
                c1err: c1err as f32,
                c2: c2 as f32,
                c2err: c2err as f32,
            };
            serde_pickle::to_writer(&mut file, &record, Default::default())
        }
    }
    .map_err(|e| OutputError::Pickle(path.to_path_buf(), e))
}

/// Reads a result record back, resolving the mode from the record fields
///
/// The returned estimate carries the 32-bit precision of the file.
pub fn read(path: &Path) -> Result<BiasEstimate, OutputError> {
    let bytes = std::fs::read(path).map_err(|e| OutputError::Io(path.to_path_buf(), e))?;
    if let Ok(record) =
        serde_pickle::from_slice::<MultiplicativeRecord>(&bytes, Default::default())
    {
        return Ok(BiasEstimate::Multiplicative {
            m1: record.m1 as f64,
            m1err: record.m1err as f64,
            c2: record.c2 as f64,
            c2err: record.c2err as f64,
        });
    }
    serde_pickle::from_slice::<AdditiveRecord>(&bytes, Default::default())
        .map(|record| BiasEstimate::Additive {
            c1: record.c1 as f64,
            c1err: record.c1err as f64,
            c2: record.c2 as f64,
            c2err: record.c2err as f64,
        })
        .map_err(|e| OutputError::Pickle(path.to_path_buf(), e))
}
