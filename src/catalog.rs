use std::{
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to open the catalog file {0:?}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Failed to deserialize the catalog file {0:?}")]
    Pickle(PathBuf, #[source] serde_pickle::Error),
    #[error("No `psf_data` table in the first catalog file {0:?}")]
    MissingPsfData(PathBuf),
    #[error("No catalog file given")]
    NoFiles,
}

/// Sheared realization label of a measurement
#[derive(EnumIter, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShearType {
    #[serde(rename = "noshear")]
    Noshear,
    #[serde(rename = "1p")]
    OnePlus,
    #[serde(rename = "1m")]
    OneMinus,
    #[serde(rename = "2p")]
    TwoPlus,
    #[serde(rename = "2m")]
    TwoMinus,
}
impl fmt::Display for ShearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShearType::Noshear => write!(f, "noshear"),
            ShearType::OnePlus => write!(f, "1p"),
            ShearType::OneMinus => write!(f, "1m"),
            ShearType::TwoPlus => write!(f, "2p"),
            ShearType::TwoMinus => write!(f, "2m"),
        }
    }
}

/// One object measurement from a sheared realization
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Measurement {
    pub shear_type: ShearType,
    /// Two-component shear estimator (g1, g2)
    pub g: [f64; 2],
    /// Zero means usable
    pub flags: i64,
    /// Measurement signal-to-noise
    pub s2n: f64,
    /// Object-to-PSF size ratio
    #[serde(rename = "T_ratio")]
    pub t_ratio: f64,
}

/// PSF model diagnostic, informational only
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PsfSample {
    pub psf_s2n: f64,
}

/// On-file layout of a single catalog file
#[derive(Serialize, Deserialize, Debug)]
struct CatalogFile {
    catalog: Vec<Measurement>,
    #[serde(default)]
    psf_data: Option<Vec<PsfSample>>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub data: Vec<Measurement>,
    pub psf_data: Vec<PsfSample>,
}
impl Catalog {
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn summary(&self) {
        println!("SUMMARY:");
        println!(" - # of records: {}", self.len());
        for shear_type in ShearType::iter() {
            let n = self
                .data
                .iter()
                .filter(|m| m.shear_type == shear_type)
                .count();
            if n > 0 {
                println!(" - {:8}: {}", shear_type.to_string(), n);
            }
        }
        println!(" - # of PSF samples: {}", self.psf_data.len());
    }
}

/// Measurement catalog loader
///
/// The catalog tables of all the files are concatenated in the given order;
/// the `psf_data` table is taken from the first file only, where it is
/// required.
pub struct CatalogReader {
    paths: Vec<PathBuf>,
}
impl CatalogReader {
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }
    pub fn load(self) -> Result<Catalog, CatalogError> {
        if self.paths.is_empty() {
            return Err(CatalogError::NoFiles);
        }
        let mut catalog = Catalog::default();
        for (i, path) in self.paths.iter().enumerate() {
            log::info!("Loading {:?}...", path);
            let file =
                File::open(path).map_err(|e| CatalogError::Io(path.clone(), e))?;
            let mut contents: CatalogFile =
                serde_pickle::from_reader(BufReader::new(file), Default::default())
                    .map_err(|e| CatalogError::Pickle(path.clone(), e))?;
            catalog.data.append(&mut contents.catalog);
            if i == 0 {
                catalog.psf_data = contents
                    .psf_data
                    .ok_or_else(|| CatalogError::MissingPsfData(path.clone()))?;
            }
        }
        log::info!("... {} records", catalog.len());
        Ok(catalog)
    }
}
