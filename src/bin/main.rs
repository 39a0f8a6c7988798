use std::path::PathBuf;

use anyhow::Context;
use metacal_bias::{output, BiasMode, CatalogReader, ShearConfig};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "doshear", about = "Metacalibration shear bias estimation")]
struct Opt {
    /// Measurement catalog files
    #[structopt(long, required = true)]
    flist: Vec<PathBuf>,
    /// Path to the result file
    #[structopt(long)]
    output: PathBuf,
    /// No shear was injected: report component 1 as an additive bias
    #[structopt(long)]
    noshear: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let config = ShearConfig::default();
    let catalog = CatalogReader::new(&opt.flist)
        .load()
        .context("Failed to load the measurement catalog")?;
    catalog.summary();

    let mode = if opt.noshear {
        BiasMode::Additive
    } else {
        BiasMode::Multiplicative
    };
    let estimate = metacal_bias::estimate(&catalog, &config, mode)?;
    estimate.summary();

    output::write(&estimate, &opt.output).context("Failed to write the result file")?;

    Ok(())
}
