use crate::{
    bias::BiasError, catalog::CatalogError, output::OutputError, response::ResponseError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `catalog` module")]
    Catalog(#[from] CatalogError),
    #[error("Error in the `response` module")]
    Response(#[from] ResponseError),
    #[error("Error in the `bias` module")]
    Bias(#[from] BiasError),
    #[error("Error in the `output` module")]
    Output(#[from] OutputError),
}
