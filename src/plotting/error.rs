use crate::analysis::speed::BinningError;
use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    #[error("Failed to create plot directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("No samples of {0} left to plot")]
    NoData(String),

    #[error("Chart font unavailable: {0}")]
    Font(String),

    #[error("Failed to read font file '{0}'")]
    FontRead(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Binning(#[from] BinningError),

    #[error("Background rendering task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

// Backend errors are generic over the backend; only the message is kept.
impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(e.to_string())
    }
}
