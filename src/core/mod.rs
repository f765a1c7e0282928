pub mod analysis;
pub mod etl;
pub mod neighborhood;
pub mod pipeline;
pub mod preference;
pub mod price;
pub(crate) mod reduce;
pub mod region;
pub mod safety;

pub use crate::domain::model::{AnalysisReport, Dataset};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
