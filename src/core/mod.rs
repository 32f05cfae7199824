pub mod display;
pub mod flow;
pub mod matcher;
pub mod session;

pub use crate::domain::model::{
    LiveDataset, Municipality, MunicipalityRecord, ReferenceDataset, ReferenceEntry, TurnoutReport,
};
pub use crate::domain::ports::{ConfigProvider, TurnoutSource};
pub use crate::utils::error::Result;
