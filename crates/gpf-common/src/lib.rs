//! Common types and scale logic shared by the geodata platform proxy and
//! capability browser.

pub mod bbox;
pub mod error;
pub mod format;
pub mod grouping;
pub mod selector;
pub mod zoom;

pub use bbox::BoundingBox;
pub use error::{GpfError, GpfResult};
pub use format::ImageFormat;
pub use grouping::group_thousands;
pub use selector::{threshold_table, LayerSelection, MapScale, PyramidBand, ThresholdTable};
