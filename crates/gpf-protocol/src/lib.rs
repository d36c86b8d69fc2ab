//! OGC protocol plumbing for the geodata platform.
//!
//! Covers:
//! - the registry of logical upstream servers
//! - WMS 1.3.0, WMTS 1.0.0 and TMS 1.0.0 capability adapters producing a
//!   uniform layer model
//! - the proxy's own WMS surface (GetCapabilities, GetMap parameters,
//!   exception reports)

pub mod adapter;
pub mod capabilities;
pub mod exceptions;
pub mod getmap;
pub mod layer;
pub mod registry;
pub mod tms;
pub mod wms;
pub mod wmts;

pub use adapter::{Capabilities, ProtocolAdapter};
pub use capabilities::{online_resource, proxy_capabilities};
pub use exceptions::{error_to_exception_xml, wms_exception_xml};
pub use getmap::{GetMapRequest, WmsParams, WmsRequest};
pub use layer::{CapabilityLayer, Layer, Style, TileSource, ZoomBounds};
pub use registry::{find_server, LogicalServer, ProtocolKind, SERVERS};
