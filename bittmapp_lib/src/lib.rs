pub mod bmp;
pub mod byteview;
pub mod config;
pub mod document;
pub mod raster;
pub mod selection;
pub mod session;

pub use bmp::{decode, encode, looks_like_bmp, BmpHeader, DecodeError};
pub use config::{InvalidConfig, RasterConfig};
pub use document::Document;
pub use raster::Raster;
pub use selection::{Edge, SelectionMask, Side};
pub use session::{Button, Session, Tool};
