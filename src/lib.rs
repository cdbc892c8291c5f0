#![forbid(unsafe_code)]

pub mod color;
pub mod effect;
pub mod effects;
pub mod error;
pub mod layout;
pub mod opc;
pub mod runner;

pub use color::LinearRgb;
pub use effect::Effect;
pub use error::{OpcfxError, OpcfxResult};
pub use layout::{Layout, PixelInfo};
pub use opc::{TcpTransport, Transport};
pub use runner::{EffectRunner, MAX_TIME_DELTA};
