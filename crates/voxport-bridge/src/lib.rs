pub mod bridge;
pub mod host;
pub mod ports;
pub mod probe;

pub use bridge::RecognitionBridge;
pub use host::BridgeHost;
pub use ports::{AppPorts, CommandPort, PortClosed};
pub use probe::probe;
