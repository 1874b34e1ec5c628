pub mod builder;
pub mod config;
pub mod error;
pub mod gate;
pub mod request;
pub mod suspicion;
pub mod verdict;

pub use builder::GateBuilder;
pub use config::GateConfig;
pub use error::GateError;
pub use gate::PolicyGate;
pub use request::GateRequest;
pub use suspicion::SuspicionRules;
pub use verdict::GateVerdict;
