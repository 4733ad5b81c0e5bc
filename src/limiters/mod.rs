pub mod admission;
pub mod state;
pub mod timekeeper;
pub use admission::AdmissionPool;
pub use state::GateState;
pub use timekeeper::Timekeeper;
