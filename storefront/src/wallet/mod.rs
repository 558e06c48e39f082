pub mod session;
pub mod simulated;

pub use session::{SessionEvent, SessionSnapshot, SessionStatus, WalletSession};
pub use simulated::SimulatedWallet;
