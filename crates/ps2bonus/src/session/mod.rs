//! Emulator session lifecycle.
//!
//! A session is one launch-to-exit run of the emulator for a single game:
//!
//! ```text
//! Idle -> Launching -> Running -> Idle              (process exited)
//! Idle -> Launching -> Idle                         (image missing)
//! Idle -> Launching -> ForegroundRedirect -> Idle   (image missing, TV mode)
//! ```
//!
//! Only one session may be active; a second launch is rejected until the
//! first one's exit has been committed. There is no way to stop a session
//! early.

mod clock;
mod controller;
mod process;
mod ui;

pub use clock::{Clock, SystemClock};
pub use controller::{ActiveSession, SessionController, SessionExit, SessionState};
pub use process::{ProcessSpawner, RunningProcess, SystemSpawner};
pub use ui::{LauncherUi, MessageKind};
