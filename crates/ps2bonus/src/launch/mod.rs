//! Launch preparation.
//!
//! Turns a [`Game`](crate::Game) and the global settings into a
//! [`LaunchPlan`]:
//!
//! - **Overrides**: optional `PCSX2Bonus.ini` under the game's config directory
//! - **Resolver**: effective executable, working directory, boot flags, shader
//! - **Arguments**: the emulator command-line string
//! - **Shader**: copies the per-game shader next to the emulator

mod args;
mod overrides;
mod resolver;
mod shader;

pub use args::compose_arguments;
pub use overrides::{BootFlag, BootFlags, GameOverrides, OVERRIDE_FILE_NAME};
pub use resolver::{
    EffectiveLaunchConfig, LaunchCommand, LaunchPlan, game_config_dir, resolve_launch_config,
};
pub use shader::{SHADER_TARGET_NAME, install_shader};
