// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use std::sync::OnceLock;

/// The only device that is proxied. Kept as a constant so that it is obvious
/// from the source which node every open ends up on.
pub const REAL_DEVICE_PATH: &str = "/dev/uinput";

pub const DEFAULT_DEVNAME: &str = "uuinput";

/// Registration data of the cuse device node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub devname: String,
    // 0/0 lets the kernel pick major and minor
    pub major: u32,
    pub minor: u32,
}

// The actual static variable. It starts empty and is set once in main().
pub static CONFIG: OnceLock<GlobalConfig> = OnceLock::new();

pub fn initialize_global_config(config: GlobalConfig) {
    if CONFIG.set(config).is_err() {
        eprintln!("Failed to initialize global config");
        std::process::exit(1);
    }
}

pub fn get_config<'a>() -> Option<&'a GlobalConfig> {
    CONFIG.get()
}
