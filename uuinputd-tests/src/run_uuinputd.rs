// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use std::{
    path::Path,
    process::{Child, Command},
    sync::OnceLock,
    thread,
    time::{Duration, Instant},
};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

pub const TEST_DEVNAME: &str = "uuinput-test";
pub const TEST_DEVICE_PATH: &str = "/dev/uuinput-test";

/// Global singleton
static UUINPUTD: OnceLock<UuinputdGuard> = OnceLock::new();

pub fn ensure_uuinputd_running() {
    UUINPUTD.get_or_init(UuinputdGuard::start);
}

struct UuinputdGuard {
    child: Child,
}

impl UuinputdGuard {
    fn start() -> Self {
        println!("Executing uuinputd located via cargo run");
        let child = Command::new("cargo")
            .args(["run", "-p", "uuinputd", "--", "--devname", TEST_DEVNAME])
            .spawn()
            .expect("failed to start uuinputd");

        // cargo may still be compiling, so wait for the node instead of a fixed time
        let deadline = Instant::now() + Duration::from_secs(120);
        while !Path::new(TEST_DEVICE_PATH).exists() {
            assert!(
                Instant::now() < deadline,
                "{} did not show up",
                TEST_DEVICE_PATH
            );
            thread::sleep(Duration::from_millis(100));
        }

        Self { child }
    }
}

impl Drop for UuinputdGuard {
    fn drop(&mut self) {
        let pid = Pid::from_raw(self.child.id() as i32);

        // First: SIGTERM
        let _ = signal::kill(pid, Signal::SIGTERM);

        // Wait a bit
        for _ in 0..10 {
            if let Ok(Some(_)) = self.child.try_wait() {
                return;
            }
            thread::sleep(Duration::from_millis(100));
        }

        // Still alive: SIGKILL
        let _ = signal::kill(pid, Signal::SIGKILL);
        let _ = self.child.wait();
    }
}
