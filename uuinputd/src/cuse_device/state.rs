// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use std::sync::{Mutex, OnceLock, PoisonError};

use crate::proxy::device::UinputDevice;
use crate::proxy::error::ProxyError;
use crate::proxy::session::FileHandle;
use crate::proxy::DeviceProxy;

/// The cuse operation a reply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Release,
    Read,
    Write,
    Ioctl,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Open => "open",
            Operation::Release => "release",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Ioctl => "ioctl",
        };
        f.write_str(name)
    }
}

/// Remembers the last failure so that a client spinning on a failing call
/// does not flood the log with the same line.
#[derive(Debug, Default)]
pub struct ErrorLogLimiter {
    last_error: Mutex<Option<(Option<FileHandle>, Operation, ProxyError)>>,
}

impl ErrorLogLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this failure differs from the previous one.
    pub fn should_log(&self, fh: Option<FileHandle>, op: Operation, err: &ProxyError) -> bool {
        let mut last_error = self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = (fh, op, *err);
        if last_error.as_ref() == Some(&current) {
            return false;
        }
        *last_error = Some(current);
        true
    }

    /// A success on `fh` ends a streak of identical failures on it.
    pub fn record_success(&self, fh: FileHandle) {
        let mut last_error = self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if matches!(*last_error, Some((Some(last_fh), _, _)) if last_fh == fh) {
            *last_error = None;
        }
    }
}

pub static PROXY: OnceLock<DeviceProxy<UinputDevice>> = OnceLock::new();

pub static ERROR_LOG_LIMITER: OnceLock<ErrorLogLimiter> = OnceLock::new();

pub fn initialize_proxy(device: UinputDevice) {
    if PROXY.set(DeviceProxy::new(device)).is_err() {
        panic!("failed to initialize the device proxy");
    }
}

pub fn initialize_error_log_limiter() {
    ERROR_LOG_LIMITER
        .set(ErrorLogLimiter::new())
        .expect("failed to initialize the log deduplication state");
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn repeated_failures_are_logged_once() {
        let limiter = ErrorLogLimiter::new();
        let fh = Some(FileHandle(3));
        let err = ProxyError::Device(Errno::EIO);

        assert!(limiter.should_log(fh, Operation::Write, &err));
        assert!(!limiter.should_log(fh, Operation::Write, &err));
        assert!(limiter.should_log(fh, Operation::Read, &err));
        assert!(limiter.should_log(Some(FileHandle(4)), Operation::Read, &err));
    }

    #[test]
    fn success_resets_the_streak_of_its_handle_only() {
        let limiter = ErrorLogLimiter::new();
        let err = ProxyError::UnsupportedIoctl(0x5503);

        assert!(limiter.should_log(Some(FileHandle(3)), Operation::Ioctl, &err));
        limiter.record_success(FileHandle(4));
        assert!(!limiter.should_log(Some(FileHandle(3)), Operation::Ioctl, &err));
        limiter.record_success(FileHandle(3));
        assert!(limiter.should_log(Some(FileHandle(3)), Operation::Ioctl, &err));
    }
}
