// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use nix::errno::Errno;
use thiserror::Error;

use super::session::FileHandle;

/// Outcome of a failed proxied operation. Every variant ends up as exactly one
/// `fuse_reply_err` with the code returned by [`ProxyError::errno`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProxyError {
    /// The operation on the real device failed; the errno is passed through unchanged.
    #[error("underlying device failed: {0}")]
    Device(#[from] Errno),

    /// The command does not use the integer-argument or no-argument calling convention.
    #[error("unsupported ioctl command {0:#x}")]
    UnsupportedIoctl(u64),

    #[error("unknown {0}")]
    UnknownHandle(FileHandle),
}

impl ProxyError {
    pub fn errno(&self) -> Errno {
        match self {
            ProxyError::Device(errno) => *errno,
            // the fuse ioctl path of the kernel reports ENOSYS as ENOTTY to the caller
            ProxyError::UnsupportedIoctl(_) => Errno::ENOSYS,
            ProxyError::UnknownHandle(_) => Errno::EBADF,
        }
    }
}
