// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use nix::fcntl::OFlag;

use super::error::ProxyError;

// 3, because 1 and 2 are usually STDOUT and STDERR
const FIRST_FILE_HANDLE: u64 = 3;

/// The value cuse stores in `fuse_file_info.fh` and hands back on every request.
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct FileHandle(pub u64);

impl std::fmt::Display for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fh {}", self.0)
    }
}

/// One successful open of the real device.
#[derive(Debug, Clone, Copy)]
pub struct OpenSession<H> {
    pub device: H,
    pub flags: OFlag,
}

/// All sessions between a successful open and the matching release.
///
/// Lookups copy the session out, so the lock is never held while the real
/// device is blocking in a syscall.
#[derive(Debug)]
pub struct SessionTable<H> {
    counter: AtomicU64,
    sessions: RwLock<HashMap<FileHandle, OpenSession<H>>>,
}

impl<H: Copy> SessionTable<H> {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(FIRST_FILE_HANDLE),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn fresh_file_handle(&self) -> FileHandle {
        FileHandle(self.counter.fetch_add(1, Ordering::SeqCst))
    }

    /// Binds a new file handle to `session`. File handles are never reused.
    pub fn insert(&self, session: OpenSession<H>) -> FileHandle {
        let fh = self.fresh_file_handle();
        let mut guard = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.insert(fh, session);
        fh
    }

    pub fn get(&self, fh: FileHandle) -> Result<OpenSession<H>, ProxyError> {
        let guard = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&fh).copied().ok_or(ProxyError::UnknownHandle(fh))
    }

    pub fn remove(&self, fh: FileHandle) -> Result<OpenSession<H>, ProxyError> {
        let mut guard = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.remove(&fh).ok_or(ProxyError::UnknownHandle(fh))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<H: Copy> Default for SessionTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
