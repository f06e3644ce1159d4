// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use std::os::fd::{BorrowedFd, IntoRawFd, RawFd};
use std::os::raw::c_int;
use std::path::PathBuf;

use libc::off_t;
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;
use uinput_ioctls::*;

use super::ioctl_command::{CapabilityBit, Lifecycle, UinputRequest};

/// The file-like device behind the proxy. Every method is exactly one syscall
/// and reports failures with the errno of that syscall.
pub trait UnderlyingDevice {
    type Handle: Copy + std::fmt::Debug;

    fn open(&self, flags: OFlag) -> Result<Self::Handle, Errno>;
    fn close(&self, handle: Self::Handle) -> Result<(), Errno>;
    fn read_at(&self, handle: Self::Handle, buf: &mut [u8], offset: off_t) -> Result<usize, Errno>;
    fn write(&self, handle: Self::Handle, buf: &[u8]) -> Result<usize, Errno>;
    fn ioctl(&self, handle: Self::Handle, request: UinputRequest) -> Result<c_int, Errno>;
}

/// A character device node opened by path, usually /dev/uinput.
#[derive(Debug, Clone)]
pub struct UinputDevice {
    path: PathBuf,
}

impl UinputDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

// The caller of the proxy is responsible for only passing descriptors that were
// returned by `open` and not yet passed to `close`.
fn borrow(handle: RawFd) -> BorrowedFd<'static> {
    unsafe { BorrowedFd::borrow_raw(handle) }
}

impl UnderlyingDevice for UinputDevice {
    type Handle = RawFd;

    fn open(&self, flags: OFlag) -> Result<RawFd, Errno> {
        // the flags of the caller go to open(2) unchanged, O_CLOEXEC only if the caller asked for it
        let fd = nix::fcntl::open(self.path.as_path(), flags, Mode::empty())?;
        Ok(fd.into_raw_fd())
    }

    fn close(&self, handle: RawFd) -> Result<(), Errno> {
        // no retry on EINTR: the descriptor is gone either way on linux
        Errno::result(unsafe { libc::close(handle) }).map(drop)
    }

    fn read_at(&self, handle: RawFd, buf: &mut [u8], offset: off_t) -> Result<usize, Errno> {
        nix::sys::uio::pread(borrow(handle), buf, offset)
    }

    fn write(&self, handle: RawFd, buf: &[u8]) -> Result<usize, Errno> {
        // /dev/uinput rejects pwrite(), only plain write() is accepted
        nix::unistd::write(borrow(handle), buf)
    }

    fn ioctl(&self, handle: RawFd, request: UinputRequest) -> Result<c_int, Errno> {
        unsafe {
            match request {
                UinputRequest::SetBit(bit, value) => match bit {
                    CapabilityBit::Event => ui_set_evbit(handle, value),
                    CapabilityBit::Key => ui_set_keybit(handle, value),
                    CapabilityBit::Relative => ui_set_relbit(handle, value),
                    CapabilityBit::Absolute => ui_set_absbit(handle, value),
                    CapabilityBit::Misc => ui_set_mscbit(handle, value),
                    CapabilityBit::Led => ui_set_ledbit(handle, value),
                    CapabilityBit::Sound => ui_set_sndbit(handle, value),
                    CapabilityBit::ForceFeedback => ui_set_ffbit(handle, value),
                    CapabilityBit::Switch => ui_set_swbit(handle, value),
                    CapabilityBit::Property => ui_set_propbit(handle, value),
                },
                UinputRequest::Lifecycle(Lifecycle::Create) => ui_dev_create(handle),
                UinputRequest::Lifecycle(Lifecycle::Destroy) => ui_dev_destroy(handle),
            }
        }
    }
}
