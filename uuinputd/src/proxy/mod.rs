// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

//! The device proxy: every cuse request is turned into exactly one operation on
//! the real device, and its outcome into exactly one result for the reply.

pub mod device;
pub mod error;
pub mod ioctl_command;
pub mod session;


use libc::off_t;
use log::{debug, trace};
use nix::fcntl::OFlag;
use nix::sys::ioctl::ioctl_param_type;
use std::os::raw::c_int;

use device::UnderlyingDevice;
use error::ProxyError;
use ioctl_command::{IoctlCommand, UinputRequest};
use session::{FileHandle, OpenSession, SessionTable};

/// Upper bound for a single read. Larger requests get at most this many bytes.
pub const MAX_READ_SIZE: usize = 65536;

pub type ReadBuffer = [u8; MAX_READ_SIZE];

pub struct DeviceProxy<D: UnderlyingDevice> {
    device: D,
    sessions: SessionTable<D::Handle>,
}

impl<D: UnderlyingDevice> DeviceProxy<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            sessions: SessionTable::new(),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn sessions(&self) -> &SessionTable<D::Handle> {
        &self.sessions
    }

    /// Opens the real device with exactly `flags`, one real open per call.
    pub fn open(&self, flags: OFlag) -> Result<FileHandle, ProxyError> {
        let device = self.device.open(flags)?;
        let fh = self.sessions.insert(OpenSession { device, flags });
        debug!("{}: opened {:?} with flags {:?}", fh, device, flags);
        Ok(fh)
    }

    /// Forgets the session and closes its descriptor. Close is attempted exactly
    /// once; the session is gone even if close fails.
    pub fn release(&self, fh: FileHandle) -> Result<(), ProxyError> {
        let session = self.sessions.remove(fh)?;
        debug!("{}: closing {:?}", fh, session.device);
        self.device.close(session.device)?;
        Ok(())
    }

    /// Positioned read of at most `count` bytes, clamped to [`MAX_READ_SIZE`].
    /// A short read is returned as is.
    pub fn read<'b>(
        &self,
        fh: FileHandle,
        count: usize,
        offset: off_t,
        buf: &'b mut ReadBuffer,
    ) -> Result<&'b [u8], ProxyError> {
        let session = self.sessions.get(fh)?;
        let count = count.min(MAX_READ_SIZE);
        let read = self.device.read_at(session.device, &mut buf[..count], offset)?;
        trace!("{}: read {} of {} bytes at {}", fh, read, count, offset);
        Ok(&buf[..read])
    }

    /// Plain write of the whole buffer. The offset only shows up in the log.
    /// A short write is returned as is.
    pub fn write(&self, fh: FileHandle, data: &[u8], offset: off_t) -> Result<usize, ProxyError> {
        let session = self.sessions.get(fh)?;
        let written = self.device.write(session.device, data)?;
        trace!(
            "{}: wrote {} of {} bytes (ignored offset {})",
            fh,
            written,
            data.len(),
            offset
        );
        Ok(written)
    }

    /// Forwards whitelisted ioctls and returns the result of the real ioctl.
    /// Anything else fails without touching the real device.
    pub fn ioctl(
        &self,
        fh: FileHandle,
        cmd: u64,
        arg: ioctl_param_type,
    ) -> Result<c_int, ProxyError> {
        let command = IoctlCommand::from_request_code(cmd);
        let request = command
            .into_request(arg)
            .ok_or(ProxyError::UnsupportedIoctl(cmd))?;
        let session = self.sessions.get(fh)?;

        match request {
            UinputRequest::SetBit(bit, value) => debug!("{}: ioctl {} {}", fh, bit.name(), value),
            UinputRequest::Lifecycle(lifecycle) => debug!("{}: ioctl {}", fh, lifecycle.name()),
        }
        let result = self.device.ioctl(session.device, request)?;
        Ok(result)
    }
}
