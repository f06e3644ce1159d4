// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

pub mod state;
pub mod uuinput_ioctl;
pub mod uuinput_open;
pub mod uuinput_read;
pub mod uuinput_release;
pub mod uuinput_write;

use ::cuse_lowlevel::*;
use log::debug;
use nix::errno::Errno;
use std::os::raw::c_int;

use crate::proxy::device::UinputDevice;
use crate::proxy::error::ProxyError;
use crate::proxy::session::FileHandle;
use crate::proxy::DeviceProxy;
use state::{Operation, ERROR_LOG_LIMITER, PROXY};

// Instance of cuse_lowlevel_ops with the five forwarded operations assigned.
// Setting to None leads to e.g. "write error: Function not implemented".
// The counterparts in the kernel are uinput_fops of uinput.c.
// See: https://github.com/torvalds/linux/blob/master/drivers/input/misc/uinput.c,
pub fn uuinput_make_cuse_ops() -> cuse_lowlevel::cuse_lowlevel_ops {
    cuse_lowlevel::cuse_lowlevel_ops {
        init: None,
        init_done: None,
        destroy: None,
        open: Some(uuinput_open::uuinput_open),
        read: Some(uuinput_read::uuinput_read),
        write: Some(uuinput_write::uuinput_write),
        flush: None,
        release: Some(uuinput_release::uuinput_release),
        fsync: None,
        ioctl: Some(uuinput_ioctl::uuinput_ioctl),
        poll: None,
    }
}

pub fn file_handle(fi: &fuse_lowlevel::fuse_file_info) -> FileHandle {
    FileHandle(fi.fh)
}

pub fn proxy() -> Result<&'static DeviceProxy<UinputDevice>, ProxyError> {
    PROXY.get().ok_or(ProxyError::Device(Errno::EIO))
}

pub fn record_success(fh: FileHandle) {
    if let Some(limiter) = ERROR_LOG_LIMITER.get() {
        limiter.record_success(fh);
    }
}

/// Logs the failure (once per streak) and sends the only reply for `req`.
pub unsafe fn reply_proxy_error(
    req: fuse_lowlevel::fuse_req_t,
    op: Operation,
    fh: Option<FileHandle>,
    err: &ProxyError,
) {
    let should_log = ERROR_LOG_LIMITER
        .get()
        .map_or(true, |limiter| limiter.should_log(fh, op, err));
    if should_log {
        match fh {
            Some(fh) => debug!("{}: {} failed: {}", fh, op, err),
            None => debug!("{} failed: {}", op, err),
        }
    }
    fuse_lowlevel::fuse_reply_err(req, err.errno() as c_int);
}
