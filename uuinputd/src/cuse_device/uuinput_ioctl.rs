// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use ::cuse_lowlevel::*;
use libc::size_t;
use log::debug;
use nix::sys::ioctl::ioctl_param_type;
use std::os::raw::{c_int, c_uint, c_void};

use crate::cuse_device::state::Operation;
use crate::cuse_device::*;

pub unsafe extern "C" fn uuinput_ioctl(
    _req: fuse_lowlevel::fuse_req_t,
    _cmd: c_int,
    _arg: *mut c_void, //note: this is a pointer in the application space and should not be dereferenced at all
    _fi: *mut fuse_lowlevel::fuse_file_info,
    _flags: c_uint,
    _in_buf: *const c_void,
    _in_bufsz: size_t,
    _out_bufsz: size_t,
) {
    // The forwarded commands never need mapped buffers, so fuse_reply_ioctl_retry
    // is never used and _in_buf/_out_bufsz stay untouched. For the set-bit commands
    // the "pointer" is really the integer the caller passed to ioctl().
    let fh = file_handle(&*_fi);
    let cmd = (_cmd as c_uint) as u64;
    let arg = _arg as usize as ioctl_param_type;
    debug!(
        "{}: ioctl {:#x} arg {} (in {} bytes, out {} bytes)",
        fh, cmd, arg, _in_bufsz, _out_bufsz
    );

    match proxy().and_then(|proxy| proxy.ioctl(fh, cmd, arg)) {
        Ok(result) => {
            debug!("{}: ioctl {:#x} -> {}", fh, cmd, result);
            record_success(fh);
            fuse_lowlevel::fuse_reply_ioctl(_req, result, std::ptr::null(), 0);
        }
        Err(e) => reply_proxy_error(_req, Operation::Ioctl, Some(fh), &e),
    }
}
