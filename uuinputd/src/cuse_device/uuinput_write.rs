// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use ::cuse_lowlevel::*;
use libc::{off_t, size_t};
use log::trace;
use std::os::raw::c_char;

use crate::cuse_device::state::Operation;
use crate::cuse_device::*;

pub unsafe extern "C" fn uuinput_write(
    _req: fuse_lowlevel::fuse_req_t,
    _buf: *const c_char,
    _size: size_t,
    _off: off_t,
    _fi: *mut fuse_lowlevel::fuse_file_info,
) {
    let fh = file_handle(&*_fi);
    trace!("{}: write {} bytes at {}", fh, _size, _off);

    let slice: &[u8] = if _size == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(_buf as *const u8, _size)
    };
    match proxy().and_then(|proxy| proxy.write(fh, slice, _off)) {
        Ok(written) => {
            record_success(fh);
            fuse_lowlevel::fuse_reply_write(_req, written);
        }
        Err(e) => reply_proxy_error(_req, Operation::Write, Some(fh), &e),
    }
}
