// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use ::cuse_lowlevel::*;
use libc::{off_t, size_t};
use log::debug;
use std::os::raw::c_char;

use crate::cuse_device::state::Operation;
use crate::cuse_device::*;
use crate::proxy::MAX_READ_SIZE;

pub unsafe extern "C" fn uuinput_read(
    _req: fuse_lowlevel::fuse_req_t,
    _size: size_t,
    _off: off_t,
    _fi: *mut fuse_lowlevel::fuse_file_info,
) {
    let fh = file_handle(&*_fi);
    debug!("{}: read {} bytes at {}", fh, _size, _off);

    // lives on the stack of the session loop thread, one buffer per request
    let mut buffer = [0u8; MAX_READ_SIZE];
    let result = match proxy() {
        Ok(proxy) => proxy.read(fh, _size, _off, &mut buffer),
        Err(e) => Err(e),
    };
    match result {
        Ok(data) => {
            record_success(fh);
            fuse_lowlevel::fuse_reply_buf(_req, data.as_ptr() as *const c_char, data.len());
        }
        Err(e) => reply_proxy_error(_req, Operation::Read, Some(fh), &e),
    }
}
