// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use ::cuse_lowlevel::*;
use log::debug;

use crate::cuse_device::state::Operation;
use crate::cuse_device::*;

pub unsafe extern "C" fn uuinput_release(
    _req: fuse_lowlevel::fuse_req_t,
    _fi: *mut fuse_lowlevel::fuse_file_info,
) {
    let fh = file_handle(&*_fi);
    debug!("{}: release", fh);

    match proxy().and_then(|proxy| proxy.release(fh)) {
        Ok(()) => {
            debug!("{}: released", fh);
            // Note: For CUSE, the kernel always issues RELEASE via fuse_sync_release(),
            // which forces a *synchronous* request (fuse_simple_request()).
            //
            // That means the kernel thread blocks until userspace sends a reply header.
            // Calling fuse_reply_none() would send no header at all, causing the kernel
            // to wait forever and the caller to deadlock.
            //
            // Therefore we must always send a real reply for RELEASE.
            // `fuse_reply_err(req, 0)` is enough to wake the kernel and is safe here.
            fuse_lowlevel::fuse_reply_err(_req, 0);
        }
        Err(e) => reply_proxy_error(_req, Operation::Release, Some(fh), &e),
    }
}
