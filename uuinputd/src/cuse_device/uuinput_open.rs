// SPDX-License-Identifier: MIT
//
// Author: Johannes Leupolz <dev@leupolz.eu>

use ::cuse_lowlevel::*;
use log::debug;
use nix::fcntl::OFlag;

use crate::cuse_device::state::Operation;
use crate::cuse_device::*;

pub unsafe extern "C" fn uuinput_open(
    _req: fuse_lowlevel::fuse_req_t,
    _fi: *mut fuse_lowlevel::fuse_file_info,
) {
    let flags = OFlag::from_bits_retain((*_fi).flags);
    let ctx = fuse_lowlevel::fuse_req_ctx(_req);
    debug!("open by process id {} with flags {:?}", (*ctx).pid, flags);

    match proxy().and_then(|proxy| proxy.open(flags)) {
        Ok(fh) => {
            (*_fi).fh = fh.0;
            fuse_lowlevel::fuse_reply_open(_req, _fi);
        }
        Err(e) => reply_proxy_error(_req, Operation::Open, None, &e),
    }
}
