// SPDX-License-Identifier: MIT
//
// Author: Richard Wiedenhöft <richard@wiedenhoeft.xyz>
// Author: Johannes Leupolz <dev@leupolz.eu>
//
// Generates the low-level fuse and cuse bindings of libfuse3 with bindgen.

extern crate bindgen;
extern crate pkg_config;

use std::env;
use std::path::PathBuf;

const FUSE_USE_VERSION: u32 = 314; //fuse version of ubuntu 24.04

/// A header of libfuse3 and the symbol prefix that is generated for it.
struct Header {
    file: &'static str,
    prefix: &'static str,
    blocklist_types: &'static [&'static str],
    blocklist_functions: &'static [&'static str],
}

const HEADERS: &[Header] = &[
    Header {
        file: "fuse_lowlevel.h",
        prefix: "fuse",
        // variadic logging callbacks cannot be expressed by bindgen
        blocklist_types: &["fuse_log_func_t"],
        blocklist_functions: &["fuse_set_log_func"],
    },
    Header {
        file: "cuse_lowlevel.h",
        prefix: "cuse",
        blocklist_types: &[],
        blocklist_functions: &[],
    },
];

fn find_header(header: &str, fuse_lib: &pkg_config::Library) -> String {
    let header_path = fuse_lib
        .include_paths
        .iter()
        .map(|include_path| include_path.join(header))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| panic!("Cannot find {} in the include paths of fuse3", header));

    header_path
        .to_str()
        .unwrap_or_else(|| panic!("Path to {} contains invalid unicode characters", header))
        .to_string()
}

fn clang_args(fuse_lib: &pkg_config::Library) -> Vec<String> {
    let mut args: Vec<String> = fuse_lib
        .defines
        .iter()
        .map(|(key, val)| match val {
            Some(val) => format!("-D{}={}", key, val),
            None => format!("-D{}", key),
        })
        .collect();
    args.extend(
        fuse_lib
            .include_paths
            .iter()
            .map(|dir| format!("-I{}", dir.display())),
    );
    args.push(format!("-DFUSE_USE_VERSION={}", FUSE_USE_VERSION));
    args
}

fn generate_bindings(header: &Header, fuse_lib: &pkg_config::Library, out_dir: &PathBuf) {
    let symbols = format!("(?i)^{}.*", header.prefix);

    let mut builder = bindgen::builder()
        .clang_args(clang_args(fuse_lib))
        .derive_default(true)
        .derive_copy(true)
        .derive_debug(true)
        // rerun build.rs on header changes
        .parse_callbacks(Box::new(bindgen::CargoCallbacks))
        .allowlist_recursively(false)
        .allowlist_type(&symbols)
        .allowlist_function(&symbols)
        .allowlist_var(&symbols);

    for blocked in header.blocklist_types {
        builder = builder.blocklist_type(blocked);
    }
    for blocked in header.blocklist_functions {
        builder = builder.blocklist_function(blocked);
    }

    let bindings = builder
        .header(find_header(header.file, fuse_lib))
        .generate()
        .unwrap_or_else(|_| panic!("Failed to generate {} bindings", header.file));

    let bindings_path = out_dir.join(header.file.replace(".h", ".rs"));
    bindings
        .write_to_file(&bindings_path)
        .unwrap_or_else(|_| panic!("Failed to write {}", bindings_path.display()));
}

fn main() {
    let fuse3_lib = pkg_config::Config::new()
        .cargo_metadata(true)
        .probe("fuse3")
        .expect("Failed to find pkg-config module fuse3");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    for header in HEADERS {
        generate_bindings(header, &fuse3_lib, &out_dir);
    }
}
