use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Quantum configuration of the MagickCore build being linked.
#[derive(Debug, Clone, Copy)]
struct QuantumConfig {
    depth: u32,
    hdri: bool,
}

impl Default for QuantumConfig {
    // ImageMagick 7 ships Q16 HDRI unless configured otherwise.
    fn default() -> Self {
        Self {
            depth: 16,
            hdri: true,
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=csrc/magick_shim.h");
    println!("cargo:rerun-if-changed=csrc/magick_shim.c");
    println!("cargo:rerun-if-env-changed=MAGICK_SKIP_NATIVE_BUILD");
    println!("cargo:rerun-if-env-changed=MAGICK_PREBUILT_DIR");
    println!("cargo:rerun-if-env-changed=MAGICK_LIB_NAME");
    println!("cargo:rerun-if-env-changed=MAGICK_PKG_NAME");
    println!("cargo:rerun-if-env-changed=MAGICK_CFLAGS");
    println!("cargo:rerun-if-env-changed=MAGICK_QUANTUM_DEPTH");
    println!("cargo:rerun-if-env-changed=MAGICK_HDRI");

    println!("cargo:rustc-check-cfg=cfg(magick_hdri)");
    println!("cargo:rustc-check-cfg=cfg(magick_quantum_depth, values(\"8\", \"16\", \"32\", \"64\"))");

    if env_truthy("MAGICK_SKIP_NATIVE_BUILD") {
        println!(
            "cargo:warning=MAGICK_SKIP_NATIVE_BUILD=1: \
             skipping MagickCore shim build (check-only mode)"
        );
        emit_quantum_cfg(quantum_config_from_env().unwrap_or_default());
        return;
    }

    if let Some(prebuilt_dir) = env_path("MAGICK_PREBUILT_DIR") {
        let include_dir = pick_include_dir(&prebuilt_dir);
        let lib_dir = pick_lib_dir(&prebuilt_dir);
        if !include_dir.exists() || !lib_dir.exists() {
            panic!(
                "MAGICK_PREBUILT_DIR is missing include/lib paths: {}",
                prebuilt_dir.display()
            );
        }
        let quantum = quantum_config_from_env().unwrap_or_default();
        compile_shim(&[include_dir], quantum);
        link_magick(&lib_dir);
        emit_quantum_cfg(quantum);
        return;
    }

    let pkg_name = env_string("MAGICK_PKG_NAME").unwrap_or_else(|| "MagickCore".to_string());
    let library = match pkg_config::Config::new()
        .atleast_version("7.0")
        .probe(&pkg_name)
    {
        Ok(library) => library,
        Err(e) => panic!(
            "MagickCore not found through pkg-config ({pkg_name}): {e}. \
             Install ImageMagick 7 development files or set MAGICK_PREBUILT_DIR."
        ),
    };

    let quantum = quantum_config_from_env()
        .or_else(|| quantum_config_from_defines(&library.defines))
        .unwrap_or_default();
    compile_shim(&library.include_paths, quantum);
    emit_quantum_cfg(quantum);
}

fn compile_shim(include_dirs: &[PathBuf], quantum: QuantumConfig) {
    let mut build = cc::Build::new();
    build
        .file("csrc/magick_shim.c")
        .include("csrc")
        .define(
            "MAGICKCORE_QUANTUM_DEPTH",
            Some(quantum.depth.to_string().as_str()),
        )
        .define(
            "MAGICKCORE_HDRI_ENABLE",
            Some(if quantum.hdri { "1" } else { "0" }),
        )
        .flag_if_supported("-std=c99");
    for dir in include_dirs {
        build.include(dir);
    }
    if env::var_os("CARGO_FEATURE_EXTENDED").is_some() {
        build.define("MAGICK_SHIM_EXTENDED", None);
    }
    if let Some(cflags) = env_string("MAGICK_CFLAGS") {
        for flag in cflags.split_whitespace() {
            build.flag(flag);
        }
    }
    build.compile("magick_shim");
}

fn link_magick(lib_dir: &Path) {
    let lib_name =
        env_string("MAGICK_LIB_NAME").unwrap_or_else(|| "MagickCore-7.Q16HDRI".to_string());
    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib={lib_name}");
}

fn emit_quantum_cfg(quantum: QuantumConfig) {
    println!("cargo:rustc-cfg=magick_quantum_depth=\"{}\"", quantum.depth);
    if quantum.hdri {
        println!("cargo:rustc-cfg=magick_hdri");
    }
}

fn quantum_config_from_env() -> Option<QuantumConfig> {
    let depth = env_string("MAGICK_QUANTUM_DEPTH")?;
    let depth = parse_depth(&depth)
        .unwrap_or_else(|| panic!("MAGICK_QUANTUM_DEPTH must be 8, 16, 32 or 64, got {depth}"));
    let hdri = match env_string("MAGICK_HDRI") {
        Some(_) => env_truthy("MAGICK_HDRI"),
        None => QuantumConfig::default().hdri,
    };
    Some(QuantumConfig { depth, hdri })
}

fn quantum_config_from_defines(defines: &HashMap<String, Option<String>>) -> Option<QuantumConfig> {
    let depth = defines
        .get("MAGICKCORE_QUANTUM_DEPTH")?
        .as_deref()
        .and_then(parse_depth)?;
    let hdri = matches!(
        defines.get("MAGICKCORE_HDRI_ENABLE"),
        Some(Some(v)) if v.as_str() == "1"
    );
    Some(QuantumConfig { depth, hdri })
}

fn parse_depth(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>().ok()? {
        d @ (8 | 16 | 32 | 64) => Some(d),
        _ => None,
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn env_string(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn env_truthy(var: &str) -> bool {
    matches!(
        env::var(var).ok().as_deref(),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    )
}

fn pick_include_dir(root: &Path) -> PathBuf {
    let versioned = root.join("include").join("ImageMagick-7");
    if versioned.exists() {
        return versioned;
    }
    root.join("include")
}

fn pick_lib_dir(root: &Path) -> PathBuf {
    let lib = root.join("lib");
    if lib.exists() {
        return lib;
    }
    let lib64 = root.join("lib64");
    if lib64.exists() {
        return lib64;
    }
    lib
}
