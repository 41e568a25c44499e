//! Builds the browser app and stages it for embedding.
//!
//! `index.html` and the favicon are always copied into `$OUT_DIR/dist`. The
//! wasm bundle is added when the `wasm32-unknown-unknown` target and
//! `wasm-bindgen` are installed; otherwise the server still builds and the
//! page reports that the app is missing. Set `TODOS_SKIP_FRONTEND` to skip
//! the wasm build.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const STATIC_FILES: [&str; 2] = ["index.html", "favicon.svg"];

fn main() -> io::Result<()> {
    let manifest_dir = PathBuf::from(env_var("CARGO_MANIFEST_DIR")?);
    let frontend_dir = manifest_dir.join("../frontend");
    let dist_dir = PathBuf::from(env_var("OUT_DIR")?).join("dist");

    for path in [
        "../frontend/src",
        "../frontend/Cargo.toml",
        "../frontend/index.html",
        "../frontend/favicon.svg",
        "../client/src",
        "../shared/src",
    ] {
        println!("cargo:rerun-if-changed={path}");
    }
    println!("cargo:rerun-if-env-changed=TODOS_SKIP_FRONTEND");

    fs::create_dir_all(&dist_dir)?;
    for file in STATIC_FILES {
        fs::copy(frontend_dir.join(file), dist_dir.join(file))?;
    }

    if env::var_os("TODOS_SKIP_FRONTEND").is_some() {
        println!("cargo:warning=TODOS_SKIP_FRONTEND is set; serving the page without the app");
    } else if let Err(reason) = build_wasm(&frontend_dir, &dist_dir) {
        println!("cargo:warning=Frontend not built: {reason}");
    }

    println!("cargo:rustc-env=TODOS_FRONTEND_DIST={}", dist_dir.display());
    Ok(())
}

fn env_var(key: &str) -> io::Result<String> {
    env::var(key).map_err(|e| io::Error::other(format!("{key}: {e}")))
}

fn build_wasm(frontend_dir: &Path, dist_dir: &Path) -> Result<(), String> {
    check_toolchain()?;

    // The frontend is its own workspace with its own target dir, so this
    // does not contend for the outer build's lock.
    let cargo = env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"));
    let status = Command::new(cargo)
        .current_dir(frontend_dir)
        .args(["build", "--target", WASM_TARGET, "--release", "--lib"])
        .env_remove("CARGO_TARGET_DIR")
        .env_remove("RUSTFLAGS")
        .env_remove("CARGO_ENCODED_RUSTFLAGS")
        .status()
        .map_err(|e| format!("running cargo: {e}"))?;
    if !status.success() {
        return Err("cargo build for the frontend failed".into());
    }

    let wasm_file = frontend_dir.join(format!("target/{WASM_TARGET}/release/todos_frontend.wasm"));
    if !wasm_file.exists() {
        return Err(format!("{} not found", wasm_file.display()));
    }

    let status = Command::new("wasm-bindgen")
        .arg(&wasm_file)
        .arg("--out-dir")
        .arg(dist_dir)
        .args(["--target", "web", "--no-typescript"])
        .status()
        .map_err(|e| format!("running wasm-bindgen: {e}"))?;
    if !status.success() {
        return Err("wasm-bindgen failed".into());
    }

    println!("cargo:warning=Frontend build complete");
    Ok(())
}

fn check_toolchain() -> Result<(), String> {
    let rustc = env::var_os("RUSTC").unwrap_or_else(|| OsString::from("rustc"));
    let output = Command::new(rustc)
        .args(["--print", "target-libdir", "--target", WASM_TARGET])
        .output()
        .map_err(|e| format!("running rustc: {e}"))?;
    let libdir = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() || !Path::new(libdir.trim()).is_dir() {
        return Err(format!("the {WASM_TARGET} target is not installed"));
    }

    Command::new("wasm-bindgen")
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|_| ())
        .ok_or_else(|| "wasm-bindgen is not installed (cargo install wasm-bindgen-cli --version 0.2.104)".into())
}
