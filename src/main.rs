//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` on a local HTTP server.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

const PORT: &str = "8000";

fn wasm_pack() -> io::Result<ExitStatus> {
    Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
}

fn main() -> io::Result<()> {
    println!("Building WASM pkg …");
    match wasm_pack() {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Launching local server at http://127.0.0.1:{PORT} …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    let status = server.wait()?;
    if !status.success() {
        eprintln!("http server exited with {status}");
    }
    Ok(())
}
