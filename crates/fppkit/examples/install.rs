//! Example: Install the FPP tool suite
//!
//! Run with: FPP_TOOLS_VERSION=v2.1.0 cargo run -p fppkit --example install

use fppkit::{InstallConfig, Installer};

fn main() {
    let installer = Installer::new(InstallConfig::from_env());

    match installer.run() {
        Ok(installation) => {
            println!(
                "Installed FPP tools {} (package version {})",
                installation.tools_version(),
                installation.package_version()
            );
            for entry in installation.entries() {
                println!("  {}", entry.display());
            }
            // Scratch state is removed here when `installation` drops.
        }
        Err(e) => {
            eprintln!("Installation failed: {e}");
            std::process::exit(1);
        }
    }
}
