use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use tickscan::report::scan_path;

/// The file to check. The tool takes no arguments.
const TARGET_PATH: &str = "app/register/page.tsx";

fn main() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    scan_path(Path::new(TARGET_PATH), &mut out)?;
    out.flush()?;

    Ok(())
}
