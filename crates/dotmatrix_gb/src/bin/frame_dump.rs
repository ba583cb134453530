use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use dotmatrix_gb::persistence::{self, SaveStore};
use dotmatrix_gb::{GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: frame_dump <rom_path> <out_rgb24_path> [frames|--until-ldbb]";
const BREAKPOINT_STEP_BUDGET: u64 = 50_000_000;

/// Stores `<key>.sav` and `<key>.rtc` files next to each other.
struct DirSaveStore {
    dir: PathBuf,
}

impl DirSaveStore {
    fn path(&self, key: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{key}.{extension}"))
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}

impl SaveStore for DirSaveStore {
    fn load_ram(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        read_optional(&self.path(key, "sav"))
    }

    fn save_ram(&mut self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path(key, "sav");
        std::fs::write(&path, data).with_context(|| format!("writing {}", path.display()))
    }

    fn load_rtc_epoch(&mut self, key: &str) -> Result<Option<u64>> {
        let Some(data) = read_optional(&self.path(key, "rtc"))? else {
            return Ok(None);
        };
        let bytes: [u8; 8] = data
            .as_slice()
            .try_into()
            .context("RTC file must hold an 8-byte little-endian timestamp")?;
        Ok(Some(u64::from_le_bytes(bytes)))
    }

    fn save_rtc_epoch(&mut self, key: &str, epoch: u64) -> Result<()> {
        let path = self.path(key, "rtc");
        std::fs::write(&path, epoch.to_le_bytes())
            .with_context(|| format!("writing {}", path.display()))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(rom_path), Some(out_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let rom_path = PathBuf::from(rom_path);
    let out_path = PathBuf::from(out_path);
    let mode = args.next().unwrap_or_else(|| "120".to_string());
    let frames: Option<u32> = if mode == "--until-ldbb" {
        None
    } else {
        Some(
            mode.parse::<u32>()
                .with_context(|| format!("invalid frame count '{mode}'; {USAGE}"))?,
        )
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;

    let mut gb = GameBoy::new(rom, GameBoyConfig::default())?;
    let mut store = DirSaveStore {
        dir: rom_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    persistence::restore(&mut gb, &mut store)?;

    match frames {
        Some(frames) => {
            for _ in 0..frames {
                gb.step_frame()?;
            }
        }
        None => {
            if !gb.step_until_software_breakpoint(BREAKPOINT_STEP_BUDGET)? {
                bail!("did not hit LD B,B software breakpoint within the step budget");
            }
        }
    }

    let frame = gb.frame_rgb();
    std::fs::write(&out_path, frame)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    match frames {
        Some(frames) => println!(
            "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
            frame.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            frames,
            out_path.display()
        ),
        None => println!(
            "Wrote {} bytes ({}x{} rgb24) at LD B,B breakpoint to '{}'",
            frame.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            out_path.display()
        ),
    }

    let serial = gb.serial_output();
    if !serial.is_empty() {
        println!("Serial: {}", String::from_utf8_lossy(serial));
    }

    if persistence::flush(&mut gb, &mut store)? {
        log::info!("saved battery state for {}", gb.save_key());
    }
    Ok(())
}
