//! Read-only host info queries behind the `os` verb.
//!
//! CPU details come from `/proc/cpuinfo` where available; the parser is a
//! pure function over the file text. When the file cannot be read (non-Linux
//! hosts, restricted containers) the query falls back to the logical CPU
//! count with unknown model and speed.

use std::env;
use std::fs;
use std::io::Write;
use std::thread;

use fmsh_types::{FmError, Result};

use crate::check_args;

#[cfg(windows)]
const EOL: &str = "\r\n";
#[cfg(not(windows))]
const EOL: &str = "\n";

/// Execute one `os <flag>` query, writing the answer to `out`.
pub fn run(args: &[String], out: &mut dyn Write) -> Result<()> {
    check_args(args, 1, "os")?;

    match args[0].as_str() {
        "--EOL" => writeln!(out, "{EOL:?}")?,
        "--cpus" => print_cpus(out)?,
        "--homedir" => {
            let home = dirs::home_dir()
                .ok_or_else(|| FmError::operation("Cannot determine home directory"))?;
            writeln!(out, "{}", home.display())?;
        }
        "--username" => writeln!(out, "{}", current_username()?)?,
        "--architecture" => writeln!(out, "{}", env::consts::ARCH)?,
        other => {
            log::debug!("os: unrecognised flag {other}");
            return Err(FmError::input("Unknown system parameter"));
        }
    }
    Ok(())
}

/// One logical CPU as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    /// Clock speed in MHz (0.0 when unknown).
    pub mhz: f64,
}

fn print_cpus(out: &mut dyn Write) -> Result<()> {
    let cpus = read_cpus();
    writeln!(out, "Total CPUs: {}", cpus.len())?;
    for (i, cpu) in cpus.iter().enumerate() {
        writeln!(
            out,
            "{}. Model: {}, Speed: {:.2} GHz",
            i + 1,
            cpu.model,
            cpu.mhz / 1000.0
        )?;
    }
    Ok(())
}

/// Enumerate logical CPUs, preferring `/proc/cpuinfo`.
fn read_cpus() -> Vec<CpuInfo> {
    if let Ok(text) = fs::read_to_string("/proc/cpuinfo") {
        let cpus = parse_cpuinfo(&text);
        if !cpus.is_empty() {
            return cpus;
        }
    }
    // Fallback: count only.
    let count = thread::available_parallelism().map(usize::from).unwrap_or(1);
    vec![
        CpuInfo {
            model: "unknown".to_string(),
            mhz: 0.0,
        };
        count
    ]
}

/// Parse the `processor` / `model name` / `cpu MHz` fields of a
/// `/proc/cpuinfo` dump into per-CPU records.
fn parse_cpuinfo(text: &str) -> Vec<CpuInfo> {
    let mut cpus: Vec<CpuInfo> = Vec::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "processor" => cpus.push(CpuInfo {
                model: "unknown".to_string(),
                mhz: 0.0,
            }),
            "model name" => {
                if let Some(cpu) = cpus.last_mut() {
                    cpu.model = value.to_string();
                }
            }
            "cpu MHz" => {
                if let Some(cpu) = cpus.last_mut() {
                    cpu.mhz = value.parse().unwrap_or(0.0);
                }
            }
            _ => {}
        }
    }
    cpus
}

/// The OS-session-reported username.
fn current_username() -> Result<String> {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .map_err(|_| FmError::operation("Cannot determine username"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU @ 2.20GHz
cpu MHz\t\t: 2200.152
cache size\t: 56320 KB

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU @ 2.20GHz
cpu MHz\t\t: 2199.998
";

    fn os(flag: &str) -> Result<String> {
        let mut out: Vec<u8> = Vec::new();
        run(&[flag.to_string()], &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_per_cpu_blocks() {
        let cpus = parse_cpuinfo(SAMPLE_CPUINFO);
        assert_eq!(cpus.len(), 2);
        assert_eq!(cpus[0].model, "Intel(R) Xeon(R) CPU @ 2.20GHz");
        assert!((cpus[0].mhz - 2200.152).abs() < 1e-6);
        assert!((cpus[1].mhz - 2199.998).abs() < 1e-6);
    }

    #[test]
    fn parses_empty_input_to_no_cpus() {
        assert!(parse_cpuinfo("").is_empty());
    }

    #[test]
    fn missing_fields_stay_unknown() {
        let cpus = parse_cpuinfo("processor\t: 0\nflags\t: fpu vme\n");
        assert_eq!(cpus.len(), 1);
        assert_eq!(cpus[0].model, "unknown");
        assert_eq!(cpus[0].mhz, 0.0);
    }

    #[test]
    fn eol_is_quoted_and_escaped() {
        let text = os("--EOL").unwrap();
        assert!(text == "\"\\n\"\n" || text == "\"\\r\\n\"\n");
    }

    #[test]
    fn architecture_is_nonempty() {
        let text = os("--architecture").unwrap();
        assert!(!text.trim().is_empty());
    }

    #[test]
    fn cpus_output_shape() {
        let text = os("--cpus").unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Total CPUs: "));
        let count: usize = header.trim_start_matches("Total CPUs: ").parse().unwrap();
        assert!(count >= 1);
        let first = lines.next().unwrap();
        assert!(first.starts_with("1. Model: "));
        assert!(first.contains(" GHz"));
    }

    #[test]
    fn unknown_flag_is_input_error() {
        let err = os("--kernel").unwrap_err();
        assert!(err.is_input());
        assert!(format!("{err}").contains("Unknown system parameter"));
    }

    #[test]
    fn wrong_arg_count_is_input_error() {
        let mut out: Vec<u8> = Vec::new();
        let err = run(&[], &mut out).unwrap_err();
        assert!(err.is_input());
    }
}
