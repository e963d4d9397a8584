// gpu.rs
//! GPU load/temperature/VRAM via an external query command (nvidia-smi).

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::SourceError;
use crate::types::GpuReading;

pub const DEFAULT_GPU_PROGRAM: &str = "nvidia-smi";

/// Arguments asking for `temp, util%, mem-util%` as bare CSV.
pub const GPU_QUERY_ARGS: [&str; 2] = [
    "--query-gpu=temperature.gpu,utilization.gpu,utilization.memory",
    "--format=csv,noheader,nounits",
];

/// Spawns the query command once per poll. Holds no last-known values.
#[derive(Debug, Clone)]
pub struct ExternalProcessSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ExternalProcessSource {
    pub fn nvidia_smi(program: impl Into<String>, timeout: Duration) -> Self {
        Self::with_command(program, GPU_QUERY_ARGS, timeout)
    }

    pub fn with_command<I, S>(program: impl Into<String>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    pub async fn poll(&mut self) -> Result<GpuReading, SourceError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // a timed-out or cancelled poll must not leave the child behind
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| SourceError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(|e| SourceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?,
            Err(_) => {
                return Err(SourceError::Timeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(SourceError::Exit {
                program: self.program.clone(),
                status: output.status,
            });
        }

        parse_gpu_csv(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `"<temp>, <util>, <mem>"`. Multi-GPU hosts print one line per GPU;
/// every line must have that shape and the first one is returned.
pub fn parse_gpu_csv(out: &str) -> Result<GpuReading, SourceError> {
    let malformed = || SourceError::Malformed(out.trim().to_string());

    let mut first = None;
    for line in out.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let reading = parse_gpu_line(line).ok_or_else(malformed)?;
        first.get_or_insert(reading);
    }
    first.ok_or_else(malformed)
}

fn parse_gpu_line(line: &str) -> Option<GpuReading> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [temp, util, mem] = fields.as_slice() else {
        return None;
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    // only the temperature may be negative
    if !digits(temp.strip_prefix('-').unwrap_or(temp)) || !digits(util) || !digits(mem) {
        return None;
    }
    Some(GpuReading {
        temp_c: temp.parse().ok()?,
        util_pct: util.parse().ok()?,
        vram_pct: mem.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_integers() {
        let r = parse_gpu_csv("45, 10, 5").unwrap();
        assert_eq!(
            r,
            GpuReading {
                temp_c: 45,
                util_pct: 10,
                vram_pct: 5
            }
        );
    }

    #[test]
    fn tolerates_whitespace_and_trailing_newline() {
        let r = parse_gpu_csv("  61 ,0,   100\n").unwrap();
        assert_eq!((r.temp_c, r.util_pct, r.vram_pct), (61, 0, 100));
    }

    #[test]
    fn first_gpu_wins_on_multi_line_output() {
        let r = parse_gpu_csv("50, 7, 3\n70, 99, 88\n").unwrap();
        assert_eq!((r.temp_c, r.util_pct, r.vram_pct), (50, 7, 3));
    }

    #[test]
    fn negative_temperature_is_allowed() {
        let r = parse_gpu_csv("-5, 0, 0").unwrap();
        assert_eq!(r.temp_c, -5);
    }

    #[test]
    fn any_bad_line_fails_the_whole_output() {
        for bad in ["45, 10, 5\nabc", "45, 10, 5\n70, N/A, 3\n", "garbage\n45, 10, 5"] {
            let err = parse_gpu_csv(bad).unwrap_err();
            assert!(err.is_malformed(), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        for bad in [
            "",
            "abc",
            "45, 10",
            "45, 10, 5, 1",
            "45, [N/A], 5",
            "45.5, 10, 5",
            "45, -1, 5",
            "+45, +10, +5",
            "45, +10, 5",
            "-, 10, 5",
            "temperature.gpu, utilization.gpu, utilization.memory",
        ] {
            let err = parse_gpu_csv(bad).unwrap_err();
            assert!(err.is_malformed(), "{bad:?} gave {err}");
        }
    }

    #[cfg(unix)]
    fn sh(script: &str, timeout: Duration) -> ExternalProcessSource {
        ExternalProcessSource::with_command("sh", ["-c", script], timeout)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn poll_reads_command_stdout() {
        let mut src = sh("echo '45, 10, 5'", Duration::from_secs(5));
        let r = src.poll().await.unwrap();
        assert_eq!((r.temp_c, r.util_pct, r.vram_pct), (45, 10, 5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn malformed_stdout_is_unavailable() {
        let mut src = sh("echo abc", Duration::from_secs(5));
        assert!(src.poll().await.unwrap_err().is_malformed());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_unavailable_even_with_valid_output() {
        let mut src = sh("echo '45, 10, 5'; exit 3", Duration::from_secs(5));
        let err = src.poll().await.unwrap_err();
        assert!(matches!(err, SourceError::Exit { .. }), "{err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let mut src = ExternalProcessSource::nvidia_smi(
            "sysmon-test-no-such-binary",
            Duration::from_secs(1),
        );
        let err = src.poll().await.unwrap_err();
        assert!(matches!(err, SourceError::Spawn { .. }), "{err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_command_times_out() {
        let mut src = sh("sleep 5; echo '1, 2, 3'", Duration::from_millis(100));
        let started = std::time::Instant::now();
        let err = src.poll().await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }), "{err}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
