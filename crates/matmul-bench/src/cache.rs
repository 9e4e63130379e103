// File: crates/matmul-bench/src/cache.rs
// Summary: L1 data cache geometry, read from sysfs on Linux with fixed fallbacks elsewhere.

use std::fs;
use std::path::Path;

use tracing::debug;

pub const FALLBACK_LINE_SIZE: usize = 64;
pub const FALLBACK_L1_SIZE: usize = 32 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheInfo {
    /// Bytes per cache line.
    pub line_size: usize,
    /// L1 data cache capacity in bytes.
    pub l1_size: usize,
}

impl Default for CacheInfo {
    fn default() -> Self {
        Self { line_size: FALLBACK_LINE_SIZE, l1_size: FALLBACK_L1_SIZE }
    }
}

impl CacheInfo {
    /// Probe the host, filling anything unknown with the fallbacks.
    pub fn detect() -> Self {
        let info = probe().unwrap_or_default();
        debug!(line_size = info.line_size, l1_size = info.l1_size, "cache geometry");
        info
    }

    /// Read an L1 data (or unified) cache description from a sysfs-style `cache/` directory.
    pub fn from_sysfs(cache_dir: &Path) -> Option<Self> {
        let mut entries = fs::read_dir(cache_dir).ok()?.flatten().map(|e| e.path()).collect::<Vec<_>>();
        entries.sort();
        for dir in entries {
            let is_index = dir.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with("index"));
            if !is_index {
                continue;
            }
            let level = read_trimmed(&dir.join("level"));
            let kind = read_trimmed(&dir.join("type"));
            if level.as_deref() != Some("1") || !matches!(kind.as_deref(), Some("Data" | "Unified")) {
                continue;
            }
            let fallback = Self::default();
            let line_size = read_trimmed(&dir.join("coherency_line_size"))
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(fallback.line_size);
            let l1_size = read_trimmed(&dir.join("size"))
                .and_then(|s| parse_size(&s))
                .unwrap_or(fallback.l1_size);
            return Some(Self { line_size, l1_size });
        }
        None
    }
}

/// Bytes per L1 data cache line on this host.
pub fn cache_line_size() -> usize {
    CacheInfo::detect().line_size
}

/// L1 data cache capacity in bytes on this host.
pub fn l1_cache_size() -> usize {
    CacheInfo::detect().l1_size
}

#[cfg(target_os = "linux")]
fn probe() -> Option<CacheInfo> {
    CacheInfo::from_sysfs(Path::new("/sys/devices/system/cpu/cpu0/cache"))
}

#[cfg(not(target_os = "linux"))]
fn probe() -> Option<CacheInfo> {
    None
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

/// Parse sysfs sizes such as `48K`, `2M` or `32768`.
pub fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim();
    let (digits, unit) = match s.char_indices().last()? {
        (i, 'K' | 'k') => (&s[..i], 1024),
        (i, 'M' | 'm') => (&s[..i], 1024 * 1024),
        (i, 'G' | 'g') => (&s[..i], 1024 * 1024 * 1024),
        _ => (s, 1),
    };
    digits.trim().parse::<usize>().ok().and_then(|v| v.checked_mul(unit)).filter(|&v| v > 0)
}
