// File: crates/timing-plot/tests/common/mod.rs
// Purpose: Shared fixtures for the timing-plot integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const SCENARIO_CSV: &str = "\
Size,Naive,CacheAware,CacheOblivious,CacheAware1D
100,5.0,3.0,4.0,3.5
200,40.0,20.0,25.0,22.0
";

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture csv");
    path
}
