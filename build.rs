use chrono::{DateTime, Utc};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    // SOURCE_DATE_EPOCH pins the stamp for reproducible builds
    let built_at = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    println!(
        "cargo:rustc-env=BUILD_DATE={}",
        built_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
