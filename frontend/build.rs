use std::env;
use std::fs;
use std::path::Path;

// Forwards FLORES_API_URL / MAPBOX_ACCESS_TOKEN from a local .env file to
// `option_env!` in src/config.rs. Variables already set in the environment win.
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using the default API URL and no Mapbox token. Copy .env.example to .env to configure them.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FLORES_API_URL");
    println!("cargo:rerun-if-env-changed=MAPBOX_ACCESS_TOKEN");
}
